//! # JSX Live Preview
//!
//! Turns component source typed into an editor into a complete HTML document
//! and loads it into an isolated frame, reporting failures back to the host.
//!
//! The pipeline has three pure stages followed by a sandbox write:
//!
//! 1. **Normalize**: `import ... from '...'` lines are extracted and removed
//! 2. **Resolve**: a default-exported component is wrapped as `App`
//! 3. **Assemble**: the code is embedded in a document that loads the UI
//!    runtime, its DOM binding, an in-browser transpiler and a styling engine
//! 4. **Load**: the sandbox document is replaced wholesale (open, write, close)
//!
//! None of this parses the source. Transpiling and running it happens inside
//! the sandbox; if that fails, the document posts
//! `{ type: "COMPILE_ERROR", error }` to its parent.
//!
//! ## Example
//!
//! ```rust,ignore
//! use jsx_live_preview::prelude::*;
//!
//! let (port, mut errors) = error_channel();
//! let frame = MemoryFrame::attached().with_parent(port);
//!
//! let mut host = PreviewHost::new(PreviewConfig::default(), frame)?;
//! host.mount();
//! host.edit("function App() { throw new Error(\"boom\"); }");
//!
//! // Whatever runs the document reports back through the frame.
//! host.sandbox().post_compile_error("Error: boom");
//! if let Some(error) = errors.try_recv() {
//!     host.report(error);
//! }
//! assert_eq!(host.error().message(), Some("Error: boom"));
//! ```
//!
//! ## Isolation
//!
//! The sandbox boundary is whatever the frame backend provides. It is not a
//! security boundary for untrusted, multi-tenant code.

pub mod channel;
pub mod error;
pub mod host;
pub mod pipeline;
pub mod prelude;
pub mod sandbox;
#[cfg(not(target_arch = "wasm32"))]
pub mod session;
pub mod templates;

// Re-export main types at crate root for convenience
pub use channel::{decode_message, CompileError, SandboxMessage, COMPILE_ERROR_TYPE};
#[cfg(not(target_arch = "wasm32"))]
pub use channel::{error_channel, ParentPort, Subscription};
pub use error::{parse_runtime_error, PreviewError, Result, RuntimeError};
pub use host::{ErrorDisplay, Notification, NotificationKind, PreviewHost};
pub use pipeline::compile;
pub use pipeline::document::{assemble, AssembledDocument};
pub use pipeline::entry::{resolve_entry, EntryPoint, ResolvedSource};
pub use pipeline::imports::{extract_imports, strip_imports, ImportDeclarationSet};
pub use sandbox::config::{PreviewConfig, PreviewConfigBuilder};
pub use sandbox::frame::MemoryFrame;
pub use sandbox::loader::{load, LoadOutcome};
pub use sandbox::{DocumentStream, Sandbox};
#[cfg(not(target_arch = "wasm32"))]
pub use session::{HostEvent, PreviewSession, SessionHandle};
pub use templates::{Template, TemplateLibrary};
