//! Sandbox module containing everything that touches an isolated frame.

pub mod config;
pub mod frame;
pub mod loader;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

use crate::error::Result;

/// An isolated execution context whose document can be replaced.
///
/// The host never inspects what runs inside; it can only rewrite the whole
/// document. `open` returns `Ok(None)` while the context is not attached yet,
/// which callers treat as "nothing to do".
pub trait Sandbox {
    /// Write access to the sandbox document for one replacement.
    type Stream: DocumentStream;

    /// Open the document for a full rewrite.
    fn open(&mut self) -> Result<Option<Self::Stream>>;
}

/// An open document stream. The new document takes effect on `close`.
pub trait DocumentStream {
    /// Append text to the document being written.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Finish the document.
    fn close(self) -> Result<()>;
}
