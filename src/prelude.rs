//! Prelude module for convenient imports.

pub use crate::error::{PreviewError, Result};
pub use crate::host::{ErrorDisplay, PreviewHost};
pub use crate::pipeline::compile;
pub use crate::sandbox::{config::PreviewConfig, frame::MemoryFrame, Sandbox};

#[cfg(not(target_arch = "wasm32"))]
pub use crate::channel::error_channel;
#[cfg(not(target_arch = "wasm32"))]
pub use crate::session::{HostEvent, PreviewSession};
