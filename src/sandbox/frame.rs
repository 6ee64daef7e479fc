//! In-process sandbox frame.
//!
//! `MemoryFrame` stands in for an embedded sub-document when there is no
//! browser: it keeps the last fully written document and counts how many
//! times it was replaced. Clones share the same frame, so a host can own one
//! handle while a viewer or test inspects another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(not(target_arch = "wasm32"))]
use crate::channel::ParentPort;
use crate::error::Result;
use crate::sandbox::{DocumentStream, Sandbox};

#[derive(Debug, Default)]
struct FrameState {
    attached: bool,
    document: Option<String>,
    generation: u64,
}

/// A sandbox frame held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryFrame {
    state: Arc<Mutex<FrameState>>,
    #[cfg(not(target_arch = "wasm32"))]
    parent: Option<ParentPort>,
}

impl MemoryFrame {
    /// Create a frame that accepts documents immediately.
    pub fn attached() -> Self {
        let frame = Self::default();
        frame.attach();
        frame
    }

    /// Create a frame that ignores loads until [`attach`](Self::attach) is called.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Connect the frame to its parent's error channel.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_parent(mut self, port: ParentPort) -> Self {
        self.parent = Some(port);
        self
    }

    /// Attach the frame so loads take effect.
    pub fn attach(&self) {
        self.lock().attached = true;
    }

    /// Detach the frame. The current document is discarded.
    pub fn detach(&self) {
        let mut state = self.lock();
        state.attached = false;
        state.document = None;
    }

    /// Check if the frame is attached.
    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    /// The document currently shown, if any.
    pub fn document(&self) -> Option<String> {
        self.lock().document.clone()
    }

    /// How many documents have been fully written into this frame.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Post a message to the parent, as the document's script would.
    ///
    /// Returns `false` if the frame has no parent or the parent stopped
    /// listening.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn post_message(&self, data: serde_json::Value) -> bool {
        self.parent.as_ref().is_some_and(|port| port.post(data))
    }

    /// Report a failure the way the bootstrap's guarded block does.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn post_compile_error(&self, error: impl Into<String>) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|port| port.post_compile_error(error))
    }

    fn lock(&self) -> MutexGuard<'_, FrameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sandbox for MemoryFrame {
    type Stream = MemoryStream;

    fn open(&mut self) -> Result<Option<MemoryStream>> {
        if !self.is_attached() {
            return Ok(None);
        }
        Ok(Some(MemoryStream {
            state: Arc::clone(&self.state),
            buffer: String::new(),
        }))
    }
}

/// An open write to a [`MemoryFrame`].
///
/// Writes are buffered and swapped in as one unit on close, so a reader
/// never sees a partially written document.
#[derive(Debug)]
pub struct MemoryStream {
    state: Arc<Mutex<FrameState>>,
    buffer: String,
}

impl DocumentStream for MemoryStream {
    fn write(&mut self, text: &str) -> Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn close(self) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.attached {
            state.document = Some(self.buffer);
            state.generation += 1;
        }
        Ok(())
    }
}
