//! Loading assembled documents into a sandbox.

use crate::error::Result;
use crate::pipeline::document::AssembledDocument;
use crate::sandbox::{DocumentStream, Sandbox};

/// What a load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The sandbox document was replaced.
    Loaded,
    /// The sandbox is not attached yet; nothing was written.
    Detached,
}

/// Replace the sandbox document with `document`.
///
/// This is always a full reset (open, write, close), so every load starts
/// the sandboxed runtime from scratch. A detached sandbox is not an error.
pub fn load<S: Sandbox>(sandbox: &mut S, document: &AssembledDocument) -> Result<LoadOutcome> {
    let Some(mut stream) = sandbox.open()? else {
        #[cfg(feature = "tracing")]
        tracing::debug!("sandbox not attached, skipping load");
        return Ok(LoadOutcome::Detached);
    };

    stream.write(document.as_str())?;
    stream.close()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(bytes = document.len(), "loaded preview document");

    Ok(LoadOutcome::Loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compile;
    use crate::sandbox::config::PreviewConfig;
    use crate::sandbox::frame::MemoryFrame;

    #[test]
    fn test_load_replaces_document() {
        let mut frame = MemoryFrame::attached();
        let first = compile("function App() { return <p>one</p>; }", &PreviewConfig::default());
        let second = compile("function App() { return <p>two</p>; }", &PreviewConfig::default());

        assert_eq!(load(&mut frame, &first).unwrap(), LoadOutcome::Loaded);
        assert_eq!(load(&mut frame, &second).unwrap(), LoadOutcome::Loaded);

        assert_eq!(frame.document().as_deref(), Some(second.as_str()));
        assert_eq!(frame.generation(), 2);
    }

    #[test]
    fn test_load_into_detached_frame_is_noop() {
        let mut frame = MemoryFrame::detached();
        let doc = compile("function App() {}", &PreviewConfig::default());

        assert_eq!(load(&mut frame, &doc).unwrap(), LoadOutcome::Detached);
        assert!(frame.document().is_none());
        assert_eq!(frame.generation(), 0);
    }
}
