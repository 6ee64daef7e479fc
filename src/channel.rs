//! The one-way error channel from a sandboxed document to its host.
//!
//! The sandbox can only talk back by posting a message to its parent. The
//! host accepts exactly one shape, `{ "type": "COMPILE_ERROR", "error": "..." }`,
//! and ignores everything else. Filtering is done on the message shape, not
//! on where it came from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{parse_runtime_error, Result, RuntimeError};
pub use crate::pipeline::document::COMPILE_ERROR_TYPE;

/// Messages a sandboxed document may post to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SandboxMessage {
    /// The injected code failed to transpile or threw while running.
    #[serde(rename = "COMPILE_ERROR")]
    CompileError {
        /// The stringified failure.
        error: String,
    },
}

/// A failure reported from inside the sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// The failure as stringified by the sandboxed runtime.
    pub error: String,
}

impl CompileError {
    /// Create a compile error from its display text.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Decode the error text into name and message, if it has that form.
    pub fn runtime_error(&self) -> Option<RuntimeError> {
        parse_runtime_error(&self.error)
    }

    /// The wire form of this error.
    pub fn to_message(&self) -> SandboxMessage {
        SandboxMessage::CompileError {
            error: self.error.clone(),
        }
    }

    /// The wire form as JSON.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_message())?)
    }
}

impl From<SandboxMessage> for CompileError {
    fn from(message: SandboxMessage) -> Self {
        match message {
            SandboxMessage::CompileError { error } => Self { error },
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error)
    }
}

/// Pick a compile error out of an arbitrary posted message.
///
/// Anything that is not an object with `type == "COMPILE_ERROR"` and a
/// string `error` field yields `None`.
pub fn decode_message(data: &Value) -> Option<CompileError> {
    if data.get("type").and_then(Value::as_str) != Some(COMPILE_ERROR_TYPE) {
        #[cfg(feature = "tracing")]
        tracing::trace!("ignoring sandbox message without compile error type");
        return None;
    }

    match SandboxMessage::deserialize(data) {
        Ok(message) => {
            let error = CompileError::from(message);
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %error, "received compile error from sandbox");
            Some(error)
        }
        Err(_) => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::native::{error_channel, ParentPort, Subscription};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use serde_json::Value;
    use tokio::sync::mpsc;

    use super::{decode_message, CompileError};

    /// Create a connected parent port and host subscription.
    pub fn error_channel() -> (ParentPort, Subscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ParentPort { tx }, Subscription { rx })
    }

    /// The sandbox side of the channel, the equivalent of `window.parent`.
    #[derive(Debug, Clone)]
    pub struct ParentPort {
        tx: mpsc::UnboundedSender<Value>,
    }

    impl ParentPort {
        /// Post an arbitrary message. Returns `false` once the host has
        /// unsubscribed; the message is dropped in that case.
        pub fn post(&self, data: Value) -> bool {
            self.tx.send(data).is_ok()
        }

        /// Post a compile error in its wire form.
        pub fn post_compile_error(&self, error: impl Into<String>) -> bool {
            match CompileError::new(error).to_value() {
                Ok(value) => self.post(value),
                Err(_) => false,
            }
        }

        /// Check if the host is still listening.
        pub fn is_connected(&self) -> bool {
            !self.tx.is_closed()
        }
    }

    /// The host side of the channel.
    ///
    /// Holding a subscription keeps the channel open; dropping it releases
    /// the listener and later posts are discarded.
    #[derive(Debug)]
    pub struct Subscription {
        rx: mpsc::UnboundedReceiver<Value>,
    }

    impl Subscription {
        /// Wait for the next compile error, skipping unrelated messages.
        ///
        /// Returns `None` when every port has been dropped.
        pub async fn recv(&mut self) -> Option<CompileError> {
            while let Some(data) = self.rx.recv().await {
                if let Some(error) = decode_message(&data) {
                    return Some(error);
                }
            }
            None
        }

        /// Take the next pending compile error without waiting.
        pub fn try_recv(&mut self) -> Option<CompileError> {
            while let Ok(data) = self.rx.try_recv() {
                if let Some(error) = decode_message(&data) {
                    return Some(error);
                }
            }
            None
        }

        /// Stop listening. Pending messages can still be drained.
        pub fn close(&mut self) {
            self.rx.close();
        }
    }

    impl Drop for Subscription {
        fn drop(&mut self) {
            self.rx.close();
        }
    }
}
