//! Error types for the preview pipeline.

use thiserror::Error;

/// Errors raised on the host side of the preview.
///
/// Failures inside the sandboxed document never show up here; they travel
/// back as [`CompileError`](crate::channel::CompileError) messages instead.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// Writing the assembled document into the sandbox failed.
    #[error("failed to load preview document: {0}")]
    Load(#[source] anyhow::Error),

    /// The requested template key is not part of the template library.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A sandbox message could not be encoded or decoded.
    #[error("invalid sandbox message: {0}")]
    Message(#[from] serde_json::Error),
}

impl PreviewError {
    /// Check if this error came from loading the sandbox.
    pub fn is_load(&self) -> bool {
        matches!(self, PreviewError::Load(_))
    }

    /// Check if this error names a template that does not exist.
    pub fn is_unknown_template(&self) -> bool {
        matches!(self, PreviewError::UnknownTemplate(_))
    }
}

/// Result type alias for preview operations.
pub type Result<T> = std::result::Result<T, PreviewError>;

/// A script error as reported by the sandboxed runtime.
///
/// The runtime stringifies errors as `Name: message` (or just `Name` when the
/// message is empty); this is the decoded form of that string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    /// The error constructor name, e.g. `TypeError` or `SyntaxError`.
    pub name: String,
    /// The error message. Empty when the runtime reported none.
    pub message: String,
}

impl RuntimeError {
    /// Whether the transpiler rejected the source before it ran.
    pub fn is_syntax_error(&self) -> bool {
        self.name == "SyntaxError"
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

/// Parse a stringified runtime error.
///
/// Returns `None` when the text does not start with something that looks
/// like an error constructor name, e.g. a thrown plain string.
pub fn parse_runtime_error(text: &str) -> Option<RuntimeError> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (head, message) = match text.split_once(':') {
        Some((head, rest)) => (head.trim(), rest.trim()),
        None => (text, ""),
    };

    if !looks_like_error_name(head) {
        return None;
    }

    Some(RuntimeError {
        name: head.to_string(),
        message: message.to_string(),
    })
}

/// Check if a token looks like an error constructor name.
fn looks_like_error_name(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    if !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        return false;
    }

    token.ends_with("Error") || token.ends_with("Exception") || token == "InternalError"
}
