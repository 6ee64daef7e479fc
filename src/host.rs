//! Host-side preview state.
//!
//! The host owns the editor text, the text currently shown in the sandbox,
//! the error display and a queue of user-facing notifications. Every change
//! of the displayed text triggers exactly one reload: assemble, write the
//! sandbox, clear the error. A detached sandbox skips the whole sequence and
//! leaves the error display alone. Failures in that sequence are shown right
//! away; failures inside the sandbox arrive later through
//! [`handle_message`](PreviewHost::handle_message).

use serde_json::Value;

use crate::channel::{decode_message, CompileError};
use crate::error::{PreviewError, Result};
use crate::pipeline::compile;
use crate::sandbox::config::PreviewConfig;
use crate::sandbox::loader::{load, LoadOutcome};
use crate::sandbox::Sandbox;
use crate::templates::TemplateLibrary;

/// What the preview pane shows in place of (or on top of) the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ErrorDisplay {
    /// No error.
    #[default]
    Clear,
    /// The most recent error text.
    Showing(String),
}

impl ErrorDisplay {
    /// Check if an error is showing.
    pub fn is_showing(&self) -> bool {
        matches!(self, ErrorDisplay::Showing(_))
    }

    /// The error text, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorDisplay::Clear => None,
            ErrorDisplay::Showing(message) => Some(message),
        }
    }
}

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational.
    Default,
    /// Something went wrong.
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Visual weight.
    pub kind: NotificationKind,
}

impl Notification {
    fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            kind: NotificationKind::Default,
        }
    }

    fn destructive(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            kind: NotificationKind::Destructive,
        }
    }
}

/// The live preview host, generic over the sandbox it drives.
#[derive(Debug)]
pub struct PreviewHost<S> {
    config: PreviewConfig,
    sandbox: S,
    code: String,
    display_code: String,
    selected_template: String,
    auto_compile: bool,
    error: ErrorDisplay,
    notifications: Vec<Notification>,
    loads: u64,
}

impl<S: Sandbox> PreviewHost<S> {
    /// Create a host showing the configured default template.
    ///
    /// Nothing is loaded until [`mount`](Self::mount) is called.
    pub fn new(config: PreviewConfig, sandbox: S) -> Result<Self> {
        config.validate()?;
        let template = TemplateLibrary::global()
            .get(&config.default_template)
            .ok_or_else(|| PreviewError::UnknownTemplate(config.default_template.clone()))?;

        Ok(Self {
            auto_compile: config.auto_compile,
            code: template.source.to_string(),
            display_code: template.source.to_string(),
            selected_template: template.key.to_string(),
            config,
            sandbox,
            error: ErrorDisplay::Clear,
            notifications: Vec::new(),
            loads: 0,
        })
    }

    /// Load the displayed source for the first time.
    pub fn mount(&mut self) {
        self.reload();
    }

    /// Replace the editor text. Recompiles when auto-compile is on.
    pub fn edit(&mut self, code: impl Into<String>) {
        self.code = code.into();
        if self.auto_compile {
            self.show(self.code.clone());
        }
    }

    /// Handle pasted text.
    ///
    /// Text containing both `import` and `from` replaces the editor content
    /// and is announced; returns `false` for anything else, which the caller
    /// handles as an ordinary edit.
    pub fn paste(&mut self, text: &str) -> bool {
        if !(text.contains("import") && text.contains("from")) {
            return false;
        }
        self.edit(text);
        self.notify(Notification::info(
            "Code Pasted",
            "Imports detected and will be handled automatically.",
        ));
        true
    }

    /// Show the current editor text in the sandbox.
    pub fn compile(&mut self) {
        self.show(self.code.clone());
        self.notify(Notification::info(
            "Code Compiled",
            "Your code has been compiled and is now running in the preview.",
        ));
    }

    /// Reset the editor to a bundled template.
    pub fn select_template(&mut self, key: &str) -> Result<()> {
        let template = TemplateLibrary::global()
            .get(key)
            .ok_or_else(|| PreviewError::UnknownTemplate(key.to_string()))?;
        self.selected_template = template.key.to_string();
        self.edit(template.source);
        Ok(())
    }

    /// Flip auto-compile and return the new setting.
    pub fn toggle_auto_compile(&mut self) -> bool {
        self.auto_compile = !self.auto_compile;
        let notification = if self.auto_compile {
            Notification::info(
                "Auto-Compile Enabled",
                "Your code will automatically compile as you type.",
            )
        } else {
            Notification::info(
                "Auto-Compile Disabled",
                "You'll need to manually compile your code now.",
            )
        };
        self.notify(notification);
        self.auto_compile
    }

    /// Feed a message posted by the sandbox. Returns whether it was a
    /// compile error.
    pub fn handle_message(&mut self, data: &Value) -> bool {
        match decode_message(data) {
            Some(error) => {
                self.report(error);
                true
            }
            None => false,
        }
    }

    /// Show a compile error reported by the sandbox, replacing any previous one.
    pub fn report(&mut self, error: CompileError) {
        self.error = ErrorDisplay::Showing(error.error);
    }

    /// Current editor text.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Text currently loaded into the sandbox.
    pub fn display_code(&self) -> &str {
        &self.display_code
    }

    /// Key of the last selected template.
    pub fn selected_template(&self) -> &str {
        &self.selected_template
    }

    /// Whether edits recompile immediately.
    pub fn auto_compile(&self) -> bool {
        self.auto_compile
    }

    /// Current error display.
    pub fn error(&self) -> &ErrorDisplay {
        &self.error
    }

    /// Number of documents actually written into the sandbox.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// The sandbox this host drives.
    pub fn sandbox(&self) -> &S {
        &self.sandbox
    }

    /// Mutable access to the sandbox, e.g. to attach it.
    pub fn sandbox_mut(&mut self) -> &mut S {
        &mut self.sandbox
    }

    /// The host configuration.
    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Take all queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn show(&mut self, code: String) {
        if code == self.display_code {
            return;
        }
        self.display_code = code;
        self.reload();
    }

    fn reload(&mut self) {
        let document = compile(&self.display_code, &self.config);
        match load(&mut self.sandbox, &document) {
            Ok(LoadOutcome::Loaded) => {
                self.error = ErrorDisplay::Clear;
                self.loads += 1;
            }
            // nothing was replaced, so the shown error still describes the frame
            Ok(LoadOutcome::Detached) => {}
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, "failed to update preview");
                self.error = ErrorDisplay::Showing(err.to_string());
                self.notify(Notification::destructive(
                    "Compilation Error",
                    "There was an error compiling your code.",
                ));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
