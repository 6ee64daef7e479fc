//! Preview configuration with builder pattern.

use crate::error::{PreviewError, Result};
use crate::templates::TemplateLibrary;

/// Configuration for assembling and hosting previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// UI runtime script.
    pub react_url: String,
    /// DOM binding for the UI runtime.
    pub react_dom_url: String,
    /// In-browser transpiler that picks up `text/babel` scripts.
    pub transpiler_url: String,
    /// Utility styling engine.
    pub styling_url: String,
    /// Title of the assembled document.
    pub title: String,
    /// Id of the element the entry component mounts into.
    pub mount_id: String,
    /// Target origin passed to `postMessage` by the sandboxed document.
    pub message_target_origin: String,
    /// Whether edits recompile immediately.
    pub auto_compile: bool,
    /// Template loaded into the editor on startup.
    pub default_template: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            react_url: "https://cdnjs.cloudflare.com/ajax/libs/react/17.0.2/umd/react.development.js"
                .to_string(),
            react_dom_url:
                "https://cdnjs.cloudflare.com/ajax/libs/react-dom/17.0.2/umd/react-dom.development.js"
                    .to_string(),
            transpiler_url:
                "https://cdnjs.cloudflare.com/ajax/libs/babel-standalone/6.26.0/babel.min.js"
                    .to_string(),
            styling_url: "https://cdn.tailwindcss.com".to_string(),
            title: "React Preview".to_string(),
            mount_id: "root".to_string(),
            message_target_origin: "*".to_string(),
            auto_compile: true,
            default_template: "counter".to_string(),
        }
    }
}

impl PreviewConfig {
    /// Create a new builder for PreviewConfig.
    pub fn builder() -> PreviewConfigBuilder {
        PreviewConfigBuilder::default()
    }

    /// Check that the configuration can produce a well-formed document.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("react_url", &self.react_url),
            ("react_dom_url", &self.react_dom_url),
            ("transpiler_url", &self.transpiler_url),
            ("styling_url", &self.styling_url),
        ];
        for (field, url) in urls {
            if url.trim().is_empty() {
                return Err(PreviewError::Config(format!("{field} must not be empty")));
            }
            if url.contains('"') || url.contains('<') || url.contains('>') {
                return Err(PreviewError::Config(format!(
                    "{field} contains characters that cannot appear in an attribute: {url}"
                )));
            }
        }

        if self.mount_id.is_empty()
            || self
                .mount_id
                .chars()
                .any(|c| matches!(c, '"' | '\'' | '<' | '>') || c.is_whitespace())
        {
            return Err(PreviewError::Config(format!(
                "invalid mount id: {:?}",
                self.mount_id
            )));
        }

        if self.title.contains('<') {
            return Err(PreviewError::Config(format!(
                "title must not contain markup: {}",
                self.title
            )));
        }

        if TemplateLibrary::global().get(&self.default_template).is_none() {
            return Err(PreviewError::UnknownTemplate(self.default_template.clone()));
        }

        Ok(())
    }
}

/// Builder for creating PreviewConfig instances.
#[derive(Debug, Clone, Default)]
pub struct PreviewConfigBuilder {
    react_url: Option<String>,
    react_dom_url: Option<String>,
    transpiler_url: Option<String>,
    styling_url: Option<String>,
    title: Option<String>,
    mount_id: Option<String>,
    message_target_origin: Option<String>,
    auto_compile: Option<bool>,
    default_template: Option<String>,
}

impl PreviewConfigBuilder {
    /// Set the UI runtime script location.
    pub fn react_url(mut self, url: impl Into<String>) -> Self {
        self.react_url = Some(url.into());
        self
    }

    /// Set the DOM binding script location.
    pub fn react_dom_url(mut self, url: impl Into<String>) -> Self {
        self.react_dom_url = Some(url.into());
        self
    }

    /// Set the transpiler script location.
    pub fn transpiler_url(mut self, url: impl Into<String>) -> Self {
        self.transpiler_url = Some(url.into());
        self
    }

    /// Set the styling engine script location.
    pub fn styling_url(mut self, url: impl Into<String>) -> Self {
        self.styling_url = Some(url.into());
        self
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the id of the mount point element.
    pub fn mount_id(mut self, id: impl Into<String>) -> Self {
        self.mount_id = Some(id.into());
        self
    }

    /// Set the target origin used when the sandbox reports errors.
    pub fn message_target_origin(mut self, origin: impl Into<String>) -> Self {
        self.message_target_origin = Some(origin.into());
        self
    }

    /// Enable or disable compiling on every edit.
    pub fn auto_compile(mut self, enabled: bool) -> Self {
        self.auto_compile = Some(enabled);
        self
    }

    /// Set the template shown on startup.
    pub fn default_template(mut self, key: impl Into<String>) -> Self {
        self.default_template = Some(key.into());
        self
    }

    /// Build the PreviewConfig.
    pub fn build(self) -> PreviewConfig {
        let default = PreviewConfig::default();
        PreviewConfig {
            react_url: self.react_url.unwrap_or(default.react_url),
            react_dom_url: self.react_dom_url.unwrap_or(default.react_dom_url),
            transpiler_url: self.transpiler_url.unwrap_or(default.transpiler_url),
            styling_url: self.styling_url.unwrap_or(default.styling_url),
            title: self.title.unwrap_or(default.title),
            mount_id: self.mount_id.unwrap_or(default.mount_id),
            message_target_origin: self
                .message_target_origin
                .unwrap_or(default.message_target_origin),
            auto_compile: self.auto_compile.unwrap_or(default.auto_compile),
            default_template: self.default_template.unwrap_or(default.default_template),
        }
    }
}
