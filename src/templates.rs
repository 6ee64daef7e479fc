//! Bundled starter snippets.

use std::sync::LazyLock;

/// A named source snippet the editor can be reset to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Stable key used to select the template.
    pub key: &'static str,
    /// Human readable label for the template picker.
    pub label: &'static str,
    /// The component source.
    pub source: &'static str,
}

/// Read-only mapping from template key to source.
#[derive(Debug)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

static GLOBAL_LIBRARY: LazyLock<TemplateLibrary> = LazyLock::new(TemplateLibrary::bundled);

impl TemplateLibrary {
    /// The process-wide library of bundled templates.
    pub fn global() -> &'static TemplateLibrary {
        &GLOBAL_LIBRARY
    }

    fn bundled() -> Self {
        Self {
            templates: vec![
                Template {
                    key: "counter",
                    label: "Counter",
                    source: include_str!("../templates/counter.jsx"),
                },
                Template {
                    key: "todoList",
                    label: "Todo List",
                    source: include_str!("../templates/todo_list.jsx"),
                },
                Template {
                    key: "fetchData",
                    label: "Fetch Data",
                    source: include_str!("../templates/fetch_data.jsx"),
                },
                Template {
                    key: "reactEmail",
                    label: "React Email",
                    source: include_str!("../templates/react_email.jsx"),
                },
                Template {
                    key: "loginEmail",
                    label: "Login Email",
                    source: include_str!("../templates/login_email.jsx"),
                },
            ],
        }
    }

    /// Look up a template by key.
    pub fn get(&self, key: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.key == key)
    }

    /// Template keys in picker order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.iter().map(|t| t.key)
    }

    /// All templates in picker order.
    pub fn entries(&self) -> &[Template] {
        &self.templates
    }

    /// Number of bundled templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
