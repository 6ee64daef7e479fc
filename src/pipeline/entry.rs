//! Entry-point resolution.
//!
//! The bootstrap always mounts `<App />`. Bare snippets define `App`
//! themselves; module-style snippets export some other component by default,
//! so the export is dropped and an `App` wrapper rendering it is appended.

use std::sync::LazyLock;

use regex::Regex;

static EXPORT_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bexport\s+default\b").expect("export pattern is valid"));

/// `export default function Name` / `export default class Name`.
static EXPORT_DEFAULT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+default\s+((?:async\s+)?function\*?|class)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("export declaration pattern is valid")
});

/// `export default Name;`, where the identifier ends the statement.
static EXPORT_DEFAULT_IDENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\bexport\s+default\s+([A-Za-z_$][A-Za-z0-9_$]*)[ \t]*(?:;|$)")
        .expect("export identifier pattern is valid")
});

/// Words that can follow `export default` without naming a binding.
const NON_BINDING_WORDS: &[&str] = &[
    "function", "class", "async", "new", "await", "typeof", "void", "this", "null", "true",
    "false", "undefined",
];

/// The name the assembled document mounts.
pub const ENTRY_COMPONENT: &str = "App";

/// How the entry component was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// No default export; the source is expected to define `App` itself.
    Bare,
    /// A default export named `name` was unwrapped.
    Exported {
        /// The exported component.
        name: String,
    },
    /// A default export is present but no component name could be found.
    /// The source is passed through unchanged.
    Unresolved,
}

/// Source ready for the bootstrap, plus how its entry point was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The code to inject.
    pub code: String,
    /// Resolution outcome.
    pub entry: EntryPoint,
}

/// Rewrite `source` so that it defines a callable `App`.
pub fn resolve_entry(source: &str) -> ResolvedSource {
    if !EXPORT_DEFAULT.is_match(source) {
        return ResolvedSource {
            code: source.to_string(),
            entry: EntryPoint::Bare,
        };
    }

    let Some((code, name)) = unwrap_export(source) else {
        return ResolvedSource {
            code: source.to_string(),
            entry: EntryPoint::Unresolved,
        };
    };

    let code = if name == ENTRY_COMPONENT {
        code
    } else {
        format!("{code}\n\nfunction {ENTRY_COMPONENT}() {{ return <{name} />; }}")
    };

    ResolvedSource {
        code,
        entry: EntryPoint::Exported { name },
    }
}

/// Drop the default export and return the remaining code with the exported name.
fn unwrap_export(source: &str) -> Option<(String, String)> {
    // `export default function Foo() {}` keeps its declaration.
    if let Some(caps) = EXPORT_DEFAULT_DECLARATION.captures(source) {
        let whole = caps.get(0)?;
        let keyword = caps.get(1)?;
        let name = caps.get(2)?.as_str().to_string();
        let code = format!("{}{}", &source[..whole.start()], &source[keyword.start()..]);
        return Some((code, name));
    }

    // `export default Foo;` is removed outright.
    if let Some(caps) = EXPORT_DEFAULT_IDENT.captures(source) {
        let name = caps.get(1)?.as_str();
        if !NON_BINDING_WORDS.contains(&name) {
            let whole = caps.get(0)?;
            let code = format!("{}{}", &source[..whole.start()], &source[whole.end()..]);
            return Some((code, name.to_string()));
        }
    }

    // Anonymous exports and other expressions have no name to mount.
    None
}
