//! Textual removal of module imports.
//!
//! The preview runtime provides everything as globals, so `import` lines in
//! pasted component code would only break the script. Matching is a single
//! line-oriented pattern and not a parser: an import whose binding list spans
//! several lines is left in place.

use std::sync::LazyLock;

use regex::Regex;

/// `import <anything> from '<module>'` with an optional semicolon, starting a line.
static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*(import\s+.*?from\s+['"][^'"\n]*?['"][ \t]*;?)"#)
        .expect("import pattern is valid")
});

/// Import statements found in a source, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportDeclarationSet {
    statements: Vec<String>,
}

impl ImportDeclarationSet {
    /// The matched statements.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Number of matched statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if no import statement was found.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The statements joined one per line.
    pub fn joined(&self) -> String {
        self.statements.join("\n")
    }
}

/// Collect every import statement in `source`.
pub fn extract_imports(source: &str) -> ImportDeclarationSet {
    let statements = IMPORT_PATTERN
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    ImportDeclarationSet { statements }
}

/// Remove every import statement from `source`, leaving all other text as is.
pub fn strip_imports(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for m in IMPORT_PATTERN
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
    {
        out.push_str(&source[last..m.start()]);
        last = m.end();
    }
    out.push_str(&source[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_imports_is_identity() {
        let source = "function App() {\n  return <div>important from here</div>;\n}\n";
        assert!(extract_imports(source).is_empty());
        assert_eq!(strip_imports(source), source);
    }

    #[test]
    fn test_single_import() {
        let source = "import React from 'react';\nfunction App() { return <div/>; }";
        let imports = extract_imports(source);
        assert_eq!(imports.statements(), ["import React from 'react';"]);
        assert_eq!(strip_imports(source), "\nfunction App() { return <div/>; }");
    }

    #[test]
    fn test_named_and_double_quoted_imports() {
        let source = concat!(
            "import { useState, useEffect } from \"react\"\n",
            "import * as Email from '@react-email/components';\n",
            "\n",
            "function App() {}\n",
        );
        let imports = extract_imports(source);
        assert_eq!(imports.len(), 2);
        assert_eq!(
            imports.statements()[0],
            "import { useState, useEffect } from \"react\""
        );
        assert_eq!(
            imports.joined(),
            "import { useState, useEffect } from \"react\"\nimport * as Email from '@react-email/components';"
        );
        assert_eq!(strip_imports(source), "\n\n\nfunction App() {}\n");
    }

    #[test]
    fn test_indented_import_keeps_indentation() {
        let source = "  import x from 'y';\nrest";
        assert_eq!(extract_imports(source).statements(), ["import x from 'y';"]);
        assert_eq!(strip_imports(source), "  \nrest");
    }

    #[test]
    fn test_import_not_at_line_start_is_ignored() {
        let source = "const s = \"reimport a from 'b'\";";
        assert!(extract_imports(source).is_empty());
        assert_eq!(strip_imports(source), source);
    }

    #[test]
    fn test_multiline_binding_list_is_not_matched() {
        let source = "import {\n  Body,\n  Text\n} from '@react-email/components';\n";
        assert!(extract_imports(source).is_empty());
        assert_eq!(strip_imports(source), source);
    }
}
