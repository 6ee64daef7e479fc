//! Assembly of the self-contained preview document.

use crate::pipeline::entry::{ResolvedSource, ENTRY_COMPONENT};
use crate::pipeline::imports::ImportDeclarationSet;
use crate::pipeline::shim::render_shim;
use crate::sandbox::config::PreviewConfig;

/// Message type posted by the document when the injected code fails.
pub const COMPILE_ERROR_TYPE: &str = "COMPILE_ERROR";

/// Runtime primitives destructured into the bootstrap scope.
const RUNTIME_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useRef",
    "useCallback",
    "useMemo",
    "useContext",
    "createContext",
];

const BASE_STYLES: &str = "\
      body { margin: 0; padding: 16px; font-family: system-ui, -apple-system, sans-serif; }
      #{mount} { height: 100%; }
      .error { color: red; padding: 8px; border: 1px solid red; border-radius: 4px; margin-top: 8px; background-color: #FEE; }
";

/// A complete HTML document ready to be written into a sandbox.
///
/// Always regenerated as a whole; two documents built from the same source
/// and configuration are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument {
    html: String,
}

impl AssembledDocument {
    /// The document text.
    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.html.len()
    }

    /// Check if the document is empty. Assembled documents never are.
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Consume the document and return its text.
    pub fn into_string(self) -> String {
        self.html
    }
}

impl AsRef<str> for AssembledDocument {
    fn as_ref(&self) -> &str {
        &self.html
    }
}

impl std::fmt::Display for AssembledDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html)
    }
}

/// Build the preview document around `entry`.
///
/// The injected code is placed verbatim inside a `try` block of a
/// `text/babel` script, so the transpiler picks it up once the page has
/// loaded. Failures inside that block render an inline error panel and are
/// posted to the parent frame as `{ type: "COMPILE_ERROR", error }`.
pub fn assemble(
    entry: &ResolvedSource,
    imports: &ImportDeclarationSet,
    config: &PreviewConfig,
) -> AssembledDocument {
    let mut html = String::with_capacity(entry.code.len() + 4096);

    html.push_str("<!DOCTYPE html>\n<html>\n  <head>\n");
    html.push_str("    <meta charset=\"UTF-8\" />\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    html.push_str(&format!("    <title>{}</title>\n", config.title));
    for src in [
        &config.react_url,
        &config.react_dom_url,
        &config.transpiler_url,
        &config.styling_url,
    ] {
        html.push_str(&format!("    <script src=\"{src}\"></script>\n"));
    }
    html.push_str("    <style>\n");
    html.push_str(&BASE_STYLES.replace("{mount}", &config.mount_id));
    html.push_str("    </style>\n  </head>\n  <body>\n");
    html.push_str(&format!("    <div id=\"{}\"></div>\n", config.mount_id));
    html.push_str("    <script type=\"text/babel\">\n");
    html.push_str(&bootstrap(entry, imports, config));
    html.push_str("    </script>\n  </body>\n</html>\n");

    AssembledDocument { html }
}

/// The transpiled bootstrap script.
fn bootstrap(
    entry: &ResolvedSource,
    imports: &ImportDeclarationSet,
    config: &PreviewConfig,
) -> String {
    const INDENT: &str = "      ";
    let mount = format!("document.getElementById({})", js_string(&config.mount_id));
    let mut script = String::new();

    script.push_str(&format!(
        "{INDENT}const {{ {} }} = React;\n\n",
        RUNTIME_HOOKS.join(", ")
    ));
    script.push_str(&render_shim(INDENT));
    script.push('\n');
    script.push_str(&format!(
        "{INDENT}console.log(\"Processed imports:\", {});\n\n",
        js_string(&imports.joined())
    ));

    script.push_str(&format!("{INDENT}try {{\n"));
    script.push_str(&entry.code);
    script.push('\n');
    script.push_str(&format!(
        "\n{INDENT}  ReactDOM.render(<{ENTRY_COMPONENT} />, {mount});\n"
    ));
    script.push_str(&format!("{INDENT}}} catch (error) {{\n"));
    script.push_str(&format!(
        "{INDENT}  ReactDOM.render(\n\
         {INDENT}    <div className=\"error\">\n\
         {INDENT}      <strong>Error:</strong>\n\
         {INDENT}      <pre>{{error.toString()}}</pre>\n\
         {INDENT}    </div>,\n\
         {INDENT}    {mount}\n\
         {INDENT}  );\n"
    ));
    script.push_str(&format!(
        "{INDENT}  window.parent.postMessage({{ type: {}, error: error.toString() }}, {});\n",
        js_string(COMPILE_ERROR_TYPE),
        js_string(&config.message_target_origin)
    ));
    script.push_str(&format!("{INDENT}}}\n"));
    script
}

/// Encode `value` as a JavaScript string literal that is safe inside a
/// `<script>` element.
fn js_string(value: &str) -> String {
    // serde_json never fails on a plain str
    let literal = serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""));
    literal.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compile;
    use crate::pipeline::entry::resolve_entry;

    fn build(source: &str) -> AssembledDocument {
        compile(source, &PreviewConfig::default())
    }

    #[test]
    fn test_document_order() {
        let doc = build("function App() { return <div/>; }");
        let html = doc.as_str();

        let positions = [
            html.find("<meta charset=\"UTF-8\" />").unwrap(),
            html.find("name=\"viewport\"").unwrap(),
            html.find("react.development.js").unwrap(),
            html.find("react-dom.development.js").unwrap(),
            html.find("babel.min.js").unwrap(),
            html.find("cdn.tailwindcss.com").unwrap(),
            html.find(".error {").unwrap(),
            html.find("<div id=\"root\"></div>").unwrap(),
            html.find("<script type=\"text/babel\">").unwrap(),
            html.find("= React;").unwrap(),
            html.find("const { Body, Button").unwrap(),
            html.find("try {").unwrap(),
            html.find("function App()").unwrap(),
            html.find("ReactDOM.render(<App />").unwrap(),
            html.find("} catch (error) {").unwrap(),
            html.find("window.parent.postMessage").unwrap(),
        ];
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_error_payload() {
        let html = build("function App() {}").into_string();
        assert!(html.contains(
            "window.parent.postMessage({ type: \"COMPILE_ERROR\", error: error.toString() }, \"*\");"
        ));
        assert!(html.contains("<pre>{error.toString()}</pre>"));
    }

    #[test]
    fn test_source_is_injected_verbatim() {
        let source = "function App() {\n  const s = `</div>`;\n  return <b>{s}</b>;\n}";
        let html = build(source).into_string();
        assert!(html.contains(source));
    }

    #[test]
    fn test_imports_are_logged_not_executed() {
        let source = "import React from 'react';\nfunction App() { return null; }";
        let doc = build(source);
        let html = doc.as_str();
        assert!(html.contains("console.log(\"Processed imports:\", \"import React from 'react';\");"));
        assert_eq!(html.matches("import React").count(), 1);
    }

    #[test]
    fn test_import_log_cannot_close_script() {
        let source = "import x from '</script>';";
        let html = build(source).into_string();
        assert!(html.contains("\"import x from '<\\/script>';\""));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let source = "function App() { return <p>same</p>; }";
        assert_eq!(build(source), build(source));
    }

    #[test]
    fn test_custom_mount_and_origin() {
        let config = PreviewConfig::builder()
            .mount_id("preview")
            .message_target_origin("https://host.example")
            .build();
        let doc = assemble(
            &resolve_entry("function App() {}"),
            &ImportDeclarationSet::default(),
            &config,
        );
        let html = doc.as_str();
        assert!(html.contains("<div id=\"preview\"></div>"));
        assert!(html.contains("#preview { height: 100%; }"));
        assert!(html.contains("document.getElementById(\"preview\")"));
        assert!(html.contains("\"https://host.example\");"));
    }
}
