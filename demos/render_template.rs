//! Print the preview document for a bundled template or a source file.
//!
//! Run with: cargo run --example render_template -- counter
//!       or: cargo run --example render_template -- path/to/Component.jsx

use anyhow::Context;
use jsx_live_preview::prelude::*;
use jsx_live_preview::{extract_imports, resolve_entry, strip_imports, TemplateLibrary};

fn main() -> anyhow::Result<()> {
    let arg = std::env::args().nth(1).unwrap_or_else(|| "counter".to_string());

    let source = match TemplateLibrary::global().get(&arg) {
        Some(template) => template.source.to_string(),
        None => std::fs::read_to_string(&arg).with_context(|| {
            format!(
                "{arg} is not a template key or a readable file (templates: {})",
                TemplateLibrary::global().keys().collect::<Vec<_>>().join(", ")
            )
        })?,
    };

    let imports = extract_imports(&source);
    let resolved = resolve_entry(&strip_imports(&source));
    eprintln!("imports removed: {}", imports.len());
    eprintln!("entry point: {:?}", resolved.entry);

    let config = PreviewConfig::default();
    config.validate()?;
    println!("{}", compile(&source, &config));

    Ok(())
}
