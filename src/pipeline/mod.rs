//! Pure source-to-document stages.
//!
//! Nothing here touches a sandbox: the same source and configuration always
//! produce the same document.

pub mod document;
pub mod entry;
pub mod imports;
pub mod shim;

use crate::sandbox::config::PreviewConfig;

use self::document::{assemble, AssembledDocument};
use self::entry::resolve_entry;
use self::imports::{extract_imports, strip_imports};

/// Run normalization, entry resolution and assembly on `source`.
pub fn compile(source: &str, config: &PreviewConfig) -> AssembledDocument {
    let imports = extract_imports(source);
    let normalized = strip_imports(source);
    let resolved = resolve_entry(&normalized);
    assemble(&resolved, &imports, config)
}
