use skiff_source::SourceKind;

use crate::function::{ConcatRef, LoadRef};

/// Static capability declaration for one reader variant.
///
/// The declaration is inspected during recommendation without touching any
/// backend: `requires` names the packages that must be available for the
/// variant to be usable, `optional` names packages that only unlock extra
/// formats and whose absence is never an error.
#[derive(Debug)]
pub struct Capability {
    /// Source kinds this variant can load.
    pub implements: &'static [SourceKind],
    /// Packages that must be available for the variant to be usable.
    pub requires: &'static [&'static str],
    /// Packages that unlock additional code paths when present.
    pub optional: &'static [&'static str],
    /// The backend load entry point.
    pub load_func: LoadRef,
    /// Concatenation function for multi-file fan-out. Absent when the
    /// backend natively accepts a file list, or when the variant performs
    /// its own multi-file handling.
    pub concat_func: Option<ConcatRef>,
    /// The load function's keyword that accepts a path or URL. Absent for
    /// variants that take no file argument (query-based ones).
    pub url_param: Option<&'static str>,
    /// Whether the descriptor's storage options are injected into the call
    /// under the `storage_options` key.
    pub needs_storage_options: bool,
    /// Artifact type the variant yields. Documentation only, not enforced.
    pub output_instance: &'static str,
}

impl Capability {
    pub fn supports(&self, kind: SourceKind) -> bool {
        self.implements.contains(&kind)
    }
}
