use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use skiff_source::Kwargs;

use crate::artifact::ArtifactRef;
use crate::error::{BackendError, ReaderError, ReaderResult};
use crate::packages::PackageOracle;

/// A backend load function: keyword arguments in, opaque artifact out.
pub type LoadFn = Arc<dyn Fn(&Kwargs) -> Result<ArtifactRef, BackendError> + Send + Sync>;

/// A backend concatenation function merging per-file artifacts in order.
pub type ConcatFn = Arc<dyn Fn(Vec<ArtifactRef>) -> Result<ArtifactRef, BackendError> + Send + Sync>;

/// Reference to a backend function: either an already-bound callable, or a
/// `"package:function"` name resolved on first use so that naming a backend
/// never loads it.
#[derive(Clone)]
pub enum FuncRef<F> {
    Bound(F),
    Named(&'static str),
}

pub type LoadRef = FuncRef<LoadFn>;
pub type ConcatRef = FuncRef<ConcatFn>;

impl<F> FuncRef<F> {
    pub fn name(&self) -> Option<&'static str> {
        match self {
            FuncRef::Bound(_) => None,
            FuncRef::Named(name) => Some(name),
        }
    }
}

impl<F> fmt::Debug for FuncRef<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuncRef::Bound(_) => f.write_str("FuncRef::Bound(..)"),
            FuncRef::Named(name) => write!(f, "FuncRef::Named({name:?})"),
        }
    }
}

impl LoadRef {
    pub fn resolve(&self, resolver: &dyn FunctionResolver) -> ReaderResult<LoadFn> {
        match self {
            FuncRef::Bound(func) => Ok(func.clone()),
            FuncRef::Named(name) => resolver.load_function(name),
        }
    }
}

impl ConcatRef {
    pub fn resolve(&self, resolver: &dyn FunctionResolver) -> ReaderResult<ConcatFn> {
        match self {
            FuncRef::Bound(func) => Ok(func.clone()),
            FuncRef::Named(name) => resolver.concat_function(name),
        }
    }
}

/// Name-to-callable resolution seam. Unknown names fail with
/// [`ReaderError::Resolution`]; resolving a name must not run backend code.
pub trait FunctionResolver: Send + Sync {
    fn load_function(&self, name: &str) -> ReaderResult<LoadFn>;
    fn concat_function(&self, name: &str) -> ReaderResult<ConcatFn>;

    /// Documentation registered alongside a binding, if any.
    fn doc(&self, name: &str) -> Option<String>;
}

/// The standard resolver: function bindings registered by the host at
/// startup, keyed by `"package:function"` name.
#[derive(Default)]
pub struct FunctionRegistry {
    load: HashMap<String, LoadFn>,
    concat: HashMap<String, ConcatFn>,
    docs: HashMap<String, String>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_load(&mut self, name: impl Into<String>, func: LoadFn) {
        self.load.insert(name.into(), func);
    }

    pub fn register_concat(&mut self, name: impl Into<String>, func: ConcatFn) {
        self.concat.insert(name.into(), func);
    }

    pub fn register_doc(&mut self, name: impl Into<String>, doc: impl Into<String>) {
        self.docs.insert(name.into(), doc.into());
    }
}

impl FunctionResolver for FunctionRegistry {
    fn load_function(&self, name: &str) -> ReaderResult<LoadFn> {
        self.load
            .get(name)
            .cloned()
            .ok_or_else(|| ReaderError::resolution(name))
    }

    fn concat_function(&self, name: &str) -> ReaderResult<ConcatFn> {
        self.concat
            .get(name)
            .cloned()
            .ok_or_else(|| ReaderError::resolution(name))
    }

    fn doc(&self, name: &str) -> Option<String> {
        self.docs.get(name).cloned()
    }
}

fn package_of(name: &str) -> &str {
    name.split(':').next().unwrap_or(name)
}

impl PackageOracle for FunctionRegistry {
    /// A package counts as available when the host has registered at least
    /// one binding under its namespace.
    fn has_package(&self, name: &str) -> bool {
        self.load.keys().any(|k| package_of(k) == name)
            || self.concat.keys().any(|k| package_of(k) == name)
    }
}
