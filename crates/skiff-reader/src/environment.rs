use std::collections::HashMap;
use std::sync::Arc;

use skiff_common::config::AppConfig;

use crate::backend::EngineBackend;
use crate::error::{ReaderError, ReaderResult};
use crate::function::{FunctionRegistry, FunctionResolver};
use crate::packages::PackageOracle;

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Host-provided surroundings of the dispatch core: the function resolver,
/// the package-availability oracle, registered engine backends, and the
/// preview row bound.
pub struct Environment {
    functions: Arc<dyn FunctionResolver>,
    packages: Arc<dyn PackageOracle>,
    engines: HashMap<String, Arc<dyn EngineBackend>>,
    preview_rows: usize,
}

impl Environment {
    /// An environment whose function bindings and package availability both
    /// come from the given registry.
    pub fn new(registry: Arc<FunctionRegistry>) -> Self {
        Self {
            functions: registry.clone(),
            packages: registry,
            engines: HashMap::new(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    /// Replace the package oracle, keeping function resolution as is.
    pub fn with_packages(mut self, packages: Arc<dyn PackageOracle>) -> Self {
        self.packages = packages;
        self
    }

    pub fn with_engine(mut self, name: impl Into<String>, backend: Arc<dyn EngineBackend>) -> Self {
        self.engines.insert(name.into(), backend);
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn with_config(self, config: &AppConfig) -> Self {
        self.with_preview_rows(config.preview.row_limit)
    }

    pub fn functions(&self) -> &dyn FunctionResolver {
        self.functions.as_ref()
    }

    /// Whether the named package is available. Registered engine backends
    /// count as their package.
    pub fn has_package(&self, name: &str) -> bool {
        self.packages.has_package(name) || self.engines.contains_key(name)
    }

    pub fn engine(&self, name: &str) -> ReaderResult<Arc<dyn EngineBackend>> {
        self.engines
            .get(name)
            .cloned()
            .ok_or_else(|| ReaderError::resolution(format!("{name}:connect")))
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::StaticPackageOracle;

    #[test]
    fn test_environment_defaults() {
        let env = Environment::new(Arc::new(FunctionRegistry::new()));
        assert_eq!(env.preview_rows(), DEFAULT_PREVIEW_ROWS);
        assert!(!env.has_package("polars"));
    }

    #[test]
    fn test_package_override() {
        let env = Environment::new(Arc::new(FunctionRegistry::new()))
            .with_packages(Arc::new(StaticPackageOracle::new(["polars"])));
        assert!(env.has_package("polars"));
        assert!(!env.has_package("duckdb"));
    }

    #[test]
    fn test_missing_engine_is_resolution_error() {
        let env = Environment::new(Arc::new(FunctionRegistry::new()));
        assert!(matches!(
            env.engine("duckdb"),
            Err(ReaderError::Resolution(_))
        ));
    }
}
