use std::collections::HashMap;
use std::sync::Arc;

use skiff_source::SourceDescriptor;

use crate::environment::Environment;
use crate::error::{ReaderError, ReaderResult};
use crate::reader::ReaderVariant;
use crate::variants::{
    ArrowParquetVariant, DataFusionParquetVariant, DuckDbPolarsVariant, DuckDbVariant,
    PolarsCsvVariant, PolarsParquetVariant,
};

/// Explicit table of registered reader variants, keyed by variant name.
/// Registering a variant under an existing name replaces it.
#[derive(Default)]
pub struct ReaderRegistry {
    variants: HashMap<String, Arc<dyn ReaderVariant>>,
}

impl ReaderRegistry {
    /// A registry populated with the built-in variants.
    pub fn new() -> Self {
        let mut registry = Self::default();

        registry.register_variant(Arc::new(PolarsParquetVariant::new()));
        registry.register_variant(Arc::new(PolarsCsvVariant::new()));
        registry.register_variant(Arc::new(DataFusionParquetVariant::new()));
        registry.register_variant(Arc::new(ArrowParquetVariant::new()));
        registry.register_variant(Arc::new(DuckDbVariant::new()));
        registry.register_variant(Arc::new(DuckDbPolarsVariant::new()));

        registry
    }

    pub fn register_variant(&mut self, variant: Arc<dyn ReaderVariant>) {
        self.variants.insert(variant.name().to_string(), variant);
    }

    pub fn get_variant(&self, name: &str) -> ReaderResult<Arc<dyn ReaderVariant>> {
        self.variants
            .get(name)
            .cloned()
            .ok_or_else(|| ReaderError::unsupported(format!("no reader variant named: {name}")))
    }

    pub fn variants(&self) -> impl Iterator<Item = &Arc<dyn ReaderVariant>> {
        self.variants.values()
    }

    /// Variants whose capability covers the descriptor's kind; with
    /// `check_packages` set, further restricted to variants whose required
    /// packages are available. The result is unordered, and an empty
    /// registry or an unmatched kind yields an empty result.
    pub fn recommend(
        &self,
        source: &SourceDescriptor,
        check_packages: bool,
        env: &Environment,
    ) -> Vec<Arc<dyn ReaderVariant>> {
        self.variants
            .values()
            .filter(|variant| variant.supports(source.kind()))
            .filter(|variant| !check_packages || variant.check_packages(env))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use skiff_source::SourceKind;

    use super::*;
    use crate::function::FunctionRegistry;

    fn recommended_names(
        registry: &ReaderRegistry,
        source: &SourceDescriptor,
        check_packages: bool,
        env: &Environment,
    ) -> HashSet<&'static str> {
        registry
            .recommend(source, check_packages, env)
            .iter()
            .map(|v| v.name())
            .collect()
    }

    #[test]
    fn test_recommend_matches_implements() {
        let registry = ReaderRegistry::new();
        let env = Environment::new(Arc::new(FunctionRegistry::new()));

        let parquet = SourceDescriptor::new(SourceKind::Parquet, "a.parquet");
        assert_eq!(
            recommended_names(&registry, &parquet, false, &env),
            HashSet::from([
                "polars-parquet",
                "datafusion-parquet",
                "arrow-parquet",
                "duckdb",
                "duckdb-polars",
            ])
        );

        let query = SourceDescriptor::query("SELECT 1");
        assert_eq!(
            recommended_names(&registry, &query, false, &env),
            HashSet::from(["duckdb", "duckdb-polars"])
        );
    }

    #[test]
    fn test_empty_registry_recommends_nothing() {
        let registry = ReaderRegistry::default();
        let env = Environment::new(Arc::new(FunctionRegistry::new()));
        let source = SourceDescriptor::new(SourceKind::Csv, "a.csv");
        assert!(registry.recommend(&source, false, &env).is_empty());
    }

    #[test]
    fn test_recommend_with_package_check() {
        let registry = ReaderRegistry::new();
        // Nothing registered: every variant has missing requirements.
        let env = Environment::new(Arc::new(FunctionRegistry::new()));
        let source = SourceDescriptor::new(SourceKind::Csv, "a.csv");
        assert!(registry.recommend(&source, true, &env).is_empty());
    }

    #[test]
    fn test_get_variant() {
        let registry = ReaderRegistry::new();
        assert_eq!(registry.get_variant("duckdb").unwrap().name(), "duckdb");
        assert!(matches!(
            registry.get_variant("no-such-variant"),
            Err(ReaderError::NotSupported(_))
        ));
    }
}
