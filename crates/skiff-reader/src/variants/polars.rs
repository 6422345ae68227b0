use serde_json::json;
use skiff_source::{Kwargs, SourceDescriptor, SourceKind};

use crate::artifact::ArtifactRef;
use crate::capability::Capability;
use crate::environment::Environment;
use crate::error::{ReaderError, ReaderResult};
use crate::function::FuncRef;
use crate::reader::{FuncReader, Reader, ReaderVariant};

const URL_PARAM: &str = "path";

/// Parquet via the polars dataframe engine.
///
/// The backend load function accepts a file list natively, so the variant
/// declares no concat function and multi-file sources are loaded in one
/// call against the primary URL.
#[derive(Debug)]
pub struct PolarsParquetVariant {
    capability: Capability,
}

impl PolarsParquetVariant {
    pub fn new() -> Self {
        Self {
            capability: Capability {
                implements: &[SourceKind::Parquet],
                requires: &["polars"],
                optional: &["parquet2", "object-store"],
                load_func: FuncRef::Named("polars:read_parquet"),
                concat_func: None,
                url_param: Some(URL_PARAM),
                needs_storage_options: true,
                output_instance: "polars:DataFrame",
            },
        }
    }
}

impl Default for PolarsParquetVariant {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderVariant for PolarsParquetVariant {
    fn name(&self) -> &'static str {
        "polars-parquet"
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn create_reader<'a>(
        &'a self,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> ReaderResult<Box<dyn Reader + 'a>> {
        Ok(Box::new(FuncReader::new(&self.capability, env, source)))
    }
}

/// Delimited text via the polars dataframe engine. Multi-file sources are
/// merged with the backend's concat function in file-list order.
#[derive(Debug)]
pub struct PolarsCsvVariant {
    capability: Capability,
}

impl PolarsCsvVariant {
    pub fn new() -> Self {
        Self {
            capability: Capability {
                implements: &[SourceKind::Csv],
                requires: &["polars"],
                optional: &[],
                load_func: FuncRef::Named("polars:read_csv"),
                concat_func: Some(FuncRef::Named("polars:concat")),
                url_param: Some(URL_PARAM),
                needs_storage_options: false,
                output_instance: "polars:DataFrame",
            },
        }
    }
}

impl Default for PolarsCsvVariant {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderVariant for PolarsCsvVariant {
    fn name(&self) -> &'static str {
        "polars-csv"
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn create_reader<'a>(
        &'a self,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> ReaderResult<Box<dyn Reader + 'a>> {
        Ok(Box::new(PolarsCsvReader {
            inner: FuncReader::new(&self.capability, env, source),
            env,
            source,
        }))
    }
}

struct PolarsCsvReader<'a> {
    inner: FuncReader<'a>,
    env: &'a Environment,
    source: &'a SourceDescriptor,
}

impl Reader for PolarsCsvReader<'_> {
    fn load(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        self.inner.load(overrides)
    }

    /// Preview by asking the backend for the first rows of the first file,
    /// instead of loading everything and truncating.
    fn preview(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        let file = self
            .source
            .files()
            .first()
            .ok_or_else(|| ReaderError::missing("file list for CSV preview"))?;
        let mut kw = Kwargs::from([
            ("n_rows".to_string(), json!(self.env.preview_rows())),
            (URL_PARAM.to_string(), json!(file)),
        ]);
        kw.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.inner.load(&kw)
    }
}
