use serde_json::json;
use skiff_source::{Kwargs, SourceDescriptor, SourceKind};

use crate::artifact::ArtifactRef;
use crate::capability::Capability;
use crate::environment::Environment;
use crate::error::ReaderResult;
use crate::function::FuncRef;
use crate::reader::{FuncReader, Reader, ReaderVariant};

/// Parquet into in-memory Arrow record batches.
#[derive(Debug)]
pub struct ArrowParquetVariant {
    capability: Capability,
}

impl ArrowParquetVariant {
    pub fn new() -> Self {
        Self {
            capability: Capability {
                implements: &[SourceKind::Parquet],
                requires: &["arrow", "parquet"],
                optional: &[],
                load_func: FuncRef::Named("arrow:read_parquet"),
                concat_func: Some(FuncRef::Named("arrow:concat_batches")),
                url_param: Some("path"),
                needs_storage_options: false,
                output_instance: "arrow:RecordBatch",
            },
        }
    }
}

impl Default for ArrowParquetVariant {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderVariant for ArrowParquetVariant {
    fn name(&self) -> &'static str {
        "arrow-parquet"
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn create_reader<'a>(
        &'a self,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> ReaderResult<Box<dyn Reader + 'a>> {
        Ok(Box::new(ArrowParquetReader {
            inner: FuncReader::new(&self.capability, env, source),
        }))
    }
}

struct ArrowParquetReader<'a> {
    inner: FuncReader<'a>,
}

impl Reader for ArrowParquetReader<'_> {
    fn load(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        self.inner.load(overrides)
    }

    /// Preview by restricting the read to the first row group.
    fn preview(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        let mut kw = overrides.clone();
        kw.insert("row_groups".to_string(), json!([0]));
        self.inner.load(&kw)
    }
}
