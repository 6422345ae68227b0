use skiff_source::{SourceDescriptor, SourceKind};

use crate::capability::Capability;
use crate::environment::Environment;
use crate::error::ReaderResult;
use crate::function::FuncRef;
use crate::reader::{FuncReader, Reader, ReaderVariant};

/// Parquet via the DataFusion query engine, yielding a deferred dataframe.
/// The backend is partition-aware and takes the primary URL directly; no
/// concat function and no cheap preview.
#[derive(Debug)]
pub struct DataFusionParquetVariant {
    capability: Capability,
}

impl DataFusionParquetVariant {
    pub fn new() -> Self {
        Self {
            capability: Capability {
                implements: &[SourceKind::Parquet],
                requires: &["datafusion"],
                optional: &["parquet2", "object-store"],
                load_func: FuncRef::Named("datafusion:read_parquet"),
                concat_func: None,
                url_param: Some("path"),
                needs_storage_options: true,
                output_instance: "datafusion:DataFrame",
            },
        }
    }
}

impl Default for DataFusionParquetVariant {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderVariant for DataFusionParquetVariant {
    fn name(&self) -> &'static str {
        "datafusion-parquet"
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
