use std::cell::RefCell;
use std::sync::Arc;

use skiff_source::{Kwargs, SourceDescriptor, SourceKind};

use crate::artifact::{ArtifactRef, Relation};
use crate::backend::EngineConnection;
use crate::capability::Capability;
use crate::environment::Environment;
use crate::error::{ReaderError, ReaderResult};
use crate::function::FuncRef;
use crate::reader::{Reader, ReaderVariant};

const ENGINE: &str = "duckdb";

/// All four source kinds through the embedded duckdb engine.
///
/// The SQL text is selected by the descriptor's kind; query sources pass
/// their text through verbatim. Results are lazily bound relations: the
/// reader instance keeps the connection alive, so callers must not outlive
/// it while still holding an artifact.
#[derive(Debug)]
pub struct DuckDbVariant {
    capability: Capability,
}

impl DuckDbVariant {
    pub fn new() -> Self {
        Self {
            capability: Capability {
                implements: &[
                    SourceKind::Parquet,
                    SourceKind::Csv,
                    SourceKind::Json,
                    SourceKind::Query,
                ],
                requires: &["duckdb"],
                optional: &[],
                load_func: FuncRef::Named("duckdb:connect"),
                concat_func: None,
                url_param: None,
                needs_storage_options: false,
                output_instance: "duckdb:Relation",
            },
        }
    }
}

impl Default for DuckDbVariant {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderVariant for DuckDbVariant {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn create_reader<'a>(
        &'a self,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> ReaderResult<Box<dyn Reader + 'a>> {
        Ok(Box::new(EngineReader::new(ENGINE, env, source)))
    }
}

/// Reader executing engine queries over a cached connection.
///
/// The connection is opened on first use and owned exclusively by this
/// instance; interior mutability keeps the instance single-threaded, which
/// matches the engine's connection contract.
pub(crate) struct EngineReader<'a> {
    engine: &'static str,
    env: &'a Environment,
    source: &'a SourceDescriptor,
    connection: RefCell<Option<Arc<dyn EngineConnection>>>,
}

impl<'a> EngineReader<'a> {
    pub(crate) fn new(
        engine: &'static str,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> Self {
        Self {
            engine,
            env,
            source,
            connection: RefCell::new(None),
        }
    }

    fn connection(&self) -> ReaderResult<Arc<dyn EngineConnection>> {
        if let Some(connection) = self.connection.borrow().as_ref() {
            return Ok(connection.clone());
        }
        let backend = self.env.engine(self.engine)?;
        let connection = backend.connect(self.source.connection())?;
        *self.connection.borrow_mut() = Some(connection.clone());
        Ok(connection)
    }

    pub(crate) fn relation(&self) -> ReaderResult<Box<dyn Relation>> {
        let sql = engine_query(self.source)?;
        let connection = self.connection()?;
        log::debug!("engine query: {sql}");
        Ok(connection.query(&sql)?)
    }

    pub(crate) fn preview_rows(&self) -> usize {
        self.env.preview_rows()
    }
}

impl Reader for EngineReader<'_> {
    fn load(&self, _overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        Ok(self.relation()?.into_artifact())
    }

    fn preview(&self, _overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        Ok(self
            .relation()?
            .limit(self.preview_rows())?
            .into_artifact())
    }
}

fn engine_query(source: &SourceDescriptor) -> ReaderResult<String> {
    let url = || {
        source
            .url()
            .map(quote_literal)
            .ok_or_else(|| ReaderError::missing("source URL for engine query"))
    };
    let sql = match source.kind() {
        SourceKind::Parquet => format!("SELECT * FROM read_parquet('{}')", url()?),
        SourceKind::Csv => format!("SELECT * FROM read_csv_auto('{}')", url()?),
        SourceKind::Json => format!("SELECT * FROM read_json_auto('{}')", url()?),
        SourceKind::Query => source
            .query_text()
            .ok_or_else(|| ReaderError::missing("query text for engine query"))?
            .to_string(),
    };
    Ok(sql)
}

/// Double single quotes so a URL can sit inside a SQL string literal.
fn quote_literal(url: &str) -> String {
    url.replace('\'', "''")
}

/// Dataframes via the embedded duckdb engine: loads through the engine
/// reader and converts the relation into the polars representation. The
/// composition is invisible to recommendation, which only sees this
/// variant's own capability.
#[derive(Debug)]
pub struct DuckDbPolarsVariant {
    capability: Capability,
}

impl DuckDbPolarsVariant {
    pub fn new() -> Self {
        Self {
            capability: Capability {
                implements: &[
                    SourceKind::Parquet,
                    SourceKind::Csv,
                    SourceKind::Json,
                    SourceKind::Query,
                ],
                requires: &["duckdb", "polars"],
                optional: &[],
                load_func: FuncRef::Named("duckdb:connect"),
                concat_func: None,
                url_param: None,
                needs_storage_options: false,
                output_instance: "polars:DataFrame",
            },
        }
    }
}

impl Default for DuckDbPolarsVariant {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderVariant for DuckDbPolarsVariant {
    fn name(&self) -> &'static str {
        "duckdb-polars"
    }

    fn capability(&self) -> &Capability {
        &self.capability
    }

    fn create_reader<'a>(
        &'a self,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> ReaderResult<Box<dyn Reader + 'a>> {
        Ok(Box::new(DuckDbPolarsReader {
            inner: EngineReader::new(ENGINE, env, source),
        }))
    }
}

struct DuckDbPolarsReader<'a> {
    inner: EngineReader<'a>,
}

impl Reader for DuckDbPolarsReader<'_> {
    fn load(&self, _overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        Ok(self.inner.relation()?.to_frame()?)
    }

    fn preview(&self, _overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        let rows = self.inner.preview_rows();
        Ok(self.inner.relation()?.limit(rows)?.to_frame()?)
    }
}
