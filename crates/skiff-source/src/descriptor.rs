use std::collections::HashMap;

use crate::kind::SourceKind;
use crate::kwargs::Kwargs;

/// Connection parameters for query-style sources.
///
/// An absent database path means an in-memory (or engine-default) database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSpec {
    database: Option<String>,
    options: HashMap<String, String>,
}

impl ConnectionSpec {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            options: HashMap::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }
}

/// Immutable description of a logical data source.
///
/// A descriptor owns a resolved primary URL, the ordered list of constituent
/// file URLs (a singleton for single-file sources), stored load keyword
/// arguments, optional storage options, and, for query-style sources, the
/// query text and connection parameters. Reader instances borrow a
/// descriptor; they never own or mutate it.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    kind: SourceKind,
    url: Option<String>,
    files: Vec<String>,
    kwargs: Kwargs,
    storage_options: Option<Kwargs>,
    query: Option<String>,
    connection: Option<ConnectionSpec>,
}

impl SourceDescriptor {
    /// A file-backed source with the given primary URL.
    /// The file list defaults to the singleton primary URL.
    pub fn new(kind: SourceKind, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            kind,
            files: vec![url.clone()],
            url: Some(url),
            kwargs: Kwargs::new(),
            storage_options: None,
            query: None,
            connection: None,
        }
    }

    /// A query-style source executing the given text verbatim.
    pub fn query(text: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Query,
            url: None,
            files: Vec::new(),
            kwargs: Kwargs::new(),
            storage_options: None,
            query: Some(text.into()),
            connection: None,
        }
    }

    /// Replace the constituent file list. Order is significant: multi-file
    /// loads are concatenated in list order.
    pub fn with_files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    pub fn with_kwargs(mut self, kwargs: Kwargs) -> Self {
        self.kwargs = kwargs;
        self
    }

    pub fn with_storage_options(mut self, options: Kwargs) -> Self {
        self.storage_options = Some(options);
        self
    }

    pub fn with_connection(mut self, connection: ConnectionSpec) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    pub fn storage_options(&self) -> Option<&Kwargs> {
        self.storage_options.as_ref()
    }

    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn connection(&self) -> Option<&ConnectionSpec> {
        self.connection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_file_descriptor_defaults() {
        let source = SourceDescriptor::new(SourceKind::Parquet, "data/a.parquet");
        assert_eq!(source.kind(), SourceKind::Parquet);
        assert_eq!(source.url(), Some("data/a.parquet"));
        assert_eq!(source.files(), ["data/a.parquet".to_string()]);
        assert!(source.kwargs().is_empty());
        assert!(source.query_text().is_none());
    }

    #[test]
    fn test_multi_file_descriptor() {
        let source = SourceDescriptor::new(SourceKind::Csv, "data/")
            .with_files(vec!["data/a.csv".to_string(), "data/b.csv".to_string()])
            .with_kwargs(Kwargs::from([("delimiter".to_string(), json!(";"))]));
        assert_eq!(source.url(), Some("data/"));
        assert_eq!(source.files().len(), 2);
        assert_eq!(source.kwargs().get("delimiter"), Some(&json!(";")));
    }

    #[test]
    fn test_query_descriptor() {
        let source = SourceDescriptor::query("SELECT 1")
            .with_connection(ConnectionSpec::new("analytics.db"));
        assert_eq!(source.kind(), SourceKind::Query);
        assert_eq!(source.query_text(), Some("SELECT 1"));
        assert!(source.url().is_none());
        assert!(source.files().is_empty());
        assert_eq!(
            source.connection().and_then(|c| c.database()),
            Some("analytics.db")
        );
    }
}
