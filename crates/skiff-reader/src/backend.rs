use std::sync::Arc;

use skiff_source::ConnectionSpec;

use crate::artifact::Relation;
use crate::error::BackendError;

/// Live connection to an embedded analytical engine.
///
/// The connection is owned exclusively by the reader instance that opened
/// it and must not be shared across instances or threads. Relations
/// returned by [`EngineConnection::query`] remain bound to the connection
/// for as long as they are held.
pub trait EngineConnection {
    fn query(&self, sql: &str) -> Result<Box<dyn Relation>, BackendError>;
}

/// Factory for engine connections, registered by the host per engine
/// package name. The core never opens a connection until a load or preview
/// actually runs.
pub trait EngineBackend: Send + Sync {
    fn connect(&self, spec: Option<&ConnectionSpec>)
        -> Result<Arc<dyn EngineConnection>, BackendError>;
}
