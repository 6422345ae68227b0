use std::any::Any;
use std::fmt::Debug;

use crate::error::BackendError;

/// Opaque handle to a loaded data artifact.
///
/// The concrete shape is backend-defined (dataframe-like, relation-like,
/// array-like); the dispatch core only guarantees that a given variant
/// returns the same handle type across calls with equivalent inputs.
/// Downcast through [`Artifact::as_any`] to recover the backend type.
pub trait Artifact: Debug {
    fn as_any(&self) -> &dyn Any;
}

pub type ArtifactRef = Box<dyn Artifact>;

/// A lazily bound engine result.
///
/// A relation stays bound to the connection that produced it: it is only
/// valid while the reader instance owning that connection is alive. Callers
/// holding a relation (or anything derived from it) must not outlive the
/// reader instance that returned it.
pub trait Relation: Artifact {
    /// A relation restricted to the first `rows` rows, without evaluating
    /// the full result.
    fn limit(&self, rows: usize) -> Result<Box<dyn Relation>, BackendError>;

    /// Materialize the relation into the dataframe representation of a
    /// companion backend.
    fn to_frame(&self) -> Result<ArtifactRef, BackendError>;

    /// The relation as an opaque artifact handle.
    fn into_artifact(self: Box<Self>) -> ArtifactRef;
}
