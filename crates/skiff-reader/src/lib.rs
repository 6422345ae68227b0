mod artifact;
mod backend;
mod capability;
mod environment;
mod error;
mod function;
mod packages;
mod reader;
mod registry;
pub mod variants;

pub use artifact::{Artifact, ArtifactRef, Relation};
pub use backend::{EngineBackend, EngineConnection};
pub use capability::Capability;
pub use environment::{Environment, DEFAULT_PREVIEW_ROWS};
pub use error::{BackendError, ReaderError, ReaderResult};
pub use function::{
    ConcatFn, ConcatRef, FuncRef, FunctionRegistry, FunctionResolver, LoadFn, LoadRef,
};
pub use packages::{PackageOracle, StaticPackageOracle};
pub use reader::{FuncReader, Reader, ReaderVariant, STORAGE_OPTIONS_KEY};
pub use registry::ReaderRegistry;
