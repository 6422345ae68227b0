mod descriptor;
mod kind;
mod kwargs;

pub use descriptor::{ConnectionSpec, SourceDescriptor};
pub use kind::SourceKind;
pub use kwargs::{merge_kwargs, Kwargs};
