mod context;
mod document;
mod merge;
mod result;
mod scalar;
mod schema;

pub use context::DiffContext;
pub use document::compare_documents;
pub use result::{DiffError, DiffKind, DiffResult};
