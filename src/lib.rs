//! Structural diff engine for OpenAPI documents.
//!
//! Two documents are walked in lock-step: routes, operations, parameters,
//! request bodies, responses, media types and schemas are matched by key on
//! both sides, and every mismatch becomes one [`diff::DiffResult`] carrying
//! the change kind, the location it happened at, and a human-readable
//! message. Output is deterministic regardless of input ordering, and
//! self-referencing schemas are handled without looping.
//!
//! ```no_run
//! use oasdiff::diff::compare_documents;
//! use oasdiff::spec::load_document;
//!
//! # fn main() -> anyhow::Result<()> {
//! let previous = load_document("api-v1.yaml")?;
//! let actual = load_document("api-v2.yaml")?;
//! for diff in compare_documents(&previous, &actual)? {
//!     println!("{} [{}] {}", diff.kind, diff.context, diff.message.as_deref().unwrap_or(""));
//! }
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod spec;

pub use diff::{compare_documents, DiffContext, DiffError, DiffKind, DiffResult};
pub use spec::{load_document, Document};
