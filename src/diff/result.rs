use super::context::DiffContext;
use serde::Serialize;
use std::fmt;

/// How a node changed between the previous and the actual document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiffKind {
    Added,
    Removed,
    Modified,
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKind::Added => write!(f, "Added"),
            DiffKind::Removed => write!(f, "Removed"),
            DiffKind::Modified => write!(f, "Modified"),
        }
    }
}

/// One reported difference: what changed, where, and a human-readable note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffResult {
    pub kind: DiffKind,
    pub context: DiffContext,
    pub message: Option<String>,
}

impl DiffResult {
    pub fn new(kind: DiffKind, context: DiffContext) -> Self {
        DiffResult {
            kind,
            context,
            message: None,
        }
    }

    pub fn with_message(kind: DiffKind, context: DiffContext, message: impl Into<String>) -> Self {
        DiffResult {
            kind,
            context,
            message: Some(message.into()),
        }
    }
}

/// Failure of a comparison as a whole.
///
/// Data asymmetry between the two documents is never an error; these cover
/// configurations the engine refuses to compare and broken collaborator
/// contracts. Any of them aborts the comparison without a partial result.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffError {
    /// Both path items declare shared route-level parameters. Comparing them
    /// correctly would require merging the shared set into every operation's
    /// own parameters first, which this engine does not implement.
    SharedPathParameters {
        route: String,
    },
    /// An enum constant list holds a value kind outside
    /// string/integer/long/double.
    UnsupportedEnumValue {
        context: DiffContext,
    },
    /// A `$ref` did not resolve inside its own document.
    UnresolvedReference {
        ref_path: String,
    },
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffError::SharedPathParameters { route } => {
                write!(
                    f,
                    "route '{}' declares shared parameters on both sides; \
                    shared route-level parameters are not supported",
                    route
                )
            }
            DiffError::UnsupportedEnumValue { context } => {
                write!(
                    f,
                    "enum constant type is not supported at [{}]; \
                    only string, integer, long and double constants can be compared",
                    context
                )
            }
            DiffError::UnresolvedReference { ref_path } => {
                write!(f, "schema reference '{}' does not resolve", ref_path)
            }
        }
    }
}

impl std::error::Error for DiffError {}
