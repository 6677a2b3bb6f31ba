//! Error types for the BibTeX codec.
//!
//! Import failures are local to a single entry: `import_all` reports one
//! result per entry and never aborts the batch. Export is infallible for a
//! well-formed [`Publication`](crate::Publication) because the family set is
//! a closed enum matched exhaustively.

use thiserror::Error;

/// Which external directory a name was searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Journal,
    Conference,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ReferenceKind::Journal => "journal",
            ReferenceKind::Conference => "conference",
        })
    }
}

/// Failure while turning one BibTeX entry into a [`Publication`](crate::Publication).
///
/// Every variant names the offending entry so a caller aggregating a batch
/// can report failures per record.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported BibTeX entry type: {entry_type}")]
    UnsupportedEntryType { entry_type: String },

    #[error("Missing year for entry: {key}")]
    MissingYear { key: String },

    #[error("Invalid year \"{value}\" for entry: {key}")]
    InvalidYear { key: String, value: String },

    #[error("Field '{field}' is required for entry: {key}")]
    MissingField { key: String, field: &'static str },

    #[error("No {kind} found with name \"{name}\" for entry: {key}")]
    UnresolvedReference {
        key: String,
        kind: ReferenceKind,
        name: String,
    },

    #[error("No author for entry: {key}")]
    NoAuthors { key: String },

    #[error("TeX macro error in entry {key}: {source}")]
    Tex {
        key: String,
        #[source]
        source: TexError,
    },
}

/// Failure while resolving TeX macros to plain text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TexError {
    #[error("Unable to resolve TeX macros in: \"{text}\"")]
    MalformedMacro { text: String },
}
