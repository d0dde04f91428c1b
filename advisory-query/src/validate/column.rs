//! The static column tables of the document/advisory store.

use std::fmt;

/// Columns of the plain documents view.
const DOCUMENT_COLUMNS: &[&str] = &[
    "id",
    "latest",
    "tracking_id",
    "version",
    "publisher",
    "current_release_date",
    "initial_release_date",
    "rev_history_length",
    "title",
    "tlp",
    "ssvc",
    "cvss_v2_score",
    "cvss_v3_score",
    "four_cves",
    "critical",
    "comments",
];

/// Columns only available on the advisory-joined view.
const ADVISORY_COLUMNS: &[&str] = &["state", "recent", "versions"];

/// Check whether `field` names a queryable column.
///
/// With `advisory` set, the columns of the advisory-joined view are
/// included. The lookup reads fixed tables and is safe to call from any
/// thread.
#[must_use]
pub fn exists_document_column(field: &str, advisory: bool) -> bool {
    DOCUMENT_COLUMNS.contains(&field) || (advisory && ADVISORY_COLUMNS.contains(&field))
}

/// Recoverable validation failures, reported back to the caller.
///
/// Malformed expression trees are *not* covered here: node invariants
/// are owned by the upstream construction layer, and the compiler does
/// not re-check them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A requested projection is neither an alias nor an allow-listed
    /// column.
    UnknownColumn {
        /// The offending field name.
        field: String,
    },
    /// A requested sort key is neither an alias nor an allow-listed
    /// column.
    UnknownOrderField {
        /// The offending field name.
        field: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn { field } => write!(f, "column {field:?} does not exist"),
            Self::UnknownOrderField { field } => {
                write!(f, "order field {field:?} does not exist")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
