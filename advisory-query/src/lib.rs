// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // SQL keywords and column names in docs
#![allow(clippy::missing_errors_doc)] // error conditions documented on the error type
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building style preference
#![allow(clippy::must_use_candidate)]

//! # advisory-query - filter-expression compiler for the advisory store
//!
//! Compiles a typed, pre-validated filter-expression tree into
//! parameterized PostgreSQL: a fully parenthesized WHERE predicate, an
//! ordered replacement-value list backing the `$n` placeholders, and
//! complete `SELECT` / `SELECT count(*)` statements against the
//! documents/advisories schema.
//!
//! Two properties hold for every compiled query:
//!
//! - literal values never appear in the SQL text: strings bind through
//!   positional placeholders, deduplicated by value;
//! - column names requested as projections or sort keys are checked
//!   against the schema allow-list before they are embedded.
//!
//! ## Quick Start
//!
//! ```
//! use advisory_query::{advisories, field_eq_string};
//!
//! let mut builder = advisories();
//! builder.create_where(&field_eq_string("publisher", "BSI"));
//!
//! let sql = builder.create_query(&["id", "title"], "", 10, 0);
//! assert!(sql.starts_with("SELECT documents.id,title FROM documents JOIN advisories"));
//! assert!(sql.ends_with("WHERE ((documents.publisher) = ($1)) LIMIT 10"));
//! assert_eq!(builder.replacements(), ["BSI"]);
//! ```
//!
//! ## Visibility scoping
//!
//! The compiler has no concept of identity. The endpoint layer builds a
//! predicate describing what the current principal may see and ANDs it
//! with the user filter before compiling:
//!
//! ```
//! use advisory_query::{documents, and, field_eq_int, field_eq_string};
//!
//! let user_filter = field_eq_int("id", 42);
//! let visibility = field_eq_string("tlp", "WHITE");
//!
//! let mut builder = documents();
//! let clause = builder.create_where(&and(user_filter, visibility));
//! assert_eq!(clause, "(((id) = (42)) AND ((tlp) = ($1)))");
//! ```
//!
//! ## One builder per query
//!
//! A [`SqlBuilder`] owns all state accumulated while compiling one
//! logical query (placeholders, snippet aliases, join flags). Build a
//! fresh one per request; separate instances share nothing and may be
//! used from different threads freely.

mod builder;
mod validate;

pub use builder::{
    and, field_eq_int, field_eq_string, not, or, ArithOp, CompareOp, Constant, Expr, SqlBuilder,
    ValueType,
};
pub use validate::{exists_document_column, ValidationError};

/// Build a query against the plain documents view.
///
/// ```
/// use advisory_query::{documents, field_eq_int};
///
/// let mut builder = documents();
/// builder.create_where(&field_eq_int("id", 1));
/// assert_eq!(
///     builder.create_count_sql(),
///     "SELECT count(*) FROM documents WHERE ((id) = (1))"
/// );
/// ```
#[must_use]
pub fn documents() -> SqlBuilder {
    SqlBuilder::new(false)
}

/// Build a query against the advisory-joined view.
///
/// Advisory mode changes how some logical fields resolve (`comments` is
/// a precomputed column there) and which columns the allow-list admits.
#[must_use]
pub fn advisories() -> SqlBuilder {
    SqlBuilder::new(true)
}

/// Prelude module for convenient imports.
///
/// ```
/// use advisory_query::prelude::*;
///
/// let mut builder = documents();
/// builder.create_where(&field_eq_string("publisher", "BSI"));
/// assert_eq!(builder.replacements(), ["BSI"]);
/// ```
pub mod prelude {
    pub use crate::{
        advisories, and, documents, exists_document_column, field_eq_int, field_eq_string, not,
        or, ArithOp, CompareOp, Constant, Expr, SqlBuilder, ValidationError, ValueType,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
