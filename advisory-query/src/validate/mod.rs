//! Column allow-listing for projections and sort keys.
//!
//! Field names are embedded literally into generated SQL, so every name
//! that did not originate in this crate has to clear the allow-list
//! first. Literal *values* never take this path; they always bind
//! through positional placeholders.

mod column;

pub use column::{exists_document_column, ValidationError};
