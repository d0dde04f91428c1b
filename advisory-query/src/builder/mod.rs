//! Per-query compiler state and statement assembly.

mod select;
mod types;
mod where_clause;

pub use types::{
    and, field_eq_int, field_eq_string, not, or, ArithOp, CompareOp, Constant, Expr, ValueType,
};

use std::collections::HashMap;

/// Correlated subquery counting the document versions of an advisory.
pub(crate) const VERSIONS_COUNT: &str = "(SELECT count(*) FROM documents WHERE \
     documents.publisher = advisories.publisher AND \
     documents.tracking_id = advisories.tracking_id)";

/// Correlated subquery counting the comments of a document.
pub(crate) const COMMENTS_COUNT: &str =
    "(SELECT count(*) FROM comments WHERE comments.documents_id = documents.id)";

/// FROM clause of the advisory-joined view.
pub(crate) const ADVISORY_FROM: &str = "documents JOIN advisories ON \
     advisories.tracking_id = documents.tracking_id AND \
     advisories.publisher = documents.publisher";

/// Join clause pulling in the text-search side tables.
pub(crate) const TEXT_TABLES_JOIN: &str =
    " JOIN documents_texts ON id = documents_texts.documents_id \
     JOIN unique_texts ON documents_texts.txt_id = unique_texts.id";

/// Compiler state for one logical query.
///
/// A builder owns everything accumulated while compiling a single
/// filter expression: the rendered WHERE text, the ordered replacement
/// values backing the `$n` placeholders, the alias table populated by
/// search nodes, and the flags steering FROM-clause construction.
/// Create a fresh instance per query via [`documents`](crate::documents)
/// or [`advisories`](crate::advisories) and discard it once the final
/// statement text has been produced; instances are not meant to be
/// shared between unrelated queries.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    where_clause: String,
    replacements: Vec<String>,
    repl_to_idx: HashMap<String, usize>,
    aliases: HashMap<String, String>,
    advisory: bool,
    text_tables: bool,
}

impl SqlBuilder {
    /// Create a builder; `advisory` selects the advisory-joined view.
    #[must_use]
    pub fn new(advisory: bool) -> Self {
        Self {
            advisory,
            ..Self::default()
        }
    }

    /// The WHERE clause rendered by [`create_where`](Self::create_where).
    #[must_use]
    pub fn where_clause(&self) -> &str {
        &self.where_clause
    }

    /// Replacement values in placeholder order: `$k` refers to
    /// `replacements()[k - 1]`.
    #[must_use]
    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }

    /// Projection aliases registered while compiling the WHERE clause.
    #[must_use]
    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Whether the query is scoped to the advisory-joined view.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        self.advisory
    }

    /// Whether the compiled expression requires the text-search side
    /// tables to be joined into the FROM clause.
    #[must_use]
    pub fn has_text_tables(&self) -> bool {
        self.text_tables
    }

    pub(crate) fn register_alias(&mut self, alias: &str, fragment: String) {
        // First registration wins; later nodes reusing the alias keep it.
        self.aliases.entry(alias.to_string()).or_insert(fragment);
    }

    /// Intern a literal value, returning its zero-based placeholder slot.
    ///
    /// Identical values share one slot; slots are assigned in order of
    /// first occurrence.
    pub(crate) fn replacement_index(&mut self, value: &str) -> usize {
        if let Some(&idx) = self.repl_to_idx.get(value) {
            return idx;
        }
        let idx = self.replacements.len();
        self.replacements.push(value.to_string());
        self.repl_to_idx.insert(value.to_string(), idx);
        idx
    }
}
