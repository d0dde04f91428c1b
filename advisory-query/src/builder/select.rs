//! Projection validation, ORDER BY rendering and statement assembly.

use super::{SqlBuilder, ADVISORY_FROM, COMMENTS_COUNT, TEXT_TABLES_JOIN, VERSIONS_COUNT};
use crate::validate::{exists_document_column, ValidationError};

impl SqlBuilder {
    /// Check that every requested projection is either a registered
    /// alias or an allow-listed column of the current mode.
    pub fn check_projections(&self, projections: &[&str]) -> Result<(), ValidationError> {
        for projection in projections {
            if self.aliases.contains_key(*projection) {
                continue;
            }
            if !exists_document_column(projection, self.advisory) {
                return Err(ValidationError::UnknownColumn {
                    field: (*projection).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Render an ORDER BY clause for the given fields.
    ///
    /// A `-` prefix sorts descending. Fields are validated like
    /// projections. Score-like columns sort null-safe via `COALESCE`;
    /// `version` gets a best-effort numeric sort that only considers
    /// rows whose version text is a valid integer literal; it is not a
    /// semantic-version comparator.
    pub fn create_order(&self, fields: &[&str]) -> Result<String, ValidationError> {
        let mut b = String::new();
        for field in fields {
            let (field, desc) = match field.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (*field, false),
            };
            if !self.aliases.contains_key(field) && !exists_document_column(field, self.advisory) {
                return Err(ValidationError::UnknownOrderField {
                    field: field.to_string(),
                });
            }
            if !b.is_empty() {
                b.push(',');
            }
            match field {
                "tracking_id" | "publisher" => {
                    b.push_str("documents.");
                    b.push_str(field);
                }
                "cvss_v2_score" | "cvss_v3_score" | "critical" => {
                    b.push_str(&format!("COALESCE({field},0)"));
                }
                "version" => b.push_str(
                    "CASE WHEN pg_input_is_valid(version, 'integer') THEN version::int END",
                ),
                _ => b.push_str(field),
            }
            b.push_str(if desc { " DESC" } else { " ASC" });
        }
        Ok(b)
    }

    /// Assemble the full SELECT statement for the compiled filter.
    ///
    /// `order` is inserted verbatim when non-empty (build it with
    /// [`create_order`](Self::create_order)). A negative `limit` means
    /// unlimited; an `offset` of zero or less is omitted.
    #[must_use]
    pub fn create_query(&self, fields: &[&str], order: &str, limit: i64, offset: i64) -> String {
        let mut b = String::from("SELECT ");
        self.projections_with_casts(&mut b, fields);
        b.push_str(" FROM ");
        self.create_from(&mut b);
        b.push_str(" WHERE ");
        b.push_str(&self.where_clause);
        if !order.is_empty() {
            b.push_str(" ORDER BY ");
            b.push_str(order);
        }
        if limit >= 0 {
            b.push_str(&format!(" LIMIT {limit}"));
        }
        if offset > 0 {
            b.push_str(&format!(" OFFSET {offset}"));
        }
        log::debug!("assembled query: {}", b);
        b
    }

    /// Assemble the matching count statement; FROM and WHERE are
    /// identical to [`create_query`](Self::create_query).
    #[must_use]
    pub fn create_count_sql(&self) -> String {
        let mut b = String::from("SELECT count(*) FROM ");
        self.create_from(&mut b);
        b.push_str(" WHERE ");
        b.push_str(&self.where_clause);
        b
    }

    fn create_from(&self, b: &mut String) {
        if self.advisory {
            b.push_str(ADVISORY_FROM);
        } else {
            b.push_str("documents");
        }
        if self.text_tables {
            b.push_str(TEXT_TABLES_JOIN);
        }
    }

    /// Render projections, substituting alias fragments and computed
    /// columns where needed.
    fn projections_with_casts(&self, b: &mut String, projections: &[&str]) {
        for (i, projection) in projections.iter().enumerate() {
            if i > 0 {
                b.push(',');
            }
            if let Some(fragment) = self.aliases.get(*projection) {
                b.push_str(fragment);
                continue;
            }
            match *projection {
                "id" | "tracking_id" | "publisher" => {
                    b.push_str("documents.");
                    b.push_str(projection);
                }
                "state" => b.push_str("state::text"),
                "versions" => {
                    b.push_str(VERSIONS_COUNT);
                    b.push_str(" AS versions");
                }
                "comments" => {
                    if self.advisory {
                        b.push_str(projection);
                    } else {
                        b.push_str(COMMENTS_COUNT);
                        b.push_str(" AS comments");
                    }
                }
                _ => b.push_str(projection),
            }
        }
    }
}
