//! Compilation of an expression tree into WHERE-clause text.

use super::types::{Constant, Expr, ValueType};
use super::{SqlBuilder, COMMENTS_COUNT, VERSIONS_COUNT};

impl SqlBuilder {
    /// Compile `expr` into a boolean SQL predicate.
    ///
    /// The rendered text is stored on the builder (for the later
    /// [`create_query`](Self::create_query) /
    /// [`create_count_sql`](Self::create_count_sql) calls) and returned.
    /// Compilation also interns string literals into the replacement
    /// list, registers snippet aliases and records whether the
    /// text-search side tables have to be joined.
    ///
    /// Every node is emitted inside its own pair of parentheses, so the
    /// meaning of nested boolean/arithmetic expressions never depends on
    /// the operator precedence of the SQL dialect.
    pub fn create_where(&mut self, expr: &Expr) -> String {
        let mut b = String::new();
        self.where_recurse(expr, &mut b);
        log::debug!("compiled WHERE clause: {}", b);
        self.where_clause.clone_from(&b);
        b
    }

    fn where_recurse(&mut self, expr: &Expr, b: &mut String) {
        b.push('(');
        match expr {
            Expr::Access(column) => self.access_where(column, b),
            Expr::Const(constant) => self.const_where(constant, b),
            Expr::Cast(target, inner) => self.cast_where(*target, inner, b),
            Expr::Compare(op, left, right) => self.binary_where(op.token(), left, right, b),
            Expr::And(left, right) => self.binary_where("AND", left, right, b),
            Expr::Or(left, right) => self.binary_where("OR", left, right, b),
            Expr::Not(inner) => {
                b.push_str("NOT ");
                self.where_recurse(inner, b);
            }
            Expr::Arith(op, left, right) => self.binary_where(op.token(), left, right, b),
            Expr::Search { query, lang, alias } => {
                self.search_where(query, lang, alias.as_deref(), b);
            }
            Expr::CSearch { query, lang } => self.csearch_where(query, lang, b),
            Expr::Mentioned { query } => self.mentioned_where(query, b),
            Expr::Involved { actor } => self.involved_where(actor, b),
            Expr::ILike(left, right) => self.binary_where("ILIKE", left, right, b),
            Expr::ILikePid(pattern) => self.ilike_pid_where(pattern, b),
            Expr::Now => b.push_str("current_timestamp"),
        }
        b.push(')');
    }

    fn binary_where(&mut self, op: &str, left: &Expr, right: &Expr, b: &mut String) {
        self.where_recurse(left, b);
        b.push(' ');
        b.push_str(op);
        b.push(' ');
        self.where_recurse(right, b);
    }

    /// Resolve a logical column to its physical backing.
    ///
    /// Unknown names pass through verbatim; vetting them against the
    /// allow-list is the job of projection/order validation, upstream of
    /// WHERE compilation.
    fn access_where(&mut self, column: &str, b: &mut String) {
        match column {
            "tracking_id" | "publisher" => {
                b.push_str("documents.");
                b.push_str(column);
            }
            "versions" => b.push_str(VERSIONS_COUNT),
            "comments" => {
                if self.advisory {
                    // Precomputed column on the advisory-joined view.
                    b.push_str(column);
                } else {
                    b.push_str(COMMENTS_COUNT);
                }
            }
            _ => b.push_str(column),
        }
    }

    fn const_where(&mut self, constant: &Constant, b: &mut String) {
        match constant {
            Constant::String(value) => {
                let idx = self.replacement_index(value);
                b.push_str(&format!("${}", idx + 1));
            }
            Constant::Int(value) => b.push_str(&value.to_string()),
            Constant::Float(value) => b.push_str(&value.to_string()),
            Constant::Time(value) => {
                // Timestamps are UTC by construction.
                b.push_str(&format!(
                    "'{}'::timestamptz",
                    value.format("%Y-%m-%dT%H:%M:%S%z")
                ));
            }
            Constant::Bool(value) => b.push_str(if *value { "TRUE" } else { "FALSE" }),
            Constant::Workflow(value) => b.push_str(&format!("'{value}'::workflow")),
            Constant::Duration(value) => {
                b.push_str(&format!("'{:.2} seconds'::interval", value.as_secs_f64()));
            }
        }
    }

    fn cast_where(&mut self, target: ValueType, inner: &Expr, b: &mut String) {
        b.push_str("CAST(");
        self.where_recurse(inner, b);
        b.push_str(" AS ");
        b.push_str(target.sql_type());
        b.push(')');
    }

    fn search_where(&mut self, query: &str, lang: &str, alias: Option<&str>, b: &mut String) {
        let idx = self.replacement_index(query) + 1;
        b.push_str(&format!("ts @@ websearch_to_tsquery('{lang}',${idx})"));
        self.text_tables = true;
        let Some(alias) = alias else {
            return;
        };
        if alias.is_empty() {
            return;
        }
        let fragment = format!("ts_headline('{lang}',txt,websearch_to_tsquery('{lang}', ${idx}))");
        self.register_alias(alias, fragment);
    }

    fn csearch_where(&mut self, query: &str, lang: &str, b: &mut String) {
        let idx = self.replacement_index(query) + 1;
        if self.advisory {
            b.push_str(&format!(
                "EXISTS(SELECT 1 FROM comments JOIN documents docs \
                 ON comments.documents_id = docs.id \
                 WHERE ts @@ websearch_to_tsquery('{lang}', ${idx}) \
                 AND docs.publisher = documents.publisher AND docs.tracking_id = documents.tracking_id)"
            ));
        } else {
            b.push_str(&format!(
                "EXISTS(SELECT 1 FROM comments WHERE ts @@ websearch_to_tsquery('{lang}', ${idx}) \
                 AND comments.documents_id = documents.id)"
            ));
        }
    }

    fn mentioned_where(&mut self, query: &str, b: &mut String) {
        let idx = self.replacement_index(query) + 1;
        if self.advisory {
            b.push_str(&format!(
                "EXISTS(SELECT 1 FROM comments JOIN documents docs \
                 ON comments.documents_id = docs.id \
                 WHERE ts @@ phraseto_tsquery(${idx}) \
                 AND docs.publisher = documents.publisher AND docs.tracking_id = documents.tracking_id)"
            ));
        } else {
            b.push_str(&format!(
                "EXISTS(SELECT 1 FROM comments WHERE ts @@ phraseto_tsquery(${idx}) \
                 AND comments.documents_id = documents.id)"
            ));
        }
    }

    fn involved_where(&mut self, actor: &str, b: &mut String) {
        let idx = self.replacement_index(actor) + 1;
        if self.advisory {
            b.push_str(&format!(
                "EXISTS(SELECT 1 FROM events_log JOIN documents docs \
                 ON events_log.documents_id = docs.id \
                 WHERE actor = ${idx} \
                 AND docs.publisher = documents.publisher AND docs.tracking_id = documents.tracking_id)"
            ));
        } else {
            b.push_str(&format!(
                "EXISTS(SELECT 1 FROM events_log WHERE actor = ${idx} \
                 AND events_log.documents_id = documents.id)"
            ));
        }
    }

    fn ilike_pid_where(&mut self, pattern: &Expr, b: &mut String) {
        b.push_str(
            "EXISTS (WITH product_ids AS (SELECT jsonb_path_query(\
             document, '$.product_tree.**.product.product_id')::int num \
             FROM documents ds WHERE ds.id = documents.id) \
             SELECT * FROM documents_texts dts JOIN product_ids \
             ON product_ids.num = dts.num JOIN unique_texts ON dts.txt_id = unique_texts.id \
             WHERE dts.documents_id = documents.id AND \
             unique_texts.txt ILIKE ",
        );
        self.where_recurse(pattern, b);
        b.push(')');
    }
}
