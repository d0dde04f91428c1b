//! Core types of the filter-expression language.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Target types for literals and explicit casts.
///
/// Each variant maps to exactly one SQL type of the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// `text`
    String,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `timestamptz`
    Time,
    /// `boolean`
    Bool,
    /// `workflow` (the advisory state enum)
    Workflow,
    /// `interval`
    Duration,
}

impl ValueType {
    /// The SQL spelling of this type.
    pub(crate) const fn sql_type(self) -> &'static str {
        match self {
            Self::String => "text",
            Self::Int => "int",
            Self::Float => "float",
            Self::Time => "timestamptz",
            Self::Bool => "boolean",
            Self::Workflow => "workflow",
            Self::Duration => "interval",
        }
    }
}

/// Comparison operators: `=`, `<>`, `<`, `>`, `<=`, `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal: `=`
    Eq,
    /// Not equal: `<>`
    Ne,
    /// Less than: `<`
    Lt,
    /// Greater than: `>`
    Gt,
    /// Less than or equal: `<=`
    Le,
    /// Greater than or equal: `>=`
    Ge,
}

impl CompareOp {
    pub(crate) const fn token(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
        }
    }
}

/// Arithmetic operators: `+`, `-`, `*`, `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`
    Mul,
    /// Division: `/`
    Div,
}

impl ArithOp {
    pub(crate) const fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// A typed literal.
///
/// The variant determines both the value representation and how the
/// literal is rendered: strings bind through a positional placeholder,
/// everything else renders as an inline SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Text value, bound via `$n`.
    String(String),
    /// Integer literal, rendered as decimal text.
    Int(i64),
    /// Float literal, rendered as decimal text.
    Float(f64),
    /// Timestamp, rendered as a UTC ISO-8601 literal cast to `timestamptz`.
    Time(DateTime<Utc>),
    /// Boolean literal, rendered as `TRUE`/`FALSE`.
    Bool(bool),
    /// Workflow state name, rendered as a quoted literal cast to `workflow`.
    Workflow(String),
    /// Duration, rendered as a `'<secs>.<hundredths> seconds'` interval.
    Duration(Duration),
}

/// A node of the filter-expression tree.
///
/// Trees reaching the compiler are built by a typed upstream layer and
/// are assumed well-formed; the compiler renders them without
/// re-validating payloads. Field names inside [`Expr::Access`] are only
/// checked against the column allow-list when they are used as
/// projections or sort keys, not during WHERE compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical column reference.
    Access(String),
    /// Typed literal.
    Const(Constant),
    /// Explicit coercion of the child to a [`ValueType`].
    Cast(ValueType, Box<Expr>),
    /// Binary comparison.
    Compare(CompareOp, Box<Expr>, Box<Expr>),
    /// Logical conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Logical disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Logical negation.
    Not(Box<Expr>),
    /// Binary arithmetic.
    Arith(ArithOp, Box<Expr>, Box<Expr>),
    /// Full-text match against the document text tables.
    ///
    /// The query text goes through the web-search tsquery parser. A
    /// non-empty `alias` additionally registers a ranked-snippet
    /// projection fragment under that name.
    Search {
        /// Search query text, bound via placeholder.
        query: String,
        /// Text-search language configuration name.
        lang: String,
        /// Optional projection alias for the highlighted snippet.
        alias: Option<String>,
    },
    /// Full-text match against the comments of the document.
    CSearch {
        /// Search query text, bound via placeholder.
        query: String,
        /// Text-search language configuration name.
        lang: String,
    },
    /// Phrase match against the comments of the document.
    Mentioned {
        /// Phrase text, bound via placeholder.
        query: String,
    },
    /// Actor match against the events log of the document.
    Involved {
        /// Actor name, bound via placeholder.
        actor: String,
    },
    /// Case-insensitive pattern match.
    ILike(Box<Expr>, Box<Expr>),
    /// Case-insensitive pattern match over the product identifiers
    /// extracted from the document body; the child supplies the pattern.
    ILikePid(Box<Expr>),
    /// Current-timestamp keyword.
    Now,
}

impl Expr {
    /// Reference a logical column.
    pub fn access(column: impl Into<String>) -> Self {
        Self::Access(column.into())
    }

    /// String literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Const(Constant::String(value.into()))
    }

    /// Integer literal.
    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::Const(Constant::Int(value))
    }

    /// Float literal.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Const(Constant::Float(value))
    }

    /// Boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Const(Constant::Bool(value))
    }

    /// Timestamp literal.
    #[must_use]
    pub const fn time(value: DateTime<Utc>) -> Self {
        Self::Const(Constant::Time(value))
    }

    /// Workflow state literal.
    pub fn workflow(value: impl Into<String>) -> Self {
        Self::Const(Constant::Workflow(value.into()))
    }

    /// Duration literal.
    #[must_use]
    pub const fn duration(value: Duration) -> Self {
        Self::Const(Constant::Duration(value))
    }

    /// Binary comparison of two sub-expressions.
    #[must_use]
    pub fn compare(op: CompareOp, left: Self, right: Self) -> Self {
        Self::Compare(op, Box::new(left), Box::new(right))
    }

    /// Binary arithmetic over two sub-expressions.
    #[must_use]
    pub fn arith(op: ArithOp, left: Self, right: Self) -> Self {
        Self::Arith(op, Box::new(left), Box::new(right))
    }
}

/// Conjunction of two expressions.
///
/// This is also the hook for visibility scoping: the endpoint layer
/// builds a predicate describing what the current principal may see and
/// ANDs it with the user-supplied filter before compilation.
#[must_use]
pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::And(Box::new(left), Box::new(right))
}

/// Disjunction of two expressions.
#[must_use]
pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::Or(Box::new(left), Box::new(right))
}

/// Negation of an expression.
#[must_use]
pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

/// Equality of a column and an integer literal.
pub fn field_eq_int(field: impl Into<String>, value: i64) -> Expr {
    Expr::compare(CompareOp::Eq, Expr::access(field), Expr::int(value))
}

/// Equality of a column and a string literal.
pub fn field_eq_string(field: impl Into<String>, value: impl Into<String>) -> Expr {
    Expr::compare(CompareOp::Eq, Expr::access(field), Expr::string(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_eq_int_shape() {
        let expr = field_eq_int("id", 42);
        assert_eq!(
            expr,
            Expr::Compare(
                CompareOp::Eq,
                Box::new(Expr::Access("id".to_string())),
                Box::new(Expr::Const(Constant::Int(42))),
            )
        );
    }

    #[test]
    fn combinators_nest() {
        let expr = and(
            field_eq_string("publisher", "BSI"),
            not(field_eq_int("id", 1)),
        );
        let Expr::And(_, right) = expr else {
            panic!("expected And");
        };
        assert!(matches!(*right, Expr::Not(_)));
    }

    #[test]
    fn value_type_sql_spelling() {
        assert_eq!(ValueType::String.sql_type(), "text");
        assert_eq!(ValueType::Time.sql_type(), "timestamptz");
        assert_eq!(ValueType::Workflow.sql_type(), "workflow");
        assert_eq!(ValueType::Duration.sql_type(), "interval");
    }

    #[test]
    fn operator_tokens() {
        assert_eq!(CompareOp::Ne.token(), "<>");
        assert_eq!(CompareOp::Le.token(), "<=");
        assert_eq!(ArithOp::Mul.token(), "*");
    }
}
