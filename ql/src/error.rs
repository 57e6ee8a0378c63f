use thiserror::Error;

/// Errors produced while converting a query document into a predicate tree.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("query must be a document, got {0}")]
    NotADocument(&'static str),
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
    #[error("{op} expects {expected}")]
    InvalidOperand { op: &'static str, expected: &'static str },
    #[error("{0} requires a non-empty array")]
    EmptyLogicalOperator(&'static str),
    #[error("equality to composite literals is not supported for field {0}")]
    UnsupportedLiteral(String),
    #[error("sort direction for {path} must be 1 or -1")]
    InvalidSortDirection { path: String },
}
