use crate::{
    ast::Operator,
    validate::{LIMIT_MAX, LIMIT_MIN, OFFSET_MAX},
};
use thiserror::Error as ThisError;

///
/// ParseError
///
/// Syntactic failure taxonomy. Every variant is fatal: parsing has no
/// partial-success mode, and a failure yields no AST. Variants carry the
/// byte offset into the trimmed input plus the offending fragment.
///
/// Out-of-range pagination bounds discovered mid-parse surface through
/// the `Validate` variant; they share the semantic taxonomy below.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ParseError {
    #[error("unexpected token at offset {offset}: '{fragment}'")]
    UnexpectedToken { offset: usize, fragment: String },

    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },

    #[error("expected keyword '{keyword}' at offset {offset}: '{fragment}'")]
    ExpectedKeyword {
        keyword: &'static str,
        offset: usize,
        fragment: String,
    },

    #[error("expected comparison operator at offset {offset}: '{fragment}'")]
    ExpectedOperator { offset: usize, fragment: String },

    #[error("invalid number at offset {offset}: '{fragment}'")]
    InvalidNumber { offset: usize, fragment: String },

    #[error("trailing input at offset {offset}: '{fragment}'")]
    TrailingInput { offset: usize, fragment: String },

    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

///
/// ValidateError
///
/// Semantic failure taxonomy. Pagination bounds are hard constraints of
/// the targeted record service; value-shape rules are the per-operator
/// invariants of the data model.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("limit {value} out of range; expected {LIMIT_MIN}..={LIMIT_MAX}")]
    LimitOutOfRange { value: i64 },

    #[error("offset {value} out of range; expected 0..={OFFSET_MAX}")]
    OffsetOutOfRange { value: i64 },

    #[error("operator '{op}' on field '{field}' requires {expected}")]
    ValueShape {
        field: String,
        op: Operator,
        expected: &'static str,
    },
}

impl ValidateError {
    pub(crate) fn value_shape(field: &str, op: Operator, expected: &'static str) -> Self {
        Self::ValueShape {
            field: field.to_string(),
            op,
            expected,
        }
    }
}

///
/// Diagnostic
///
/// Non-fatal validation finding from the compatibility path: a human
/// message plus the structured context a caller needs to upgrade it to a
/// hard failure at its own boundary. Emission order follows predicate
/// tree order (left to right, outside in).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub field: String,
    pub op: Operator,
    pub expected: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn from_shape_error(err: &ValidateError) -> Option<Self> {
        match err {
            ValidateError::ValueShape {
                field,
                op,
                expected,
            } => Some(Self {
                field: field.clone(),
                op: *op,
                expected,
                message: err.to_string(),
            }),
            ValidateError::LimitOutOfRange { .. } | ValidateError::OffsetOutOfRange { .. } => None,
        }
    }
}
