//! Core engine for TabQL: the query AST, the recursive-descent parser,
//! the canonicalizing serializer, the semantic validator, and the
//! explicit predicate builder.
//!
//! The engine is single-threaded, synchronous, and purely CPU-bound:
//! each parse or serialize call is independent and side-effect-free
//! apart from a parse-local cursor, so distinct calls may run
//! concurrently on distinct threads with zero shared state.
#![warn(unreachable_pub)]

pub mod ast;
pub mod builder;
pub mod error;
pub mod parse;
pub mod serialize;
pub mod validate;

mod cursor;

pub use error::{Diagnostic, ParseError, ValidateError};
pub use parse::parse;
pub use serialize::serialize;
pub use validate::{validate, validate_with_diagnostics};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        ast::{
            Combinator, CombinatorKind, FieldPredicate, FunctionCall, FunctionName, Node,
            Operator, Query, SortClause, SortDirection, Value,
        },
        builder::{QueryBuilder, and, field, not, or},
    };
}
