//! TabQL — a declarative filter-query language for hosted
//! tabular-record services.
//!
//! ## Crate layout
//! - `core`: the engine — AST, cursor, parser, validator, serializer,
//!   and the explicit predicate builder.
//!
//! The `prelude` module mirrors the vocabulary used at call sites;
//! collaborators such as the metadata client or a command-line front
//! end build on the three engine operations re-exported here.

pub use tabql_core as core;

pub use tabql_core::{
    Diagnostic, ParseError, ValidateError, parse, serialize, validate,
    validate_with_diagnostics,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// re-exports the core prelude's domain vocabulary unchanged
///

pub mod prelude {
    pub use tabql_core::prelude::*;
}
