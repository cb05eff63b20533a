use crate::{
    ast::{FieldPredicate, Node, Operator, Query, Value},
    error::{Diagnostic, ValidateError},
};


/// Inclusive pagination bounds of the targeted record service.
pub const LIMIT_MIN: u32 = 1;
pub const LIMIT_MAX: u32 = 500;
pub const OFFSET_MAX: u32 = 10_000;

/// Strict validation: any shape or pagination violation is fatal.
///
/// This is the primary policy. The reference implementation's
/// warn-and-accept behavior for predicates from the legacy builder path
/// lives in [`validate_with_diagnostics`] instead.
pub fn validate(query: Query) -> Result<Query, ValidateError> {
    validate_bounds(&query)?;
    if let Some(node) = &query.predicate {
        validate_node(node)?;
    }
    Ok(query)
}

/// Compatibility validation: pagination bounds stay fatal, while
/// operator/value-shape mismatches are downgraded to ordered
/// diagnostics and the query passes through unchanged.
///
/// Callers wanting strict semantics should treat any returned
/// diagnostic as upgradeable to a hard failure at their own boundary.
pub fn validate_with_diagnostics(
    query: Query,
) -> Result<(Query, Vec<Diagnostic>), ValidateError> {
    validate_bounds(&query)?;

    let mut diagnostics = Vec::new();
    if let Some(node) = &query.predicate {
        collect_node(node, &mut diagnostics);
    }
    for diagnostic in &diagnostics {
        tracing::debug!(
            field = %diagnostic.field,
            op = %diagnostic.op,
            "value-shape diagnostic: {}",
            diagnostic.message,
        );
    }

    Ok((query, diagnostics))
}

/// Range-check a parsed limit and narrow it for the query envelope.
pub(crate) fn check_limit(value: i64) -> Result<u32, ValidateError> {
    if (i64::from(LIMIT_MIN)..=i64::from(LIMIT_MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ValidateError::LimitOutOfRange { value })
    }
}

/// Range-check a parsed offset and narrow it for the query envelope.
pub(crate) fn check_offset(value: i64) -> Result<u32, ValidateError> {
    if (0..=i64::from(OFFSET_MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ValidateError::OffsetOutOfRange { value })
    }
}

/// Per-operator value-shape rule for a single constructed predicate.
/// The parser calls this once per `FieldPredicate` it builds.
pub(crate) fn validate_predicate(predicate: &FieldPredicate) -> Result<(), ValidateError> {
    let FieldPredicate { field, op, value } = predicate;

    if op.is_empty_shape() {
        return match value {
            None => Ok(()),
            Some(_) => Err(ValidateError::value_shape(field, *op, "no value")),
        };
    }

    let Some(value) = value else {
        return Err(ValidateError::value_shape(field, *op, "a value"));
    };

    if op.is_membership() {
        if !(value.is_list() || matches!(value, Value::Func(_))) {
            return Err(ValidateError::value_shape(
                field,
                *op,
                "an array or function value",
            ));
        }
    } else if op.is_pattern() {
        if !value.is_text() {
            return Err(ValidateError::value_shape(field, *op, "a string value"));
        }
    } else if value.is_list() {
        // Comparison operators take scalars or server-evaluated functions.
        return Err(ValidateError::value_shape(
            field,
            *op,
            "a scalar or function value",
        ));
    }

    validate_value(field, *op, value)
}

/// Interior shape of an accepted value: function arguments are scalars,
/// and array elements are scalars or functions. The grammar has no
/// nested arrays or nested calls, so anything deeper would serialize to
/// text the parser rejects.
fn validate_value(field: &str, op: Operator, value: &Value) -> Result<(), ValidateError> {
    match value {
        Value::Text(_) | Value::Number(_) => Ok(()),
        Value::Func(call) => {
            for arg in &call.args {
                if !matches!(arg, Value::Text(_) | Value::Number(_)) {
                    return Err(ValidateError::value_shape(
                        field,
                        op,
                        "scalar function arguments",
                    ));
                }
            }
            Ok(())
        }
        Value::List(items) => {
            for item in items {
                if item.is_list() {
                    return Err(ValidateError::value_shape(
                        field,
                        op,
                        "scalar or function array elements",
                    ));
                }
                validate_value(field, op, item)?;
            }
            Ok(())
        }
    }
}

fn validate_bounds(query: &Query) -> Result<(), ValidateError> {
    if let Some(limit) = query.limit {
        check_limit(i64::from(limit))?;
    }
    if let Some(offset) = query.offset {
        check_offset(i64::from(offset))?;
    }
    Ok(())
}

fn validate_node(node: &Node) -> Result<(), ValidateError> {
    match node {
        Node::Predicate(predicate) => validate_predicate(predicate),
        Node::Combinator(combinator) => {
            validate_node(&combinator.left)?;
            validate_node(&combinator.right)
        }
        Node::Not(operand) => validate_node(operand),
    }
}

/// Lenient walk: shape failures become diagnostics in tree order
/// (left to right, outside in).
fn collect_node(node: &Node, out: &mut Vec<Diagnostic>) {
    match node {
        Node::Predicate(predicate) => {
            if let Err(err) = validate_predicate(predicate) {
                if let Some(diagnostic) = Diagnostic::from_shape_error(&err) {
                    out.push(diagnostic);
                }
            }
        }
        Node::Combinator(combinator) => {
            collect_node(&combinator.left, out);
            collect_node(&combinator.right, out);
        }
        Node::Not(operand) => collect_node(operand, out),
    }
}
