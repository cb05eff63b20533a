use crate::ast::{FieldPredicate, FunctionCall, Node, Query, Value};
use std::fmt;


/// Render a query to canonical grammar text.
///
/// Pure and total: every tree renders. Clauses appear in the fixed
/// order predicate, `order by`, `limit`, `offset`, space-joined, with
/// absent parts omitted; an all-absent query yields the empty string.
/// Combinators are always parenthesized, so output is canonical but not
/// necessarily syntactically minimal.
#[must_use]
pub fn serialize(query: &Query) -> String {
    let mut parts = Vec::new();

    if let Some(node) = &query.predicate {
        parts.push(render_node(node));
    }
    if !query.order.is_empty() {
        let clauses = query
            .order
            .iter()
            .map(|clause| format!("{} {}", clause.field, clause.direction))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("order by {clauses}"));
    }
    if let Some(limit) = query.limit {
        parts.push(format!("limit {limit}"));
    }
    if let Some(offset) = query.offset {
        parts.push(format!("offset {offset}"));
    }

    parts.join(" ")
}

fn render_node(node: &Node) -> String {
    match node {
        Node::Predicate(predicate) => render_predicate(predicate),
        Node::Combinator(combinator) => format!(
            "({} {} {})",
            render_node(&combinator.left),
            combinator.kind,
            render_node(&combinator.right),
        ),
        Node::Not(operand) => format!("not {}", render_node(operand)),
    }
}

fn render_predicate(predicate: &FieldPredicate) -> String {
    match &predicate.value {
        Some(value) => format!(
            "{} {} {}",
            predicate.field,
            predicate.op,
            render_value(value)
        ),
        None => format!("{} {}", predicate.field, predicate.op),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Text(text) => quote(text),
        Value::Number(number) => number.to_string(),
        Value::Func(call) => render_function(call),
        Value::List(items) => {
            let rendered = items
                .iter()
                .map(render_value)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({rendered})")
        }
    }
}

fn render_function(call: &FunctionCall) -> String {
    let args = call
        .args
        .iter()
        .map(render_function_arg)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({args})", call.name)
}

/// A string argument made only of uppercase letters/underscore denotes a
/// grammar constant (e.g. a time unit) and is emitted bare; every other
/// string is quote-escaped, and non-strings use their natural form.
fn render_function_arg(value: &Value) -> String {
    match value {
        Value::Text(text) if is_grammar_constant(text) => text.clone(),
        other => render_value(other),
    }
}

fn is_grammar_constant(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Quote a string literal, escaping `\` and `"` with a backslash.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_node(self))
    }
}
