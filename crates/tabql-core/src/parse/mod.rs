use crate::{
    ast::{FieldPredicate, Node, Operator, Query, SortClause, SortDirection},
    cursor::Cursor,
    error::ParseError,
    validate,
};

mod value;

#[cfg(test)]
mod tests;

///
/// Parser
///
/// Recursive-descent routines, one per grammar production, over a
/// single-use `Cursor`. Grammar, lowest precedence first:
///
/// ```text
/// Query      := [Predicate] [OrderBy] [Limit] [Offset]
/// Predicate  := Or
/// Or         := And ('or' And)*
/// And        := Primary ('and' Primary)*
/// Primary    := ['not'] ('(' Or ')' | FieldPredicate)
/// FieldPredicate := FieldPath Operator [Value]
/// OrderBy    := 'order' 'by' SortClause (',' SortClause)*
/// SortClause := FieldPath ['asc'|'desc']
/// Limit      := 'limit' Integer
/// Offset     := 'offset' Integer
/// ```
///
/// There is no partial-success mode: any failure aborts the whole parse
/// and yields no AST.
///

/// Parse query text into a [`Query`].
///
/// The predicate clause is present iff the input does not start with
/// `order`/`limit`/`offset`. After the grammar is fully consumed, any
/// remaining non-whitespace input is a fatal `TrailingInput`.
pub fn parse(text: &str) -> Result<Query, ParseError> {
    tracing::trace!(len = text.len(), "parsing query text");

    let mut cur = Cursor::new(text);
    let query = parse_query(&mut cur)?;

    cur.skip_whitespace();
    if !cur.is_eof() {
        return Err(ParseError::TrailingInput {
            offset: cur.offset(),
            fragment: cur.fragment(),
        });
    }

    Ok(query)
}

fn parse_query(cur: &mut Cursor<'_>) -> Result<Query, ParseError> {
    cur.skip_whitespace();

    let mut query = Query::new();
    if cur.is_eof() {
        return Ok(query);
    }

    if !starts_clause_keyword(cur) {
        query.predicate = Some(parse_or(cur)?);
    }

    cur.skip_whitespace();
    if cur.consume_keyword("order") {
        query.order = parse_order_by(cur)?;
    }

    cur.skip_whitespace();
    if cur.consume_keyword("limit") {
        query.limit = Some(parse_limit(cur)?);
    }

    cur.skip_whitespace();
    if cur.consume_keyword("offset") {
        query.offset = Some(parse_offset(cur)?);
    }

    Ok(query)
}

fn starts_clause_keyword(cur: &Cursor<'_>) -> bool {
    cur.peek_keyword("order") || cur.peek_keyword("limit") || cur.peek_keyword("offset")
}

// ----------------------------------------------------------------------
// Predicate productions
// ----------------------------------------------------------------------

/// `Or := And ('or' And)*`, left-associative.
fn parse_or(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let mut left = parse_and(cur)?;
    loop {
        cur.skip_whitespace();
        if !cur.consume_keyword("or") {
            return Ok(left);
        }
        let right = parse_and(cur)?;
        left = Node::or(left, right);
    }
}

/// `And := Primary ('and' Primary)*`; binds tighter than `or`.
fn parse_and(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    let mut left = parse_primary(cur)?;
    loop {
        cur.skip_whitespace();
        if !cur.consume_keyword("and") {
            return Ok(left);
        }
        let right = parse_primary(cur)?;
        left = Node::and(left, right);
    }
}

fn parse_primary(cur: &mut Cursor<'_>) -> Result<Node, ParseError> {
    cur.skip_whitespace();

    if cur.is_eof() {
        return Err(ParseError::UnexpectedEndOfInput {
            offset: cur.offset(),
        });
    }

    // Prefix negation of a whole primary. The `not in`/`not like`
    // operator forms are lexed at operator position, after a field path,
    // so they never reach here.
    if cur.consume_keyword("not") {
        let operand = parse_primary(cur)?;
        return Ok(Node::not(operand));
    }

    if cur.consume_literal("(") {
        let node = parse_or(cur)?;
        cur.skip_whitespace();
        cur.expect_literal(")")?;
        return Ok(node);
    }

    parse_field_predicate(cur).map(Node::Predicate)
}

fn parse_field_predicate(cur: &mut Cursor<'_>) -> Result<FieldPredicate, ParseError> {
    let field = parse_field_path(cur)?;

    cur.skip_whitespace();
    let op = parse_operator(cur)?;

    let value = if op.is_empty_shape() {
        None
    } else {
        cur.skip_whitespace();
        Some(value::parse_value(cur)?)
    };

    let predicate = FieldPredicate { field, op, value };
    validate::validate_predicate(&predicate)?;

    Ok(predicate)
}

/// `FieldPath := Ident ['.' Ident]` — a bare identifier or a two-segment
/// dotted path into a nested table.
fn parse_field_path(cur: &mut Cursor<'_>) -> Result<String, ParseError> {
    let start = cur.offset();
    let first = cur.eat_while(is_ident_char);
    if first.is_empty() {
        return Err(if cur.is_eof() {
            ParseError::UnexpectedEndOfInput { offset: start }
        } else {
            ParseError::UnexpectedToken {
                offset: start,
                fragment: cur.fragment_at(start),
            }
        });
    }

    if !cur.consume_literal(".") {
        return Ok(first.to_string());
    }

    let second = cur.eat_while(is_ident_char);
    if second.is_empty() {
        return Err(ParseError::UnexpectedToken {
            offset: cur.offset(),
            fragment: cur.fragment(),
        });
    }

    Ok(format!("{first}.{second}"))
}

/// Operator lexing tries two-word forms before single-token forms,
/// longest match first, so `not in` is never mis-lexed as a dangling
/// `not` and `>=` wins over `>`.
fn parse_operator(cur: &mut Cursor<'_>) -> Result<Operator, ParseError> {
    let start = cur.offset();

    if consume_word_seq(cur, &["is", "not", "empty"]) {
        return Ok(Operator::IsNotEmpty);
    }
    if consume_word_seq(cur, &["is", "empty"]) {
        return Ok(Operator::IsEmpty);
    }
    if consume_word_seq(cur, &["not", "like"]) {
        return Ok(Operator::NotLike);
    }
    if consume_word_seq(cur, &["not", "in"]) {
        return Ok(Operator::NotIn);
    }

    for (token, op) in [
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("!=", Operator::Ne),
        ("=", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
    ] {
        if cur.consume_literal(token) {
            return Ok(op);
        }
    }

    if cur.consume_keyword("in") {
        return Ok(Operator::In);
    }
    if cur.consume_keyword("like") {
        return Ok(Operator::Like);
    }

    Err(ParseError::ExpectedOperator {
        offset: start,
        fragment: cur.fragment_at(start),
    })
}

/// Consume a whitespace-separated keyword sequence, or nothing at all.
fn consume_word_seq(cur: &mut Cursor<'_>, words: &[&str]) -> bool {
    let mark = cur.offset();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            cur.skip_whitespace();
        }
        if !cur.consume_keyword(word) {
            cur.rewind(mark);
            return false;
        }
    }
    true
}

// ----------------------------------------------------------------------
// Trailing clauses
// ----------------------------------------------------------------------

/// `SortClause (',' SortClause)*` after the `order` keyword; direction
/// defaults to ascending.
fn parse_order_by(cur: &mut Cursor<'_>) -> Result<Vec<SortClause>, ParseError> {
    cur.skip_whitespace();
    if !cur.consume_keyword("by") {
        return Err(ParseError::ExpectedKeyword {
            keyword: "by",
            offset: cur.offset(),
            fragment: cur.fragment(),
        });
    }

    let mut clauses = Vec::new();
    loop {
        cur.skip_whitespace();
        let field = parse_field_path(cur)?;

        cur.skip_whitespace();
        let direction = if cur.consume_keyword("desc") {
            SortDirection::Desc
        } else {
            cur.consume_keyword("asc");
            SortDirection::Asc
        };
        clauses.push(SortClause { field, direction });

        cur.skip_whitespace();
        if !cur.consume_literal(",") {
            return Ok(clauses);
        }
    }
}

fn parse_limit(cur: &mut Cursor<'_>) -> Result<u32, ParseError> {
    cur.skip_whitespace();
    let value = parse_integer(cur)?;
    Ok(validate::check_limit(value)?)
}

fn parse_offset(cur: &mut Cursor<'_>) -> Result<u32, ParseError> {
    cur.skip_whitespace();
    let value = parse_integer(cur)?;
    Ok(validate::check_offset(value)?)
}

/// Pagination bounds take integers only; `50.5` is an invalid number
/// here even though it is a valid value literal.
fn parse_integer(cur: &mut Cursor<'_>) -> Result<i64, ParseError> {
    let start = cur.offset();
    if cur.is_eof() {
        return Err(ParseError::UnexpectedEndOfInput { offset: start });
    }

    let negative = cur.consume_literal("-");
    let body = cur.eat_while(|c| c.is_ascii_digit() || c == '.');
    if body.is_empty() || body.contains('.') {
        return Err(ParseError::InvalidNumber {
            offset: start,
            fragment: cur.fragment_at(start),
        });
    }

    let magnitude: i64 = body.parse().map_err(|_| ParseError::InvalidNumber {
        offset: start,
        fragment: cur.fragment_at(start),
    })?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Identifier characters: ASCII alphanumerics/underscore plus the record
/// service's native script ranges (hiragana, katakana, CJK unified
/// ideographs, full-width alphanumerics, half-width katakana).
fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || ('\u{3040}'..='\u{30FF}').contains(&c)
        || ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{FF10}'..='\u{FF19}').contains(&c)
        || ('\u{FF21}'..='\u{FF3A}').contains(&c)
        || ('\u{FF41}'..='\u{FF5A}').contains(&c)
        || ('\u{FF66}'..='\u{FF9D}').contains(&c)
}
