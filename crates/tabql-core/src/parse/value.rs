//! Value-position lexing: arrays, strings, function calls, numbers.

use crate::{
    ast::{FunctionCall, FunctionName, Value},
    cursor::Cursor,
    error::ParseError,
};

/// `Value := Array | String | FunctionCall | Number`
pub(super) fn parse_value(cur: &mut Cursor<'_>) -> Result<Value, ParseError> {
    cur.skip_whitespace();
    match cur.peek() {
        None => Err(ParseError::UnexpectedEndOfInput {
            offset: cur.offset(),
        }),
        Some('(') => parse_array(cur),
        Some('"') => parse_string(cur).map(Value::Text),
        Some(c) if c.is_ascii_uppercase() || c == '_' => parse_function(cur).map(Value::Func),
        Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => {
            parse_number(cur).map(Value::Number)
        }
        Some(_) => Err(ParseError::UnexpectedToken {
            offset: cur.offset(),
            fragment: cur.fragment(),
        }),
    }
}

/// Parenthesized, comma-separated list of scalar or function elements.
fn parse_array(cur: &mut Cursor<'_>) -> Result<Value, ParseError> {
    cur.expect_literal("(")?;

    cur.skip_whitespace();
    let mut items = Vec::new();
    if cur.consume_literal(")") {
        return Ok(Value::List(items));
    }

    loop {
        items.push(parse_element(cur)?);
        cur.skip_whitespace();
        if cur.consume_literal(",") {
            continue;
        }
        cur.expect_literal(")")?;
        return Ok(Value::List(items));
    }
}

/// Array element: any value form except a nested array.
fn parse_element(cur: &mut Cursor<'_>) -> Result<Value, ParseError> {
    cur.skip_whitespace();
    match cur.peek() {
        None => Err(ParseError::UnexpectedEndOfInput {
            offset: cur.offset(),
        }),
        Some('"') => parse_string(cur).map(Value::Text),
        Some(c) if c.is_ascii_uppercase() || c == '_' => parse_function(cur).map(Value::Func),
        Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => {
            parse_number(cur).map(Value::Number)
        }
        Some(_) => Err(ParseError::UnexpectedToken {
            offset: cur.offset(),
            fragment: cur.fragment(),
        }),
    }
}

/// `"`-delimited literal. Inside, a backslash escapes the next character,
/// so `\"` and `\\` are literal; the closing quote is the first
/// unescaped `"`.
fn parse_string(cur: &mut Cursor<'_>) -> Result<String, ParseError> {
    let start = cur.offset();
    cur.expect_literal("\"")?;

    let mut text = String::new();
    loop {
        match cur.bump() {
            None => return Err(ParseError::UnterminatedString { offset: start }),
            Some('"') => return Ok(text),
            Some('\\') => match cur.bump() {
                None => return Err(ParseError::UnterminatedString { offset: start }),
                Some(escaped) => text.push(escaped),
            },
            Some(c) => text.push(c),
        }
    }
}

/// Function detection: a run of uppercase letters/underscore immediately
/// followed by `(`. Looks ahead without consuming on failure.
fn parse_function(cur: &mut Cursor<'_>) -> Result<FunctionCall, ParseError> {
    let start = cur.offset();
    let lexeme = cur.eat_while(|c| c.is_ascii_uppercase() || c == '_');

    if cur.peek() != Some('(') {
        cur.rewind(start);
        return Err(ParseError::UnexpectedToken {
            offset: start,
            fragment: cur.fragment(),
        });
    }

    // The vocabulary is closed; an unknown name is not a new function.
    let Some(name) = FunctionName::resolve(lexeme) else {
        return Err(ParseError::UnexpectedToken {
            offset: start,
            fragment: cur.fragment_at(start),
        });
    };

    cur.expect_literal("(")?;
    cur.skip_whitespace();

    let mut args = Vec::new();
    if cur.consume_literal(")") {
        return Ok(FunctionCall { name, args });
    }

    loop {
        args.push(parse_function_arg(cur)?);
        cur.skip_whitespace();
        if cur.consume_literal(",") {
            continue;
        }
        cur.expect_literal(")")?;
        return Ok(FunctionCall { name, args });
    }
}

/// Function argument: a number, a quoted string, or a bare `[A-Z_]+`
/// grammar constant (e.g. a time unit), lexed as text.
fn parse_function_arg(cur: &mut Cursor<'_>) -> Result<Value, ParseError> {
    cur.skip_whitespace();
    match cur.peek() {
        None => Err(ParseError::UnexpectedEndOfInput {
            offset: cur.offset(),
        }),
        Some('"') => parse_string(cur).map(Value::Text),
        Some(c) if c.is_ascii_uppercase() || c == '_' => {
            let constant = cur.eat_while(|c| c.is_ascii_uppercase() || c == '_');
            Ok(Value::Text(constant.to_string()))
        }
        Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => {
            parse_number(cur).map(Value::Number)
        }
        Some(_) => Err(ParseError::UnexpectedToken {
            offset: cur.offset(),
            fragment: cur.fragment(),
        }),
    }
}

/// `Number := ['-'] (digit | '.')+`, validated by float parsing.
fn parse_number(cur: &mut Cursor<'_>) -> Result<f64, ParseError> {
    let start = cur.offset();
    let negative = cur.consume_literal("-");
    let body = cur.eat_while(|c| c.is_ascii_digit() || c == '.');

    let parsed = if body.is_empty() {
        None
    } else {
        body.parse::<f64>().ok()
    };
    let Some(magnitude) = parsed else {
        return Err(ParseError::InvalidNumber {
            offset: start,
            fragment: cur.fragment_at(start),
        });
    };

    Ok(if negative { -magnitude } else { magnitude })
}
