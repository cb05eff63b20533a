use crate::error::ParseError;

/// Characters that may legally follow a keyword, besides whitespace or
/// end of input. Keeps `order` from matching inside a longer identifier.
const KEYWORD_BOUNDARY: [char; 7] = ['(', ')', '=', '!', '<', '>', ','];

/// Upper bound on the fragment text embedded in parse errors.
const FRAGMENT_CHARS: usize = 24;

///
/// Cursor
///
/// Position-tracking view over the trimmed input text: lookahead,
/// literal-token consumption, and keyword-boundary detection. The offset
/// is parse-local mutable state owned exclusively by one parse call; a
/// cursor is single-use and never shared across parses.
///

#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input: input.trim(),
            offset: 0,
        }
    }

    /// Current byte offset into the trimmed input.
    pub(crate) const fn offset(&self) -> usize {
        self.offset
    }

    /// Rewind to a previously saved offset (backtracking).
    pub(crate) const fn rewind(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Unconsumed remainder of the input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Advance past `literal` iff it is present at the offset.
    pub(crate) fn consume_literal(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.offset += literal.len();
            true
        } else {
            false
        }
    }

    /// As `consume_literal`, but failure is fatal.
    pub(crate) fn expect_literal(&mut self, literal: &str) -> Result<(), ParseError> {
        if self.consume_literal(literal) {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                offset: self.offset,
                fragment: self.fragment(),
            })
        }
    }

    /// True iff `word` is present at the offset with a keyword boundary
    /// after it. Does not consume.
    pub(crate) fn peek_keyword(&self, word: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(word) {
            return false;
        }
        match rest[word.len()..].chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || KEYWORD_BOUNDARY.contains(&c),
        }
    }

    /// Advance past `word` iff present at the offset and followed by a
    /// keyword boundary (absent, whitespace, or one of `()=!<>,`).
    pub(crate) fn consume_keyword(&mut self, word: &str) -> bool {
        if self.peek_keyword(word) {
            self.offset += word.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.offset += c.len_utf8();
        }
    }

    /// Consume the longest run of characters satisfying `pred`,
    /// returning the consumed slice.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.offset += c.len_utf8();
        }
        &self.input[start..self.offset]
    }

    /// Bounded snippet of the remaining input, for error messages.
    pub(crate) fn fragment(&self) -> String {
        fragment_of(self.rest())
    }

    /// Bounded snippet starting at an arbitrary saved offset.
    pub(crate) fn fragment_at(&self, offset: usize) -> String {
        fragment_of(&self.input[offset..])
    }
}

fn fragment_of(rest: &str) -> String {
    rest.chars().take(FRAGMENT_CHARS).collect()
}
