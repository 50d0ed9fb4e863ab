use crate::token::{is_word_char, TokenKind, TokenTable, LINE_BREAKS};

/// Forward cursor over the source text.
///
/// Positions are byte offsets, counts passed to [`Cursor::advance`] and
/// [`Cursor::retreat`] are characters.
pub struct Cursor<'s> {
    source: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    /// The character `offset` characters ahead of the cursor.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Moves forward by `n` characters and returns the consumed slice.
    pub fn advance(&mut self, n: usize) -> &'s str {
        let start = self.pos;
        let len: usize = self.rest().chars().take(n).map(char::len_utf8).sum();
        self.pos += len;
        &self.source[start..self.pos]
    }

    /// Moves back by `n` characters and returns the slice now ahead of the cursor.
    pub fn retreat(&mut self, n: usize) -> &'s str {
        let end = self.pos;
        let len: usize = self.source[..end].chars().rev().take(n).map(char::len_utf8).sum();
        self.pos -= len;
        &self.source[self.pos..end]
    }

    /// Consumes `literal`, which the caller has already matched at the cursor.
    pub fn eat(&mut self, literal: &str) -> &'s str {
        debug_assert!(self.matches_literal(literal));
        self.advance(literal.chars().count())
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        while let Some(c) = self.peek(0) {
            if !predicate(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.source[start..self.pos]
    }

    /// Consumes up to, not including, the next line break.
    pub fn eat_line(&mut self) -> &'s str {
        let start = self.pos;
        while !self.is_eof() && self.line_break().is_none() {
            self.advance(1);
        }
        &self.source[start..self.pos]
    }

    pub fn matches_literal(&self, candidate: &str) -> bool {
        self.rest().starts_with(candidate)
    }

    /// The longest table entry whose spelling starts at the cursor.
    pub fn best_match<'t>(&self, table: &'t TokenTable) -> Option<&'t (&'static str, TokenKind)> {
        table
            .iter()
            .filter(|(word, _)| self.matches_literal(word))
            .max_by_key(|(word, _)| word.len())
    }

    /// Like [`Cursor::best_match`], but only accepts entries that are not immediately
    /// followed by another word character.
    pub fn best_word_match<'t>(
        &self,
        table: &'t TokenTable,
    ) -> Option<&'t (&'static str, TokenKind)> {
        let rest = self.rest();
        table
            .iter()
            .filter(|(word, _)| {
                rest.starts_with(word) && !rest[word.len()..].starts_with(is_word_char)
            })
            .max_by_key(|(word, _)| word.len())
    }

    /// The line break sequence at the cursor, if any.
    pub fn line_break(&self) -> Option<&'static str> {
        LINE_BREAKS
            .iter()
            .copied()
            .filter(|lb| self.matches_literal(lb))
            .max_by_key(|lb| lb.len())
    }

    /// Looks for `target` on the current line, skipping the first `skip` characters.
    ///
    /// Returns `Ok` with the byte offset (relative to the cursor) of `target`, or `Err`
    /// with the offset of the line break or end of input that stopped the search.
    pub fn find_on_line(&self, skip: usize, target: char) -> Result<usize, usize> {
        let rest = self.rest();
        for (i, c) in rest.char_indices().skip(skip) {
            if c == target {
                return Ok(i);
            }
            if c == '\n' || (c == '\r' && rest[i + 1..].starts_with('\n')) {
                return Err(i);
            }
        }
        Err(rest.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{COMPARISON, CONDITIONALS, LITERALS};

    #[test]
    fn peek_does_not_move() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(1), Some('b'));
        assert_eq!(cursor.peek(2), None);
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn advance_and_retreat_are_inverse() {
        let mut cursor = Cursor::new("héllo");
        assert_eq!(cursor.advance(2), "hé");
        assert_eq!(cursor.pos(), 3);
        assert_eq!(cursor.retreat(1), "é");
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.advance(10), "éllo");
        assert!(cursor.is_eof());
    }

    #[test]
    fn best_match_prefers_longest() {
        let cursor = Cursor::new("=== 1");
        assert_eq!(cursor.best_match(COMPARISON), Some(&("===", TokenKind::LongEquals)));

        let cursor = Cursor::new("= 1");
        assert_eq!(cursor.best_match(COMPARISON), None);
    }

    #[test]
    fn best_word_match_respects_word_boundaries() {
        let cursor = Cursor::new("else if $a");
        assert_eq!(cursor.best_word_match(CONDITIONALS), Some(&("else if", TokenKind::Elif)));

        let cursor = Cursor::new("else iffy");
        assert_eq!(cursor.best_word_match(CONDITIONALS), Some(&("else", TokenKind::Else)));

        let cursor = Cursor::new("node");
        assert_eq!(cursor.best_word_match(LITERALS), None);
    }

    #[test]
    fn line_break_prefers_crlf() {
        assert_eq!(Cursor::new("\r\nx").line_break(), Some("\r\n"));
        assert_eq!(Cursor::new("\nx").line_break(), Some("\n"));
        assert_eq!(Cursor::new("\rx").line_break(), None);
    }

    #[test]
    fn find_on_line_stops_at_line_break() {
        let cursor = Cursor::new("[abc]\n");
        assert_eq!(cursor.find_on_line(1, ']'), Ok(4));

        let cursor = Cursor::new("[abc\r\n]");
        assert_eq!(cursor.find_on_line(1, ']'), Err(4));

        let cursor = Cursor::new("'abc");
        assert_eq!(cursor.find_on_line(1, '\''), Err(4));
    }

    #[test]
    fn eat_line_excludes_line_break() {
        let mut cursor = Cursor::new("; note\r\nnext");
        assert_eq!(cursor.eat_line(), "; note");
        assert_eq!(cursor.line_break(), Some("\r\n"));
    }
}
