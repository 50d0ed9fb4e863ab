use crate::config::LexerConfig;
use crate::cursor::Cursor;
use crate::diagnostics::{Diagnostic, DiagnosticConsumer, DiagnosticKind, NullDiagnosticConsumer};
use crate::stream::TokenStream;
use crate::token::{
    is_blank, Token, TokenKind, ARITHMETIC, COMPARISON, CONDITIONALS, KEYWORDS, LITERALS, LOGICAL,
    SYMBOLS,
};

// Known vocabulary is matched here. Anything the scanner does not know becomes an
// Identifier, or a KeyIdentifier when it opens a line, and is left for the parser.
pub struct Lexer<'s> {
    source: &'s str,
    cursor: Cursor<'s>,
    tokens: Vec<Token<'s>>,
    diagnostics: Vec<Diagnostic>,
    last_significant: Option<Token<'s>>,
    variable_start: fn(char) -> bool,
    variable_char: fn(char) -> bool,
    indent: String,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self::with_config(source, &LexerConfig::default())
    }

    pub fn with_config(source: &'s str, config: &LexerConfig) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            last_significant: None,
            variable_start: config.variable_names.first(),
            variable_char: config.variable_names.rest(),
            indent: config.indent.clone(),
        }
    }

    /// Replaces the rule for characters allowed after `$`, first character included.
    pub fn with_variable_chars(mut self, predicate: fn(char) -> bool) -> Self {
        self.variable_start = predicate;
        self.variable_char = predicate;
        self
    }

    pub fn tokenize(self) -> TokenStream<'s> {
        self.tokenize_with(&mut NullDiagnosticConsumer)
    }

    pub fn tokenize_with(mut self, diags: &mut dyn DiagnosticConsumer) -> TokenStream<'s> {
        while !self.cursor.is_eof() {
            let start = self.cursor.pos();
            let (kind, text) = self.scan_token(diags);
            assert!(self.cursor.pos() > start, "lexer made no progress at offset {}", start);
            self.add_token(kind, start, text);
        }
        self.add_token(TokenKind::EOF, self.source.len(), "");
        diags.flush();

        TokenStream::new(self.source, self.tokens, self.diagnostics, self.indent)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize, text: &'s str) {
        let token = Token::new(kind, start, text);
        self.tokens.push(token);
        if token.is_significant() {
            self.last_significant = Some(token);
        }
    }

    /// True when nothing but blanks precedes the cursor on its line. The start of input
    /// counts as a line start.
    fn at_line_start(&self) -> bool {
        match self.last_significant {
            None => true,
            Some(token) => token.kind == TokenKind::LineBreak,
        }
    }

    fn warn(&mut self, kind: DiagnosticKind, offset: usize, diags: &mut dyn DiagnosticConsumer) {
        let (line, column) = line_col(self.source, offset);
        let diagnostic = Diagnostic::new(kind, offset, line, column);
        diags.handle_diagnostic(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    // Families are tried in a fixed order; within a family the longest spelling wins.
    fn scan_token(&mut self, diags: &mut dyn DiagnosticConsumer) -> (TokenKind, &'s str) {
        let c = match self.cursor.peek(0) {
            Some(c) => c,
            None => return (TokenKind::EOF, ""),
        };

        if is_blank(c) {
            return (TokenKind::Whitespace, self.cursor.eat_while(is_blank));
        }

        if let Some(line_break) = self.cursor.line_break() {
            return (TokenKind::LineBreak, self.cursor.eat(line_break));
        }

        if c == ';' && self.at_line_start() {
            return (TokenKind::Comment, self.cursor.eat_line());
        }

        match c {
            '(' => return (TokenKind::OpenParen, self.cursor.advance(1)),
            ')' => return (TokenKind::CloseParen, self.cursor.advance(1)),
            '[' if self.at_line_start() => return self.section_header(diags),
            '$' => return self.variable(),
            '0'..='9' => return self.number(),
            '\'' | '"' => return self.string(c, diags),
            _ => {}
        }

        // The flag asks for a word boundary after the match. Conditionals get one too, so
        // `endifx` or `iffy` stay identifiers instead of a keyword glued to a fallback run.
        let families = [
            (LITERALS, true),
            (CONDITIONALS, true),
            (ARITHMETIC, false),
            (COMPARISON, false),
            (KEYWORDS, true),
            (LOGICAL, false),
            (SYMBOLS, false),
        ];
        for (table, whole_word) in families {
            let found = if whole_word {
                self.cursor.best_word_match(table)
            } else {
                self.cursor.best_match(table)
            };
            if let Some(&(word, kind)) = found {
                return (kind, self.cursor.eat(word));
            }
        }

        self.identifier()
    }

    fn section_header(&mut self, diags: &mut dyn DiagnosticConsumer) -> (TokenKind, &'s str) {
        match self.cursor.find_on_line(1, ']') {
            Ok(close) => {
                let len = self.source[self.cursor.pos()..][..=close].chars().count();
                let run = self.cursor.advance(len);
                (TokenKind::SectionName, &run[1..run.len() - 1])
            }
            Err(stop) => {
                self.warn(DiagnosticKind::UnterminatedHeader, self.cursor.pos() + stop, diags);
                (TokenKind::Identifier, self.cursor.advance(1))
            }
        }
    }

    fn variable(&mut self) -> (TokenKind, &'s str) {
        let start = self.cursor.pos();
        self.cursor.advance(1);
        if self.cursor.peek(0).map_or(false, self.variable_start) {
            self.cursor.advance(1);
            self.cursor.eat_while(self.variable_char);
        }
        (TokenKind::Variable, &self.source[start..self.cursor.pos()])
    }

    fn number(&mut self) -> (TokenKind, &'s str) {
        let start = self.cursor.pos();
        self.cursor.eat_while(|c| c.is_ascii_digit());
        if self.cursor.peek(0) == Some('.') {
            self.cursor.advance(1);
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }
        (TokenKind::Number, &self.source[start..self.cursor.pos()])
    }

    fn string(&mut self, quote: char, diags: &mut dyn DiagnosticConsumer) -> (TokenKind, &'s str) {
        match self.cursor.find_on_line(1, quote) {
            Ok(close) => {
                let len = self.source[self.cursor.pos()..][..=close].chars().count();
                (TokenKind::String, self.cursor.advance(len))
            }
            Err(stop) => {
                self.warn(DiagnosticKind::UnterminatedString, self.cursor.pos() + stop, diags);
                (TokenKind::Identifier, self.cursor.advance(1))
            }
        }
    }

    fn identifier(&mut self) -> (TokenKind, &'s str) {
        let start = self.cursor.pos();
        while !self.cursor.is_eof() && self.cursor.line_break().is_none() {
            match self.cursor.peek(0) {
                Some(c) if is_blank(c) => break,
                _ => self.cursor.advance(1),
            };
        }
        let kind = if self.at_line_start() {
            TokenKind::KeyIdentifier
        } else {
            TokenKind::Identifier
        };
        (kind, &self.source[start..self.cursor.pos()])
    }
}

/// 1-based line and column of a byte offset. Only used on the diagnostic path, so it
/// rescans from the start instead of keeping a line index.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for c in source[..offset.min(source.len())].chars() {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Scans `source` with the default configuration.
pub fn tokenize(source: &str) -> TokenStream<'_> {
    Lexer::new(source).tokenize()
}
