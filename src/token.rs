use std::fmt;
use serde::Serialize;

/// A classified slice of the source.
///
/// `text` is the exact slice `source[start..end()]` for every kind except
/// [`TokenKind::SectionName`], whose text has the surrounding brackets stripped while
/// `start` still points at the opening `[`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Token<'s> {
    pub kind: TokenKind,
    pub start: usize,
    pub text: &'s str,
}

impl<'s> Token<'s> {
    pub fn new(kind: TokenKind, start: usize, text: &'s str) -> Self {
        Self { kind, start, text }
    }

    /// Byte offset one past the token text. For section names this is two bytes short of
    /// the bracketed run, since the brackets are not part of the text.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Width of the token in the source, including the brackets of a section name.
    pub fn source_len(&self) -> usize {
        match self.kind {
            TokenKind::SectionName => self.text.len() + 2,
            _ => self.text.len(),
        }
    }

    /// Whether this token is significant for line-start detection.
    pub fn is_significant(&self) -> bool {
        self.kind != TokenKind::Whitespace
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}({:?}, {}..{})", self.kind, self.text, self.start, self.end())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    // Literals
    Null,          // null
    Bool,          // yes, no, on, off, true, false
    Number,        // 12, 1.5
    String,        // 'text', "text"

    // Logical operators
    Not,           // !
    Or,            // ||
    And,           // &&

    // Comparison operators
    Smaller,       // <
    Greater,       // >
    SmallerEqual,  // <=
    GreaterEqual,  // >=
    Equals,        // ==
    NotEqual,      // !=
    LongEquals,    // ===
    LongNotEquals, // !==

    // Arithmetic operators
    Add,           // +
    Subtract,      // -
    Multiply,      // *
    Divide,        // /
    FloorDiv,      // //
    Exponent,      // **
    Modulus,       // %
    UnaryMinus,    // synthesized by parsers, never scanned

    // Statement keywords
    Global,        // global
    Local,         // local
    Persist,       // persist
    Pre,           // pre
    Post,          // post

    // Conditionals
    If,            // if
    Elif,          // elif, else if
    Else,          // else
    Endif,         // endif

    // Punctuation
    Comma,         // ,
    Dot,           // .
    Equalsign,     // =
    OpenParen,     // (
    CloseParen,    // )
    Whitespace,    // runs of spaces and tabs
    LineBreak,     // \n or \r\n

    // Structural
    SectionName,   // [Name], stored without brackets
    Variable,      // $name
    Comment,       // ; comment, only first on a line
    Identifier,    // anything else
    KeyIdentifier, // anything else, first on its line

    EOF            // End of input marker
}

pub type TokenTable = [(&'static str, TokenKind)];

pub const LINE_BREAKS: &[&str] = &["\n", "\r\n"];

pub const LITERALS: &TokenTable = &[
    ("null", TokenKind::Null),
    ("yes", TokenKind::Bool),
    ("no", TokenKind::Bool),
    ("on", TokenKind::Bool),
    ("off", TokenKind::Bool),
    ("true", TokenKind::Bool),
    ("false", TokenKind::Bool),
];

pub const CONDITIONALS: &TokenTable = &[
    ("if", TokenKind::If),
    ("elif", TokenKind::Elif),
    ("else if", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("endif", TokenKind::Endif),
];

pub const ARITHMETIC: &TokenTable = &[
    ("+", TokenKind::Add),
    ("-", TokenKind::Subtract),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("//", TokenKind::FloorDiv),
    ("**", TokenKind::Exponent),
    ("%", TokenKind::Modulus),
];

pub const COMPARISON: &TokenTable = &[
    ("<", TokenKind::Smaller),
    (">", TokenKind::Greater),
    ("<=", TokenKind::SmallerEqual),
    (">=", TokenKind::GreaterEqual),
    ("==", TokenKind::Equals),
    ("===", TokenKind::LongEquals),
    ("!=", TokenKind::NotEqual),
    ("!==", TokenKind::LongNotEquals),
];

pub const KEYWORDS: &TokenTable = &[
    ("global", TokenKind::Global),
    ("local", TokenKind::Local),
    ("persist", TokenKind::Persist),
    ("pre", TokenKind::Pre),
    ("post", TokenKind::Post),
];

pub const LOGICAL: &TokenTable = &[
    ("||", TokenKind::Or),
    ("&&", TokenKind::And),
];

pub const SYMBOLS: &TokenTable = &[
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    ("=", TokenKind::Equalsign),
    ("!", TokenKind::Not),
];

pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Characters that continue a word; a keyword followed by one of these is not a keyword.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_is_derived_from_text() {
        let token = Token::new(TokenKind::Identifier, 4, "key");
        assert_eq!(token.end(), 7);
        assert_eq!(token.source_len(), 3);
    }

    #[test]
    fn section_name_spans_its_brackets() {
        let token = Token::new(TokenKind::SectionName, 0, "Main");
        assert_eq!(token.end(), 4);
        assert_eq!(token.source_len(), 6);
    }

    #[test]
    fn whitespace_is_not_significant() {
        assert!(!Token::new(TokenKind::Whitespace, 0, " ").is_significant());
        assert!(Token::new(TokenKind::LineBreak, 0, "\n").is_significant());
    }

    #[test]
    fn display_lists_kind_text_and_span() {
        let token = Token::new(TokenKind::Number, 2, "1.5");
        assert_eq!(token.to_string(), "Number(\"1.5\", 2..5)");
    }

    #[test]
    fn tables_have_no_duplicate_spellings() {
        let tables = [LITERALS, CONDITIONALS, ARITHMETIC, COMPARISON, KEYWORDS, LOGICAL, SYMBOLS];
        for table in tables {
            for (i, (word, _)) in table.iter().enumerate() {
                assert!(table[i + 1..].iter().all(|(other, _)| other != word), "{word} repeated");
            }
        }
    }
}
