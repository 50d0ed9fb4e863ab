use std::ops::Index;
use std::slice;

use crate::diagnostics::Diagnostic;
use crate::error::{InilexError, Result};
use crate::pretty;
use crate::token::{Token, TokenKind};

/// The materialized output of a scan: every token in source order, terminated by an
/// `EOF` token, plus the warnings raised on the way.
#[derive(Debug, Clone)]
pub struct TokenStream<'s> {
    source: &'s str,
    tokens: Vec<Token<'s>>,
    diagnostics: Vec<Diagnostic>,
    indent: String,
}

impl<'s> TokenStream<'s> {
    pub(crate) fn new(
        source: &'s str,
        tokens: Vec<Token<'s>>,
        diagnostics: Vec<Diagnostic>,
        indent: String,
    ) -> Self {
        Self { source, tokens, diagnostics, indent }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn tokens(&self) -> &[Token<'s>] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token<'s>> {
        self.tokens
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> slice::Iter<'_, Token<'s>> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token<'s>> {
        self.tokens.get(index)
    }

    /// The token `n` places from the end, so `lookback(1)` is the last token.
    /// `None` for `n == 0` or when `n` runs past the start.
    pub fn lookback(&self, n: usize) -> Option<&Token<'s>> {
        if n == 0 || n > self.tokens.len() {
            return None;
        }
        self.tokens.get(self.tokens.len() - n)
    }

    /// Tokens other than whitespace, in order.
    pub fn significant(&self) -> impl Iterator<Item = &Token<'s>> {
        self.tokens.iter().filter(|t| t.is_significant())
    }

    /// Concatenated token text, with section names put back inside their brackets.
    /// Always equal to the scanned source.
    pub fn reconstruct(&self) -> String {
        let mut text = String::with_capacity(self.source.len());
        for token in &self.tokens {
            match token.kind {
                TokenKind::SectionName => {
                    text.push('[');
                    text.push_str(token.text);
                    text.push(']');
                }
                _ => text.push_str(token.text),
            }
        }
        text
    }

    /// Normalized source, re-indented inside `if` blocks with the configured indent unit.
    pub fn pretty_print(&self) -> String {
        pretty::pretty_print(&self.tokens, &self.indent)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.tokens).map_err(InilexError::Serialize)
    }
}

impl<'s> Index<usize> for TokenStream<'s> {
    type Output = Token<'s>;

    fn index(&self, index: usize) -> &Token<'s> {
        &self.tokens[index]
    }
}

impl<'a, 's> IntoIterator for &'a TokenStream<'s> {
    type Item = &'a Token<'s>;
    type IntoIter = slice::Iter<'a, Token<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
