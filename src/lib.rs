//! Scanner for INI-like configuration scripts.
//!
//! Sources are made of `[Section]` headers, `key = value` lines, `$variable` references,
//! arithmetic, comparison and logical expressions, and `if`/`elif`/`else`/`endif`
//! blocks. [`tokenize`] turns such a source into a [`TokenStream`] that a parser can
//! walk, keeping enough text and position to rebuild the source exactly
//! ([`TokenStream::reconstruct`]) or in normalized form ([`TokenStream::pretty_print`]).

pub mod config;
pub mod cursor;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod pretty;
pub mod stream;
pub mod token;

pub use config::{LexerConfig, VariableNames};
pub use diagnostics::{Diagnostic, DiagnosticConsumer, DiagnosticKind};
pub use error::InilexError;
pub use lexer::{line_col, tokenize, Lexer};
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
