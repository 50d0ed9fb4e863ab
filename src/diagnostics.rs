//! Warnings raised while scanning.
//!
//! The scanner never fails. When a delimited construct is left open it emits a
//! [`Diagnostic`], degrades the opening delimiter to an identifier and keeps going.
//! Diagnostics are handed to a [`DiagnosticConsumer`], which decides how the host
//! surfaces them.

use std::fmt;
use std::io::{self, BufWriter, Write};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// A `[` at line start with no `]` before the line ends.
    UnterminatedHeader,
    /// A quote with no matching quote before the line ends.
    UnterminatedString,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagnosticKind::UnterminatedHeader => write!(f, "header unclosed"),
            DiagnosticKind::UnterminatedString => write!(f, "string unclosed"),
        }
    }
}

/// A non-fatal scanning warning. `line` and `column` are 1-based and point at the place
/// the closing delimiter was expected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("warning: {kind} at {line}:{column}, reading as identifier instead")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, offset: usize, line: usize, column: usize) -> Self {
        Self { kind, offset, line, column }
    }
}

/// Receives diagnostics as the scanner emits them.
pub trait DiagnosticConsumer {
    fn handle_diagnostic(&mut self, diag: &Diagnostic);
    fn flush(&mut self) {}
}

impl DiagnosticConsumer for Vec<Diagnostic> {
    fn handle_diagnostic(&mut self, diag: &Diagnostic) {
        self.push(diag.clone());
    }
}

pub struct NullDiagnosticConsumer;

impl DiagnosticConsumer for NullDiagnosticConsumer {
    fn handle_diagnostic(&mut self, _diag: &Diagnostic) {}
}

/// Writes one line per diagnostic to a stream, flushing after each line so a warning
/// shows up while the scan is still running. Write failures are dropped, since a
/// warning that cannot be printed must not stop the scan.
pub struct StreamDiagnosticConsumer<W: Write> {
    stream: BufWriter<W>,
}

impl<W: Write> StreamDiagnosticConsumer<W> {
    pub fn new(stream: W) -> Self {
        Self { stream: BufWriter::new(stream) }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.stream.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> DiagnosticConsumer for StreamDiagnosticConsumer<W> {
    fn handle_diagnostic(&mut self, diag: &Diagnostic) {
        let _ = writeln!(self.stream, "[lexer] {}", diag);
        let _ = self.stream.flush();
    }

    fn flush(&mut self) {
        let _ = self.stream.flush();
    }
}

pub fn console_diagnostic_consumer() -> StreamDiagnosticConsumer<io::Stderr> {
    StreamDiagnosticConsumer::new(io::stderr())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// A writer whose bytes stay readable while a consumer owns a handle to it.
    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn display_names_kind_and_position() {
        let diag = Diagnostic::new(DiagnosticKind::UnterminatedString, 10, 2, 7);
        assert_eq!(
            diag.to_string(),
            "warning: string unclosed at 2:7, reading as identifier instead"
        );
    }

    #[test]
    fn vec_consumer_collects() {
        let mut diags: Vec<Diagnostic> = Vec::new();
        diags.handle_diagnostic(&Diagnostic::new(DiagnosticKind::UnterminatedHeader, 0, 1, 1));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnterminatedHeader);
    }

    #[test]
    fn stream_consumer_writes_lines() {
        let mut consumer = StreamDiagnosticConsumer::new(Vec::new());
        consumer.handle_diagnostic(&Diagnostic::new(DiagnosticKind::UnterminatedHeader, 5, 1, 6));
        consumer.flush();
        let written = String::from_utf8(consumer.into_inner().unwrap()).unwrap();
        assert_eq!(
            written,
            "[lexer] warning: header unclosed at 1:6, reading as identifier instead\n"
        );
    }

    #[test]
    fn stream_consumer_emits_each_warning_immediately() {
        let buffer = SharedBuffer::default();
        let mut consumer = StreamDiagnosticConsumer::new(buffer.clone());

        consumer.handle_diagnostic(&Diagnostic::new(DiagnosticKind::UnterminatedString, 3, 1, 4));
        assert_eq!(
            String::from_utf8_lossy(&buffer.0.borrow()),
            "[lexer] warning: string unclosed at 1:4, reading as identifier instead\n"
        );

        consumer.handle_diagnostic(&Diagnostic::new(DiagnosticKind::UnterminatedHeader, 9, 2, 5));
        assert_eq!(String::from_utf8_lossy(&buffer.0.borrow()).lines().count(), 2);
    }
}
