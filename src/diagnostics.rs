//! # Diagnostics Module
//!
//! Canale strutturato per i messaggi emessi dai minifier (oggi solo JavaScript).
//!
//! ## Responsabilità:
//! - `Diagnostic`: messaggio, nome sorgente, riga, colonna, severità
//! - `DiagnosticSink`: capability passata al minifier per riportare i messaggi
//! - `LoggingSink`: implementazione che logga con `tracing` e ricorda i fatal
//!
//! Warning ed errori non interrompono il file; un `Fatal` fa fallire la
//! compressione del file e quindi l'intero batch.

use std::fmt;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub source_name: String,
    /// 1-based, `None` when the position is unknown
    pub line: Option<usize>,
    /// 1-based column within `line`
    pub line_offset: Option<usize>,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(severity: Severity, source_name: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_name: source_name.to_string(),
            line: None,
            line_offset: None,
            severity,
        }
    }

    /// Attach a position given as a byte offset into `source`
    pub fn at_offset(mut self, source: &str, offset: usize) -> Self {
        let (line, column) = line_and_column(source, offset);
        self.line = Some(line);
        self.line_offset = Some(column);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.line_offset) {
            (Some(line), Some(column)) => {
                write!(f, "{}:{}:{}: {}", self.source_name, line, column, self.message)
            }
            _ => write!(f, "{}: {}", self.source_name, self.message),
        }
    }
}

/// Receiver of minifier diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Logs every diagnostic and keeps the first fatal one
#[derive(Debug, Default)]
pub struct LoggingSink {
    warnings: usize,
    errors: usize,
    fatal: Option<Diagnostic>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.fatal.as_ref()
    }
}

impl DiagnosticSink for LoggingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => {
                self.warnings += 1;
                warn!("{}", diagnostic);
            }
            Severity::Error => {
                self.errors += 1;
                error!("{}", diagnostic);
            }
            Severity::Fatal => {
                error!("{}", diagnostic);
                if self.fatal.is_none() {
                    self.fatal = Some(diagnostic);
                }
            }
        }
    }
}

/// Keeps diagnostics in memory
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

fn line_and_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
