//! # Minify Module
//!
//! Questo modulo sceglie e invoca il minifier giusto per ogni `FileType`.
//!
//! ## Minifier per categoria:
//! - **JavaScript**: `oxc` (parser, minifier, mangler, codegen)
//! - **CSS**: `lightningcss`
//! - **HTML / XHTML**: `minify-html` (XHTML mantiene tag di chiusura e `<html>`/`<head>`)
//! - **XML**: passata a eventi con `quick-xml` (rimuove commenti e spazi tra tag)
//!
//! ## Contratto:
//! - Input: testo già decodificato con il charset configurato
//! - Output: testo minificato, da ricodificare con lo stesso charset
//! - I messaggi del parser JavaScript passano per un `DiagnosticSink`
//!
//! Il dispatch è un `match` esaustivo su `FileType`: aggiungere una categoria
//! senza il suo minifier non compila.

pub mod css;
pub mod html;
pub mod js;
pub mod xml;

use crate::config::{Config, JsOptions};
use crate::diagnostics::DiagnosticSink;
use crate::error::TransformError;
use crate::file_type::FileType;

/// Turns the decoded text of one file into its minified form
pub trait Transformer {
    fn transform(
        &self,
        file_type: FileType,
        source_name: &str,
        source: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<String, TransformError>;
}

/// Production minifier set
#[derive(Debug, Clone, Default)]
pub struct Minifier {
    js: JsOptions,
    line_break: Option<usize>,
}

impl Minifier {
    pub fn new(config: &Config) -> Self {
        Self {
            js: config.js.clone(),
            line_break: config.line_break,
        }
    }
}

impl Transformer for Minifier {
    fn transform(
        &self,
        file_type: FileType,
        source_name: &str,
        source: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<String, TransformError> {
        match file_type {
            FileType::JavaScript => {
                js::minify(source, source_name, &self.js, self.line_break, diagnostics)
            }
            FileType::Css => css::minify(source, self.line_break),
            FileType::Html => html::minify(source, false),
            FileType::Xhtml => html::minify(source, true),
            FileType::Xml => xml::minify(source),
        }
    }
}

/// Identity transformer: output equals input
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Transformer for PassThrough {
    fn transform(
        &self,
        _file_type: FileType,
        _source_name: &str,
        source: &str,
        _diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<String, TransformError> {
        Ok(source.to_string())
    }
}

/// Insert a newline at the first break position past `column` on each line.
///
/// `positions` are byte offsets into `text` where a newline is safe; they must
/// be sorted and on char boundaries.
pub(crate) fn insert_line_breaks<I>(text: &str, positions: I, column: usize) -> String
where
    I: IntoIterator<Item = usize>,
{
    let mut out = String::with_capacity(text.len() + text.len() / column.max(16));
    let mut copied = 0;
    let mut line_start = 0;

    for pos in positions {
        if pos <= copied || pos >= text.len() || text[pos..].starts_with('\n') {
            continue;
        }
        if let Some(newline) = text[line_start..pos].rfind('\n') {
            line_start += newline + 1;
        }
        if pos - line_start > column {
            out.push_str(&text[copied..pos]);
            out.push('\n');
            copied = pos;
            line_start = pos;
        }
    }

    out.push_str(&text[copied..]);
    out
}
