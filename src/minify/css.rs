//! CSS minification with lightningcss.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

use crate::error::TransformError;

/// Minify CSS source code.
pub fn minify(source: &str, line_break: Option<usize>) -> Result<String, TransformError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| TransformError::Syntax(e.to_string()))?;
    let code = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| TransformError::Syntax(e.to_string()))?
        .code;

    Ok(match line_break {
        Some(column) => super::insert_line_breaks(&code, rule_ends(&code), column),
        None => code,
    })
}

/// Offsets just past every `}` that is not inside a quoted string
fn rule_ends(code: &str) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in code.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '}' => ends.push(i + 1),
            None => {}
        }
    }
    ends
}
