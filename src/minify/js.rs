//! JavaScript minification with oxc.
//!
//! Parse errors are reported to the sink as errors, followed by one fatal
//! diagnostic; the file is then rejected. With `warn` enabled the semantic
//! checker runs as well and its findings are reported as warnings.
//!
//! Sources are parsed as classic scripts: top-level declarations are globals
//! shared with other files and pages, so they are never renamed or dropped.

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::diagnostics::OxcDiagnostic;
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::{GetSpan, SourceType};

use crate::config::JsOptions;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::error::TransformError;

/// Minify JavaScript source code.
pub fn minify(
    source: &str,
    source_name: &str,
    options: &JsOptions,
    line_break: Option<usize>,
    sink: &mut dyn DiagnosticSink,
) -> Result<String, TransformError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::script()).parse();
    if !ret.errors.is_empty() {
        for error in &ret.errors {
            sink.report(to_diagnostic(Severity::Error, source_name, source, error));
        }
        let message = format!("{} syntax error(s), file not minified", ret.errors.len());
        sink.report(Diagnostic::new(Severity::Fatal, source_name, message.clone()));
        return Err(TransformError::Fatal(message));
    }
    let mut program = ret.program;

    if options.warn {
        let checked = SemanticBuilder::new()
            .with_check_syntax_error(true)
            .build(&program);
        for error in &checked.errors {
            sink.report(to_diagnostic(Severity::Warning, source_name, source, error));
        }
    }

    let minifier_options = MinifierOptions {
        mangle: options.munge.then(MangleOptions::default),
        compress: options.optimize.then(CompressOptions::smallest),
    };
    let ret = Minifier::new(minifier_options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;

    Ok(match line_break {
        Some(column) => wrap_statements(&code, column),
        None => code,
    })
}

/// Break lines between top-level statements of already minified code.
fn wrap_statements(code: &str, column: usize) -> String {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, code, SourceType::script()).parse();
    if !ret.errors.is_empty() {
        return code.to_string();
    }

    let mut ends: Vec<usize> = ret
        .program
        .directives
        .iter()
        .map(|directive| directive.span.end as usize)
        .chain(ret.program.body.iter().map(|stmt| stmt.span().end as usize))
        .collect();
    ends.sort_unstable();

    super::insert_line_breaks(code, ends, column)
}

fn to_diagnostic(
    severity: Severity,
    source_name: &str,
    source: &str,
    error: &OxcDiagnostic,
) -> Diagnostic {
    let diagnostic = Diagnostic::new(severity, source_name, error.message.to_string());
    match error.labels.as_ref().and_then(|labels| labels.first()) {
        Some(label) => diagnostic.at_offset(source, label.offset()),
        None => diagnostic,
    }
}
