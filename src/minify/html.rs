//! HTML and XHTML minification with minify-html.
//!
//! Only markup is touched: inline `<script>` and `<style>` blocks are left
//! as they are. XHTML output keeps every closing tag and the `<html>` and
//! `<head>` opening tags so it stays well-formed.

use minify_html::{minify as minify_markup, Cfg};

use crate::error::TransformError;

/// Minify HTML, or XHTML when `xhtml` is set.
pub fn minify(source: &str, xhtml: bool) -> Result<String, TransformError> {
    let mut cfg = Cfg::new();
    cfg.keep_closing_tags = xhtml;
    cfg.keep_html_and_head_opening_tags = xhtml;

    String::from_utf8(minify_markup(source.as_bytes(), &cfg))
        .map_err(|_| TransformError::InvalidOutput)
}
