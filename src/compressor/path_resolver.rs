//! # Path Resolution Module
//!
//! Centralizza il calcolo del path di destinazione di ogni file.
//!
//! Il path relativo viene riusato sotto la root di destinazione; solo il
//! suffisso finale cambia, e solo se è quello di default della categoria.

use crate::config::Suffixes;
use crate::file_type::FileType;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Replace the trailing default suffix of `relative` with the configured
    /// one. Only a match anchored at the end is replaced.
    pub fn output_name(relative: &str, file_type: FileType, suffixes: &Suffixes) -> String {
        let suffix = suffixes.for_type(file_type);
        match relative.strip_suffix(file_type.default_suffix()) {
            Some(stem) => format!("{}{}", stem, suffix),
            None => relative.to_string(),
        }
    }

    /// Destination path for a file given relative to the source root
    pub fn output_path(
        relative: &str,
        file_type: FileType,
        dest_root: &Path,
        suffixes: &Suffixes,
    ) -> PathBuf {
        let result = dest_root.join(Self::output_name(relative, file_type, suffixes));
        debug!("Resolved output path: {} -> {}", relative, result.display());
        result
    }
}
