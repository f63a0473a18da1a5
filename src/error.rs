//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `InvalidDirectory`: root sorgente o destinazione mancante
//! - `UnsupportedCharset`: nome di encoding non riconosciuto
//! - `Io`: errori di I/O su un file specifico (lettura, scrittura, copia)
//! - `Transform`: il minifier ha fallito o ha riportato un errore fatale
//! - `Validation`: altri errori di configurazione
//!
//! Tutti gli errori sono fatali per il batch: il primo interrompe l'esecuzione.
//! Le funzioni della libreria ritornano `anyhow::Result`; il tipo originale
//! si recupera con `downcast_ref::<CompressError>()`.
//!
//! ## Esempio:
//! ```rust
//! use asset_compressor::CompressError;
//! use std::path::PathBuf;
//!
//! let err = CompressError::InvalidDirectory(PathBuf::from("/missing"));
//! assert_eq!(err.to_string(), "/missing is not a valid directory");
//! ```

use std::path::PathBuf;

/// Custom error types for asset compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("{} is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Unsupported charset name: {0}")]
    UnsupportedCharset(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compress {}: {message}", path.display())]
    Transform { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Validation(String),
}

impl CompressError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure reported by a single minifier
#[derive(thiserror::Error, Debug)]
pub enum TransformError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("fatal diagnostic: {0}")]
    Fatal(String),

    #[error("output is not valid UTF-8")]
    InvalidOutput,
}
