//! # File Type Module
//!
//! Classifica i file da comprimere in base al suffisso del nome.
//!
//! ## Regole:
//! - Match esatto sul suffisso della stringa (case-sensitive)
//! - Ordine di controllo fisso: JS, CSS, XML, HTML, XHTML
//! - Nessun parsing di path o estensione: `archive.min.js` è JavaScript,
//!   `script.js.bak` non è riconosciuto
//!
//! ## Esempio:
//! ```rust
//! use asset_compressor::FileType;
//!
//! assert_eq!(FileType::classify("lib/app.js"), Some(FileType::JavaScript));
//! assert_eq!(FileType::classify("README.md"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized asset categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    JavaScript,
    Css,
    Xml,
    Html,
    Xhtml,
}

impl FileType {
    /// Classification priority
    pub const ALL: [FileType; 5] = [
        FileType::JavaScript,
        FileType::Css,
        FileType::Xml,
        FileType::Html,
        FileType::Xhtml,
    ];

    /// Order of the per-category lines in the final report
    pub const REPORT_ORDER: [FileType; 5] = [
        FileType::Xml,
        FileType::Html,
        FileType::Xhtml,
        FileType::JavaScript,
        FileType::Css,
    ];

    /// Classify a file name or relative path by its suffix.
    ///
    /// Returns `None` for empty input and for any unrecognized suffix.
    pub fn classify(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }

        Self::ALL
            .into_iter()
            .find(|file_type| path.ends_with(file_type.default_suffix()))
    }

    /// Input suffix, also the default output suffix
    pub fn default_suffix(&self) -> &'static str {
        match self {
            Self::JavaScript => ".js",
            Self::Css => ".css",
            Self::Xml => ".xml",
            Self::Html => ".html",
            Self::Xhtml => ".xhtml",
        }
    }

    /// Label used in the statistics report
    pub fn label(&self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Css => "CSS",
            Self::Xml => "XML",
            Self::Html => "HTML",
            Self::Xhtml => "XHTML",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
