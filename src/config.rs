//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione di un batch di compressione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri del batch
//! - Fornisce validazione dei parametri prima di toccare qualsiasi file
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `source_dir` / `dest_dir`: root sorgente e destinazione (devono esistere)
//! - `charset`: encoding di lettura e scrittura (default: `UTF-8`)
//! - `suffixes`: suffisso di output per categoria (default: invariato)
//! - `line_break`: colonna dopo cui andare a capo (default: nessuna)
//! - `enabled`: se `false` i file vengono solo copiati (default: true)
//! - `verbose`: report per file e per categoria (default: true)
//! - `js`: opzioni del minifier JavaScript (`munge`, `warn`,
//!   `preserve_all_semicolons`, `optimize`)
//! - `includes` / `excludes` / `default_excludes`: filtri dello scanner
//! - `progress`: barra di avanzamento (default: false)
//!
//! ## Validazione:
//! - Controlla che le due root siano directory esistenti
//! - Controlla che il charset sia supportato
//! - Controlla che i suffissi non siano vuoti
//! - Controlla che i pattern glob siano validi
//!
//! ## Esempio:
//! ```rust
//! use asset_compressor::Config;
//!
//! let mut config = Config::new("web/src", "web/dist");
//! config.suffixes.js = ".min.js".to_string();
//! config.line_break = Some(8000);
//! ```

use crate::charset::Charset;
use crate::error::CompressError;
use crate::file_type::FileType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a compression batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the tree to scan
    pub source_dir: PathBuf,
    /// Root of the mirrored output tree
    pub dest_dir: PathBuf,
    /// Encoding used to read sources and write results
    pub charset: String,
    /// Output suffix per category
    pub suffixes: Suffixes,
    /// Soft line-wrap column, `None` disables wrapping
    pub line_break: Option<usize>,
    /// When false files are copied byte for byte
    pub enabled: bool,
    /// Per-file lines and final summaries
    pub verbose: bool,
    /// JavaScript minifier options
    pub js: JsOptions,
    /// Glob patterns a relative path must match (any of)
    pub includes: Vec<String>,
    /// Glob patterns that exclude a relative path
    pub excludes: Vec<String>,
    /// Apply the built-in VCS/editor exclude list
    pub default_excludes: bool,
    /// Show a progress bar
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            dest_dir: PathBuf::new(),
            charset: Charset::Utf8.name().to_string(),
            suffixes: Suffixes::default(),
            line_break: None,
            enabled: true,
            verbose: true,
            js: JsOptions::default(),
            includes: Vec::new(),
            excludes: Vec::new(),
            default_excludes: true,
            progress: false,
        }
    }
}

/// Output suffixes, one per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suffixes {
    pub js: String,
    pub css: String,
    pub xml: String,
    pub html: String,
    pub xhtml: String,
}

impl Default for Suffixes {
    fn default() -> Self {
        Self {
            js: FileType::JavaScript.default_suffix().to_string(),
            css: FileType::Css.default_suffix().to_string(),
            xml: FileType::Xml.default_suffix().to_string(),
            html: FileType::Html.default_suffix().to_string(),
            xhtml: FileType::Xhtml.default_suffix().to_string(),
        }
    }
}

impl Suffixes {
    pub fn for_type(&self, file_type: FileType) -> &str {
        match file_type {
            FileType::JavaScript => &self.js,
            FileType::Css => &self.css,
            FileType::Xml => &self.xml,
            FileType::Html => &self.html,
            FileType::Xhtml => &self.xhtml,
        }
    }
}

/// JavaScript minifier options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsOptions {
    /// Shorten local identifiers
    pub munge: bool,
    /// Report semantic problems as warnings
    pub warn: bool,
    /// Keep redundant semicolons. oxc always emits the minimal set, so this
    /// is accepted and logged but has no effect on the output.
    pub preserve_all_semicolons: bool,
    /// Run the compression passes (constant folding, dead code removal, ...)
    pub optimize: bool,
}

impl Default for JsOptions {
    fn default() -> Self {
        Self {
            munge: false,
            warn: true,
            preserve_all_semicolons: true,
            optimize: true,
        }
    }
}

impl Config {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(CompressError::InvalidDirectory(self.source_dir.clone()).into());
        }
        if !self.dest_dir.is_dir() {
            return Err(CompressError::InvalidDirectory(self.dest_dir.clone()).into());
        }

        self.charset()?;

        for file_type in FileType::ALL {
            if self.suffixes.for_type(file_type).is_empty() {
                return Err(CompressError::Validation(format!(
                    "output suffix for {} must not be empty",
                    file_type
                ))
                .into());
            }
        }

        for pattern in self.includes.iter().chain(&self.excludes) {
            glob::Pattern::new(pattern).map_err(|e| {
                CompressError::Validation(format!("invalid glob pattern '{}': {}", pattern, e))
            })?;
        }

        Ok(())
    }

    /// Parsed charset
    pub fn charset(&self) -> Result<Charset, CompressError> {
        self.charset.parse()
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
