//! # Asset Compressor Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `charset`: Decode/encode dei sorgenti
//! - `file_type`: Classificazione dei file per suffisso
//! - `diagnostics`: Messaggi strutturati dei minifier
//! - `stats`: Statistiche di compressione per categoria
//! - `minify`: Minifier per JavaScript, CSS, HTML, XHTML, XML
//! - `file_manager`: Operazioni sui file e discovery
//! - `progress`: Progress bar
//! - `compressor`: Orchestratore del batch e worker per file
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use asset_compressor::{BatchCompressor, Config};
//!
//! let mut config = Config::new("web/src", "web/dist");
//! config.suffixes.js = ".min.js".to_string();
//!
//! let report = BatchCompressor::new(config).run()?;
//! println!("{}", report.stats.total_summary());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod charset;
pub mod compressor;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod file_manager;
pub mod file_type;
pub mod minify;
pub mod progress;
pub mod stats;

pub use charset::Charset;
pub use compressor::{BatchCompressor, BatchReport, TaskCompressor, TaskOutcome};
pub use config::{Config, JsOptions, Suffixes};
pub use diagnostics::{Diagnostic, DiagnosticSink, LoggingSink, Severity};
pub use error::{CompressError, TransformError};
pub use file_type::FileType;
pub use minify::{Minifier, PassThrough, Transformer};
pub use stats::{CompressionStats, FileRecord};
