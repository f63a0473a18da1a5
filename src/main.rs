//! # Asset Compressor - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Costruzione della configurazione (file JSON opzionale + flag CLI)
//! - Avvio del batch di compressione
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (root, suffissi, charset, opzioni JS, filtri)
//! 2. Configura il logging (INFO, `RUST_LOG`, o DEBUG con `--debug`)
//! 3. Carica `--config` se presente e applica sopra i flag espliciti
//! 4. Istanzia `BatchCompressor` e avvia il batch
//!
//! ## Esempio di utilizzo:
//! ```bash
//! asset-compressor web/src web/dist --js-suffix .min.js --css-suffix .min.css --munge
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use asset_compressor::{BatchCompressor, Config};

#[derive(Parser)]
#[command(name = "asset-compressor")]
#[command(about = "Minify JavaScript, CSS, HTML, XHTML and XML into a mirrored output tree")]
struct Args {
    /// Directory containing the assets to compress
    source_dir: PathBuf,

    /// Directory receiving the compressed tree
    dest_dir: PathBuf,

    /// JSON configuration file; explicit flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Charset used to read and write files
    #[arg(long)]
    charset: Option<String>,

    /// Output suffix for JavaScript files
    #[arg(long)]
    js_suffix: Option<String>,

    /// Output suffix for CSS files
    #[arg(long)]
    css_suffix: Option<String>,

    /// Output suffix for XML files
    #[arg(long)]
    xml_suffix: Option<String>,

    /// Output suffix for HTML files
    #[arg(long)]
    html_suffix: Option<String>,

    /// Output suffix for XHTML files
    #[arg(long)]
    xhtml_suffix: Option<String>,

    /// Insert a line break after this column
    #[arg(long)]
    line_break: Option<usize>,

    /// Copy files unchanged instead of compressing them
    #[arg(long)]
    disable: bool,

    /// Suppress per-file lines and summaries
    #[arg(short, long)]
    quiet: bool,

    /// Shorten local JavaScript identifiers
    #[arg(long)]
    munge: bool,

    /// Do not report JavaScript semantic warnings
    #[arg(long)]
    no_warn: bool,

    /// Accepted for compatibility and ignored: redundant semicolons are always dropped
    #[arg(long)]
    no_preserve_semicolons: bool,

    /// Skip JavaScript compression passes (whitespace and comments only)
    #[arg(long)]
    no_optimize: bool,

    /// Only process files matching this glob (repeatable)
    #[arg(long = "include")]
    includes: Vec<String>,

    /// Skip files matching this glob (repeatable)
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// Do not apply the built-in VCS/editor exclude list
    #[arg(long)]
    no_default_excludes: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// Build the run configuration, flags taking precedence over the file
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.source_dir = self.source_dir;
        config.dest_dir = self.dest_dir;

        if let Some(charset) = self.charset {
            config.charset = charset;
        }
        if let Some(suffix) = self.js_suffix {
            config.suffixes.js = suffix;
        }
        if let Some(suffix) = self.css_suffix {
            config.suffixes.css = suffix;
        }
        if let Some(suffix) = self.xml_suffix {
            config.suffixes.xml = suffix;
        }
        if let Some(suffix) = self.html_suffix {
            config.suffixes.html = suffix;
        }
        if let Some(suffix) = self.xhtml_suffix {
            config.suffixes.xhtml = suffix;
        }
        if self.line_break.is_some() {
            config.line_break = self.line_break;
        }

        if self.disable {
            config.enabled = false;
        }
        if self.quiet {
            config.verbose = false;
        }
        if self.munge {
            config.js.munge = true;
        }
        if self.no_warn {
            config.js.warn = false;
        }
        if self.no_preserve_semicolons {
            config.js.preserve_all_semicolons = false;
        }
        if self.no_optimize {
            config.js.optimize = false;
        }

        config.includes.extend(self.includes);
        config.excludes.extend(self.excludes);
        if self.no_default_excludes {
            config.default_excludes = false;
        }
        if self.progress {
            config.progress = true;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.into_config()?;
    debug!("Configuration: {:?}", config);

    BatchCompressor::new(config).run()?;

    Ok(())
}
