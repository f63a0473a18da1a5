//! # Progress Tracking Module
//!
//! Questo modulo gestisce la progress bar del batch.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Un tick per ogni file scansionato (compresso, copiato o saltato)
//! - Messaggio finale con il riepilogo del batch
//!
//! La barra è nascosta di default (`--progress` la abilita), così l'output
//! dei log resta leggibile quando il batch gira in una pipeline di build.
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:03] [========================>---------------] 90/150 (60%) lib/app.js
//! ```
//!
//! ## Esempio:
//! ```rust
//! use asset_compressor::progress::ProgressManager;
//!
//! let progress = ProgressManager::new(2, false);
//! progress.update("a.js");
//! progress.update("b.css");
//! progress.finish("Compressed 2 files");
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}";

/// Manages progress reporting for a compression batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager, hidden unless `visible`
    pub fn new(total_files: u64, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total_files);
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Advance by one file
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
