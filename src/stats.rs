//! # Compression Statistics Module
//!
//! Accumula le statistiche di compressione per categoria e in totale.
//!
//! ## Responsabilità:
//! - Somma dei byte sorgente e destinazione per ogni `FileType`
//! - Conteggio dei file effettivamente compressi (i file saltati non contano)
//! - Rendering delle righe di report per categoria, totale e singolo file
//!
//! ## Formato report:
//! ```text
//! [JavaScript] Compressed 12 files to 41% (230KB to 94KB, saving 136KB)
//! Compressed 30 files to 55% (512KB to 282KB, saving 230KB)
//! [40%] app.js [100] ---> app.min.js [40]
//! ```
//!
//! Le percentuali sono troncate verso il basso; i KB sono divisioni intere
//! per 1024 applicate separatamente a sorgente e destinazione.

use crate::file_type::FileType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const NOTHING_TO_DO: &str = "No files to compress, or all files already up to date";

/// Running totals for one category, or for the whole batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub source_bytes: u64,
    pub dest_bytes: u64,
    pub files: u64,
}

impl Tally {
    fn add(&mut self, source_bytes: u64, dest_bytes: u64) {
        self.source_bytes += source_bytes;
        self.dest_bytes += dest_bytes;
        self.files += 1;
    }

    /// `floor(dest / source * 100)`, or 0 for an empty source
    pub fn percentage(&self) -> u64 {
        percentage(self.source_bytes, self.dest_bytes)
    }

    fn render(&self) -> String {
        let from_kb = self.source_bytes / 1024;
        let to_kb = self.dest_bytes / 1024;
        let saved = from_kb as i64 - to_kb as i64;
        format!(
            "Compressed {} files to {}% ({}KB to {}KB, saving {}KB)",
            self.files,
            self.percentage(),
            from_kb,
            to_kb,
            saved
        )
    }
}

/// One compressed file, built after the destination has been written
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub file_type: FileType,
    pub source_bytes: u64,
    pub dest_bytes: u64,
}

impl FileRecord {
    pub fn report_line(&self) -> String {
        CompressionStats::file_line(
            &self.source,
            &self.destination,
            self.source_bytes,
            self.dest_bytes,
        )
    }
}

/// Statistics tracker for a single batch run
#[derive(Debug, Default)]
pub struct CompressionStats {
    by_type: HashMap<FileType, Tally>,
    total: Tally,
}

impl CompressionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one compressed file
    pub fn record(&mut self, file_type: FileType, source_bytes: u64, dest_bytes: u64) {
        self.by_type
            .entry(file_type)
            .or_default()
            .add(source_bytes, dest_bytes);
        self.total.add(source_bytes, dest_bytes);
    }

    pub fn tally(&self, file_type: FileType) -> Tally {
        self.by_type.get(&file_type).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Tally {
        self.total
    }

    /// Summary line for one category
    pub fn summary(&self, file_type: FileType) -> String {
        let tally = self.tally(file_type);
        if tally.files == 0 {
            return format!("[{}] {}", file_type.label(), NOTHING_TO_DO);
        }
        format!("[{}] {}", file_type.label(), tally.render())
    }

    /// Summary line over every category
    pub fn total_summary(&self) -> String {
        if self.total.files == 0 {
            return NOTHING_TO_DO.to_string();
        }
        self.total.render()
    }

    /// Report line for a single file, independent of the accumulated state
    pub fn file_line(source: &Path, destination: &Path, source_bytes: u64, dest_bytes: u64) -> String {
        format!(
            "[{}%] {} [{}] ---> {} [{}]",
            percentage(source_bytes, dest_bytes),
            file_name(source),
            source_bytes,
            file_name(destination),
            dest_bytes
        )
    }
}

fn percentage(source_bytes: u64, dest_bytes: u64) -> u64 {
    if source_bytes == 0 {
        return 0;
    }
    // floor(dest / source * 100) without going through f64
    (dest_bytes as u128 * 100 / source_bytes as u128) as u64
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
