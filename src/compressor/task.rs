//! # Task Compressor Module
//!
//! Worker per la compressione di singoli file.
//! Separato dall'orchestratore per tenere ogni file indipendente dal batch.
//!
//! ## Pipeline per file:
//! 1. Skip se la destinazione è aggiornata (mtime >= sorgente)
//! 2. Creazione delle directory parent
//! 3. Pipeline disabilitata: copia byte per byte, nessuna statistica
//! 4. Pipeline abilitata: read, decode, minify, encode, write, statistiche

use crate::{
    charset::Charset,
    config::Config,
    diagnostics::LoggingSink,
    error::CompressError,
    file_manager::FileManager,
    file_type::FileType,
    minify::Transformer,
    stats::{CompressionStats, FileRecord},
};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// What happened to one file
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// Destination already up to date
    Skipped,
    /// Pipeline disabled, bytes copied unchanged
    Copied,
    Compressed(FileRecord),
}

/// Worker per elaborazione singoli file
pub struct TaskCompressor<'a> {
    config: &'a Config,
    charset: Charset,
    transformer: &'a dyn Transformer,
}

impl<'a> TaskCompressor<'a> {
    pub fn new(config: &'a Config, charset: Charset, transformer: &'a dyn Transformer) -> Self {
        Self {
            config,
            charset,
            transformer,
        }
    }

    /// Process one file and record its statistics when it gets compressed
    pub fn process(
        &self,
        source: &Path,
        destination: &Path,
        file_type: FileType,
        stats: &mut CompressionStats,
    ) -> Result<TaskOutcome> {
        if FileManager::is_up_to_date(source, destination)? {
            debug!(
                "[OK] Skipping file, output is up to date: {} -> {}",
                source.display(),
                destination.display()
            );
            return Ok(TaskOutcome::Skipped);
        }

        FileManager::ensure_parent_dirs(destination)?;

        if !self.config.enabled {
            let copied = FileManager::copy(source, destination)?;
            debug!(
                "Copied {} -> {} ({})",
                source.display(),
                destination.display(),
                FileManager::format_size(copied)
            );
            return Ok(TaskOutcome::Copied);
        }

        let record = self.compress(source, destination, file_type)?;
        stats.record(record.file_type, record.source_bytes, record.dest_bytes);
        if self.config.verbose {
            info!("{}", record.report_line());
        }

        Ok(TaskOutcome::Compressed(record))
    }

    fn compress(&self, source: &Path, destination: &Path, file_type: FileType) -> Result<FileRecord> {
        let bytes = FileManager::read(source)?;
        let text = self.charset.decode(&bytes);

        let source_name = source.display().to_string();
        let mut sink = LoggingSink::new();
        let minified = self
            .transformer
            .transform(file_type, &source_name, &text, &mut sink)
            .map_err(|e| CompressError::Transform {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;

        if let Some(fatal) = sink.fatal() {
            return Err(CompressError::Transform {
                path: source.to_path_buf(),
                message: fatal.message.clone(),
            }
            .into());
        }
        if sink.warnings() > 0 || sink.errors() > 0 {
            debug!(
                "{}: {} warning(s), {} error(s)",
                source_name,
                sink.warnings(),
                sink.errors()
            );
        }

        let output = self.charset.encode(&minified);
        FileManager::write_atomic(destination, &output, source)?;

        Ok(FileRecord {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            file_type,
            source_bytes: bytes.len() as u64,
            dest_bytes: output.len() as u64,
        })
    }
}
