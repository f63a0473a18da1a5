//! # Batch Compressor Main Orchestrator
//!
//! Orchestratore principale che delega responsabilità ai moduli specializzati.
//!
//! ## Flusso di esecuzione:
//! 1. **Validazione**: root sorgente e destinazione, charset, suffissi, pattern
//! 2. **Discovery**: path relativi ordinati dal `FileManager`
//! 3. **Dispatch**: classificazione, path di output, `TaskCompressor`
//! 4. **Reporting**: riepilogo per categoria (XML, HTML, XHTML, JavaScript,
//!    CSS) e totale, solo se verbose
//!
//! Il primo errore interrompe il batch; i file già scritti restano su disco.

use crate::{
    compressor::{
        path_resolver::PathResolver,
        task::{TaskCompressor, TaskOutcome},
    },
    config::Config,
    file_manager::{FileManager, ScanOptions},
    file_type::FileType,
    minify::{Minifier, Transformer},
    progress::ProgressManager,
    stats::CompressionStats,
};
use anyhow::Result;
use tracing::{debug, info};

/// Result of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub stats: CompressionStats,
    /// Files returned by the scanner
    pub scanned: usize,
    /// Files with no recognized suffix
    pub unrecognized: usize,
    pub skipped: usize,
    pub copied: usize,
    pub compressed: usize,
}

/// Orchestratore principale del batch
pub struct BatchCompressor {
    config: Config,
    transformer: Box<dyn Transformer>,
}

impl BatchCompressor {
    /// Batch using the production minifiers
    pub fn new(config: Config) -> Self {
        let transformer = Box::new(Minifier::new(&config));
        Self::with_transformer(config, transformer)
    }

    pub fn with_transformer(config: Config, transformer: Box<dyn Transformer>) -> Self {
        Self {
            config,
            transformer,
        }
    }

    /// Run the batch over the whole source tree
    pub fn run(&self) -> Result<BatchReport> {
        self.config.validate()?;
        let charset = self.config.charset()?;

        info!("Starting compression in: {}", self.config.source_dir.display());
        info!("Output directory: {}", self.config.dest_dir.display());
        if self.config.enabled {
            info!("Mode: Minify ({})", charset.name());
            if self.config.js.preserve_all_semicolons {
                debug!("preserve_all_semicolons has no effect, redundant semicolons are always dropped");
            }
        } else {
            info!("Mode: Copy only (compression disabled)");
        }

        let files = FileManager::scan(&self.config.source_dir, &ScanOptions::from(&self.config))?;
        info!("Found {} files to examine", files.len());

        let task = TaskCompressor::new(&self.config, charset, self.transformer.as_ref());
        let progress = ProgressManager::new(files.len() as u64, self.config.progress);
        let mut report = BatchReport {
            scanned: files.len(),
            ..BatchReport::default()
        };

        for relative in &files {
            let Some(name) = relative.to_str() else {
                debug!("Skipping non UTF-8 path: {}", relative.display());
                report.unrecognized += 1;
                progress.update("skipped");
                continue;
            };
            let name = name.replace(std::path::MAIN_SEPARATOR, "/");

            let Some(file_type) = FileType::classify(&name) else {
                debug!("Ignoring unrecognized file: {}", name);
                report.unrecognized += 1;
                progress.update(&format!("{}: ignored", name));
                continue;
            };

            let source = self.config.source_dir.join(relative);
            let destination = PathResolver::output_path(
                &name,
                file_type,
                &self.config.dest_dir,
                &self.config.suffixes,
            );

            let status = match task.process(&source, &destination, file_type, &mut report.stats)? {
                TaskOutcome::Skipped => {
                    report.skipped += 1;
                    "up to date"
                }
                TaskOutcome::Copied => {
                    report.copied += 1;
                    "copied"
                }
                TaskOutcome::Compressed(_) => {
                    report.compressed += 1;
                    "compressed"
                }
            };
            progress.update(&format!("{}: {}", name, status));
        }

        progress.finish(&report.stats.total_summary());

        if self.config.verbose {
            for file_type in FileType::REPORT_ORDER {
                info!("{}", report.stats.summary(file_type));
            }
            info!("{}", report.stats.total_summary());
        }
        debug!(
            "Batch done: {} compressed, {} copied, {} up to date, {} ignored",
            report.compressed, report.copied, report.skipped, report.unrecognized
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompressError;
    use crate::minify::PassThrough;
    use filetime::FileTime;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct Tree {
        _temp_dir: TempDir,
        source: PathBuf,
        dest: PathBuf,
    }

    fn tree(files: &[(&str, &str)]) -> Tree {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dist");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        for (name, contents) in files {
            let path = source.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, contents).unwrap();
        }
        Tree {
            _temp_dir: temp_dir,
            source,
            dest,
        }
    }

    fn minified_suffixes(config: &mut Config) {
        config.suffixes.js = ".min.js".to_string();
        config.suffixes.css = ".min.css".to_string();
    }

    fn age(path: &Path, seconds: i64) {
        filetime::set_file_mtime(path, FileTime::from_unix_time(seconds, 0)).unwrap();
    }

    #[test]
    fn test_mirrors_tree_with_renamed_suffixes() {
        let tree = tree(&[
            ("a.js", "// comment\nvar answer = 40 + 2;\nconsole.log(answer);\n"),
            ("b.css", "b {\n  margin: 0 ;\n}\n"),
            ("lib/c.xml", "<root>\n  <!-- note -->\n  <item/>\n</root>\n"),
        ]);
        let mut config = Config::new(&tree.source, &tree.dest);
        minified_suffixes(&mut config);

        let report = BatchCompressor::new(config).run().unwrap();

        assert!(tree.dest.join("a.min.js").is_file());
        assert_eq!(std::fs::read_to_string(tree.dest.join("b.min.css")).unwrap(), "b{margin:0}");
        assert_eq!(
            std::fs::read_to_string(tree.dest.join("lib/c.xml")).unwrap(),
            "<root><item/></root>"
        );
        assert!(!tree.dest.join("a.js").exists());

        assert_eq!(report.compressed, 3);
        assert_eq!(report.stats.tally(FileType::JavaScript).files, 1);
        assert_eq!(report.stats.tally(FileType::Css).files, 1);
        assert_eq!(report.stats.tally(FileType::Xml).files, 1);
        assert_eq!(report.stats.total().files, 3);
    }

    /// Log sink shared with a fmt subscriber
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn run_logged(config: Config) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            BatchCompressor::new(config).run().unwrap();
        });

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_quiet_run_logs_no_report_lines() {
        let tree = tree(&[("a.js", "var a = 1;\n"), ("b.css", "a { color: red }\n")]);
        let mut config = Config::new(&tree.source, &tree.dest);
        config.verbose = false;

        let logs = run_logged(config);

        assert!(logs.contains("Found 2 files to examine"));
        assert!(!logs.contains("--->"));
        assert!(!logs.contains("[CSS]"));
        assert!(!logs.contains("Compressed 2 files"));
        assert!(tree.dest.join("a.js").is_file());
    }

    #[test]
    fn test_verbose_run_logs_report_in_order() {
        let tree = tree(&[("a.js", "var a = 1;\n"), ("b.css", "a { color: red }\n")]);
        let config = Config::new(&tree.source, &tree.dest);

        let logs = run_logged(config);

        assert!(logs.contains("] a.js ["));
        assert!(logs.contains("---> b.css ["));
        let positions: Vec<usize> = ["[XML]", "[HTML]", "[XHTML]", "[JavaScript]", "[CSS]", "Compressed 2 files"]
            .iter()
            .map(|line| logs.find(line).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let tree = tree(&[("a.js", "var a = 1;\n"), ("b.css", "a { color: red }\n")]);
        let mut config = Config::new(&tree.source, &tree.dest);
        minified_suffixes(&mut config);

        let first = BatchCompressor::new(config.clone()).run().unwrap();
        assert_eq!(first.compressed, 2);

        // make sure outputs are strictly newer than inputs
        age(&tree.source.join("a.js"), 1_000);
        age(&tree.source.join("b.css"), 1_000);

        let second = BatchCompressor::new(config).run().unwrap();
        assert_eq!(second.compressed, 0);
        assert_eq!(second.skipped, 2);
        for file_type in FileType::REPORT_ORDER {
            assert!(second.stats.summary(file_type).ends_with("already up to date"));
        }
        assert_eq!(
            second.stats.total_summary(),
            "No files to compress, or all files already up to date"
        );
    }

    #[test]
    fn test_touched_source_is_recompressed() {
        let tree = tree(&[("a.css", "a { color: red }\n")]);
        let config = Config::new(&tree.source, &tree.dest);
        BatchCompressor::new(config.clone()).run().unwrap();

        age(&tree.dest.join("a.css"), 1_000);
        age(&tree.source.join("a.css"), 2_000);

        let report = BatchCompressor::new(config).run().unwrap();
        assert_eq!(report.compressed, 1);
    }

    #[test]
    fn test_disabled_pipeline_copies_everything() {
        let sources = [
            ("a.js", "var  a  =  1 ;\n"),
            ("b.css", "a  {  color : red  }\n"),
            ("deep/c.html", "<p>  hi  </p>\n"),
        ];
        let tree = tree(&sources);
        let mut config = Config::new(&tree.source, &tree.dest);
        minified_suffixes(&mut config);
        config.enabled = false;

        let report = BatchCompressor::new(config).run().unwrap();

        assert_eq!(report.copied, 3);
        assert_eq!(report.stats.total().files, 0);
        assert_eq!(std::fs::read_to_string(tree.dest.join("a.min.js")).unwrap(), sources[0].1);
        assert_eq!(std::fs::read_to_string(tree.dest.join("b.min.css")).unwrap(), sources[1].1);
        assert_eq!(std::fs::read_to_string(tree.dest.join("deep/c.html")).unwrap(), sources[2].1);
    }

    #[test]
    fn test_identity_transformer_reports_full_size() {
        let tree = tree(&[("a.js", "var a = 1;\n"), ("b.css", "a { color: red }\n")]);
        let config = Config::new(&tree.source, &tree.dest);

        let report = BatchCompressor::with_transformer(config, Box::new(PassThrough))
            .run()
            .unwrap();

        assert_eq!(report.stats.tally(FileType::JavaScript).percentage(), 100);
        assert_eq!(report.stats.tally(FileType::Css).percentage(), 100);
        assert_eq!(report.stats.total().percentage(), 100);
    }

    #[test]
    fn test_unrecognized_files_are_ignored() {
        let tree = tree(&[
            ("README.md", "# docs"),
            ("script.js.bak", "var a;"),
            ("app.js", "var a = 1;"),
        ]);
        let config = Config::new(&tree.source, &tree.dest);

        let report = BatchCompressor::new(config).run().unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.unrecognized, 2);
        assert_eq!(report.compressed, 1);
        assert!(!tree.dest.join("README.md").exists());
        assert!(!tree.dest.join("script.js.bak").exists());
    }

    #[test]
    fn test_excluded_files_are_not_scanned() {
        let tree = tree(&[("app.js", "var a = 1;"), ("vendor/lib.js", "var b = 2;")]);
        let mut config = Config::new(&tree.source, &tree.dest);
        config.excludes = vec!["vendor/**".to_string()];

        let report = BatchCompressor::new(config).run().unwrap();

        assert_eq!(report.scanned, 1);
        assert!(!tree.dest.join("vendor").exists());
    }

    #[test]
    fn test_missing_root_fails_before_touching_files() {
        let tree = tree(&[("a.js", "var a = 1;")]);
        let missing = tree.dest.join("nope");
        let config = Config::new(&tree.source, &missing);

        let err = BatchCompressor::new(config).run().unwrap_err();
        match err.downcast_ref::<CompressError>() {
            Some(CompressError::InvalidDirectory(path)) => assert_eq!(path, &missing),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!missing.exists());
    }

    #[test]
    fn test_unknown_charset_is_rejected() {
        let tree = tree(&[("a.js", "var a = 1;")]);
        let mut config = Config::new(&tree.source, &tree.dest);
        config.charset = "EBCDIC".to_string();

        let err = BatchCompressor::new(config).run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CompressError>(),
            Some(CompressError::UnsupportedCharset(_))
        ));
        assert!(!tree.dest.join("a.js").exists());
    }

    #[test]
    fn test_syntax_error_aborts_batch() {
        // files are processed in name order: a.css succeeds, b.js fails, c.css never runs
        let tree = tree(&[
            ("a.css", "a { color: red }"),
            ("b.js", "var = ;"),
            ("c.css", "c { color: red }"),
        ]);
        let config = Config::new(&tree.source, &tree.dest);

        let err = BatchCompressor::new(config).run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CompressError>(),
            Some(CompressError::Transform { .. })
        ));
        assert!(tree.dest.join("a.css").exists());
        assert!(!tree.dest.join("b.js").exists());
        assert!(!tree.dest.join("c.css").exists());
    }
}
