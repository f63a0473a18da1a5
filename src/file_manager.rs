//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery degli asset.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file sotto la root sorgente (con filtri glob)
//! - Controllo di aggiornamento (destinazione più recente della sorgente)
//! - Lettura, scrittura atomica e copia byte per byte
//! - Formattazione human-readable delle dimensioni
//!
//! ## Discovery:
//! - Ritorna path relativi alla root, ordinati per nome
//! - `includes` vuoto equivale a `**` (tutti i file)
//! - `excludes` e la lista di default (VCS, backup degli editor, `.DS_Store`)
//!   vengono applicati dopo gli include
//! - I pattern usano sempre `/` come separatore
//!
//! ## Operazioni sui file:
//! - `scan()`: trova tutti i file candidati
//! - `is_up_to_date()`: staleness check per lo skip
//! - `read()` / `write_atomic()` / `copy()`: I/O con errori che portano il path
//!
//! ## Esempio:
//! ```rust,no_run
//! use asset_compressor::file_manager::{FileManager, ScanOptions};
//! use std::path::Path;
//!
//! let files = FileManager::scan(Path::new("web/src"), &ScanOptions::default())?;
//! for file in files {
//!     println!("{}", file.display());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::Config;
use crate::error::CompressError;
use anyhow::Result;
use glob::{MatchOptions, Pattern};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

/// Patterns excluded unless `default_excludes` is off
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/.git/**",
    "**/.gitignore",
    "**/.gitattributes",
    "**/.hg/**",
    "**/.svn/**",
    "**/CVS/**",
    "**/.cvsignore",
    "**/.bzr/**",
    "**/.DS_Store",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Include/exclude filters for the tree scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub default_excludes: bool,
}

impl From<&Config> for ScanOptions {
    fn from(config: &Config) -> Self {
        Self {
            includes: config.includes.clone(),
            excludes: config.excludes.clone(),
            default_excludes: config.default_excludes,
        }
    }
}

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Find every regular file under `root` that passes the filters.
    ///
    /// Paths are relative to `root` and sorted by file name at each level.
    pub fn scan(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
        let includes = compile(&options.includes)?;
        let mut excludes = compile(&options.excludes)?;
        if options.default_excludes {
            excludes.extend(compile(DEFAULT_EXCLUDES)?);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(source) => anyhow::Error::from(CompressError::io(path, source)),
                    None => anyhow::anyhow!("Filesystem loop detected at {}", path.display()),
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(root)?.to_path_buf();
            let candidate = to_pattern_path(&relative);

            let included = includes.is_empty()
                || includes.iter().any(|p| p.matches_with(&candidate, MATCH_OPTIONS));
            let excluded = excludes.iter().any(|p| p.matches_with(&candidate, MATCH_OPTIONS));

            if included && !excluded {
                files.push(relative);
            } else {
                debug!("Filtered out: {}", candidate);
            }
        }

        Ok(files)
    }

    /// True when `destination` is a regular file, is not `source` itself,
    /// and was modified no earlier than `source`.
    pub fn is_up_to_date(source: &Path, destination: &Path) -> Result<bool> {
        if !destination.is_file() || Self::same_file(source, destination)? {
            return Ok(false);
        }

        let source_time = Self::modified(source)?;
        let dest_time = Self::modified(destination)?;
        Ok(dest_time >= source_time)
    }

    /// Compare two paths by canonical identity
    pub fn same_file(a: &Path, b: &Path) -> Result<bool> {
        if !a.exists() || !b.exists() {
            return Ok(false);
        }
        let a = a.canonicalize().map_err(|e| CompressError::io(a, e))?;
        let b = b.canonicalize().map_err(|e| CompressError::io(b, e))?;
        Ok(a == b)
    }

    /// Create the parent directories of `path`
    pub fn ensure_parent_dirs(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompressError::io(parent, e))?;
        }
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path).map_err(|e| CompressError::io(path, e))?)
    }

    /// Write through a temporary file in the same directory, then rename.
    ///
    /// The result keeps the permissions of the file it replaces, or those of
    /// `permissions_from` when `path` does not exist yet.
    pub fn write_atomic(path: &Path, contents: &[u8], permissions_from: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or(Path::new("."));
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| CompressError::io(dir, e))?;
        temp.write_all(contents)
            .map_err(|e| CompressError::io(temp.path(), e))?;

        let template = if path.exists() { path } else { permissions_from };
        let permissions = std::fs::metadata(template)
            .map_err(|e| CompressError::io(template, e))?
            .permissions();
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| CompressError::io(temp.path(), e))?;

        temp.persist(path)
            .map_err(|e| CompressError::io(path, e.error))?;
        Ok(())
    }

    /// Byte-for-byte copy; copying a file onto itself does nothing
    pub fn copy(source: &Path, destination: &Path) -> Result<u64> {
        if Self::same_file(source, destination)? {
            return Self::size(source);
        }
        Ok(std::fs::copy(source, destination).map_err(|e| CompressError::io(destination, e))?)
    }

    pub fn size(path: &Path) -> Result<u64> {
        Ok(std::fs::metadata(path)
            .map_err(|e| CompressError::io(path, e))?
            .len())
    }

    fn modified(path: &Path) -> Result<std::time::SystemTime> {
        Ok(std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| CompressError::io(path, e))?)
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p.as_ref()).map_err(|e| -> anyhow::Error {
                CompressError::Validation(format!("invalid glob pattern '{}': {}", p.as_ref(), e))
                    .into()
            })
        })
        .collect()
}

/// Relative path with `/` separators, as patterns expect
fn to_pattern_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files.iter().map(|f| to_pattern_path(f)).collect()
    }

    #[test]
    fn test_scan_returns_sorted_relative_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "b.css", "");
        touch(root, "a.js", "");
        touch(root, "lib/z.js", "");
        touch(root, "lib/deep/y.xml", "");

        let files = FileManager::scan(root, &ScanOptions::default()).unwrap();
        assert_eq!(names(&files), vec!["a.js", "b.css", "lib/deep/y.xml", "lib/z.js"]);
    }

    #[test]
    fn test_scan_applies_includes_and_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "app.js", "");
        touch(root, "vendor/jquery.js", "");
        touch(root, "css/site.css", "");
        touch(root, "notes.txt", "");

        let options = ScanOptions {
            includes: vec!["**/*.js".to_string(), "**/*.css".to_string()],
            excludes: vec!["vendor/**".to_string()],
            default_excludes: false,
        };
        let files = FileManager::scan(root, &options).unwrap();
        assert_eq!(names(&files), vec!["app.js", "css/site.css"]);
    }

    #[test]
    fn test_default_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "app.js", "");
        touch(root, "app.js~", "");
        touch(root, ".git/config", "");
        touch(root, "sub/.DS_Store", "");

        let with_defaults = ScanOptions { default_excludes: true, ..ScanOptions::default() };
        let files = FileManager::scan(root, &with_defaults).unwrap();
        assert_eq!(names(&files), vec!["app.js"]);

        let files = FileManager::scan(root, &ScanOptions::default()).unwrap();
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_up_to_date_compares_mtimes() {
        let temp_dir = TempDir::new().unwrap();
        let source = touch(temp_dir.path(), "in/a.js", "var a = 1;");
        let dest = temp_dir.path().join("out/a.js");

        assert!(!FileManager::is_up_to_date(&source, &dest).unwrap());

        touch(temp_dir.path(), "out/a.js", "var a=1;");
        filetime::set_file_mtime(&source, FileTime::from_unix_time(1_000, 0)).unwrap();
        filetime::set_file_mtime(&dest, FileTime::from_unix_time(2_000, 0)).unwrap();
        assert!(FileManager::is_up_to_date(&source, &dest).unwrap());

        // equal times still count as up to date
        filetime::set_file_mtime(&dest, FileTime::from_unix_time(1_000, 0)).unwrap();
        assert!(FileManager::is_up_to_date(&source, &dest).unwrap());

        filetime::set_file_mtime(&source, FileTime::from_unix_time(3_000, 0)).unwrap();
        assert!(!FileManager::is_up_to_date(&source, &dest).unwrap());
    }

    #[test]
    fn test_same_file_is_never_up_to_date() {
        let temp_dir = TempDir::new().unwrap();
        let source = touch(temp_dir.path(), "a.css", "a { }");
        let alias = temp_dir.path().join("./a.css");

        assert!(FileManager::same_file(&source, &alias).unwrap());
        assert!(!FileManager::is_up_to_date(&source, &alias).unwrap());
    }

    #[test]
    fn test_copy_onto_itself_keeps_content() {
        let temp_dir = TempDir::new().unwrap();
        let source = touch(temp_dir.path(), "a.css", "a { color: red }");

        FileManager::copy(&source, &source).unwrap();
        assert_eq!(std::fs::read_to_string(&source).unwrap(), "a { color: red }");
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "out.js", "old");

        FileManager::write_atomic(&path, b"new", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let source = touch(temp_dir.path(), "a.js", "var a = 1;");
        std::fs::set_permissions(&source, std::fs::Permissions::from_mode(0o644)).unwrap();
        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;

        // new destination takes the source mode
        let fresh = temp_dir.path().join("out/a.js");
        FileManager::ensure_parent_dirs(&fresh).unwrap();
        FileManager::write_atomic(&fresh, b"var a=1;", &source).unwrap();
        assert_eq!(mode(&fresh), 0o644);

        // an existing destination keeps its own mode
        std::fs::set_permissions(&fresh, std::fs::Permissions::from_mode(0o664)).unwrap();
        FileManager::write_atomic(&fresh, b"var a=2;", &source).unwrap();
        assert_eq!(mode(&fresh), 0o664);

        // rewriting in place leaves the source mode alone
        FileManager::write_atomic(&source, b"var a=1;", &source).unwrap();
        assert_eq!(mode(&source), 0o644);
    }

    #[test]
    fn test_read_error_carries_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.js");

        let err = FileManager::read(&missing).unwrap_err();
        match err.downcast_ref::<CompressError>() {
            Some(CompressError::Io { path, .. }) => assert_eq!(path, &missing),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
