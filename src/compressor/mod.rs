//! # Compressor Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `batch`: Orchestratore principale (scan, dispatch, report)
//! - `task`: Worker per singoli file
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod batch;
pub mod path_resolver;
pub mod task;

pub use batch::{BatchCompressor, BatchReport};
pub use path_resolver::PathResolver;
pub use task::{TaskCompressor, TaskOutcome};
