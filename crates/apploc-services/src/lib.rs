//! High-level catalog operations over the lower-level crates.
//! Intentionally thin: exposes stable functions used by the CLI front-end.

pub use apploc_core::{ApplocError, Result, TransRecord};

mod export;
mod import;
mod pseudo;
mod update;
pub mod util;

pub use export::{export_catalog, ExportSummary};
pub use import::{import_catalog, ImportSummary};
pub use pseudo::{pseudotranslate_file, PseudoSummary};
pub use update::{update_from_remote, LocaleOutcome, UpdateSummary};
