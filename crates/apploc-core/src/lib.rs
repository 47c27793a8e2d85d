use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Minimal unit used across crates to represent a single catalog entry:
/// a flat key path plus its paired human label and localizable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransRecord {
    pub key: String,
    /// Human-readable label shown to translators.
    pub title: String,
    /// The localizable string itself (raw, unescaped).
    pub value: String,
}

/// Error taxonomy shared by the transcoding crates.
///
/// Every variant is fatal for the invocation that raised it; the CLI maps
/// `Authentication` to a localized message instead of a report.
#[derive(Debug, Error)]
pub enum ApplocError {
    #[error("no package declared inside the source tree (expected a [a-z_]+ string at `app.package`)")]
    MissingConfig,

    #[error("key `{path}` is used both as a value and as a nested scope")]
    ConflictingKey { path: String },

    #[error("no `txt.apps.<package>.` key found in the translation set")]
    MissingPackage,

    #[error("path `{path}` is present in only one of the title/value trees")]
    MismatchedPath { path: String },

    #[error("authentication failed")]
    Authentication,
}
