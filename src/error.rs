use std::path::PathBuf;
use thiserror::Error;

/// Main error type for vend operations.
///
/// Reducer failures carry the URL or path that was being applied so the
/// caller can diagnose a rejected batch without re-running verbosely.
#[derive(Error, Debug)]
pub enum Error {
    #[error("module already exists: {url}\nto change the pinned version, use 'vend update'")]
    ModuleAlreadyExists { url: String },

    #[error("module not found for: {url}")]
    ModuleNotFound { url: String },

    #[error("file already linked: {url}")]
    LinkAlreadyExists { url: String },

    #[error("file not linked: {url}")]
    LinkNotFound { url: String },

    #[error("alias already exists for: {path}\nrun 'vend unalias' before reassigning it")]
    AliasAlreadyExists { path: String },

    #[error("alias does not exist for: {path}")]
    AliasNotFound { path: String },

    #[error("invalid module URL '{url}': {reason}")]
    InvalidModuleUrl { url: String, reason: String },

    #[error("failed to load config from {}: {message}", path.display())]
    ConfigLoad { path: PathBuf, message: String },

    #[error("filesystem operation failed on {}", path.display())]
    RepositoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
