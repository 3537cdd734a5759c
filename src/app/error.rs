use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("isn't '{}' the root directory of your app? (no package.json found)", .0.display())]
    NotProjectRoot(PathBuf),
    #[error("failed to parse manifest {}: {}", .0.display(), .1)]
    ManifestParse(PathBuf, #[source] serde_json::Error),
    #[error("file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("failed to read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] io::Error),
    #[error("failed to write {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] io::Error),
    #[error("'{0}' is not a valid file name (must not contain \\ / : * ? \" < >)")]
    InvalidFileName(String),
    #[error("failed to read answer: {0}")]
    Prompt(#[source] io::Error),
    #[error("invalid settings file {}: {}", .0.display(), .1)]
    Settings(PathBuf, String),
}
