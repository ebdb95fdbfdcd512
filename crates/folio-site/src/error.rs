//! Site composition errors.

use std::path::PathBuf;

use folio_config::ConfigError;
use folio_nav::NavigationError;

/// Error returned when a site cannot be composed or written.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Site configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Navigation could not be resolved.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// Sidebar file could not be read.
    #[error("Cannot read sidebar file {}: {source}", .path.display())]
    SidebarIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Sidebar file is not a valid navigation spec.
    #[error("Invalid sidebar file {}: {source}", .path.display())]
    Sidebar {
        path: PathBuf,
        #[source]
        source: NavigationError,
    },
    /// I/O error writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Manifest serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
