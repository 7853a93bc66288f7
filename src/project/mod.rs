//! Project management: file filters and workspace loading.

mod config;
mod workspace_loader;

pub use config::AnalysisConfig;
pub use workspace_loader::{FileLoadError, LoadError, WorkspaceLoader, path_to_uri};
