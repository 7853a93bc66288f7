use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use super::config::AnalysisConfig;
use crate::ide::AnalysisHost;

/// One file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoadError {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Every other file was still loaded.
    #[error("failed to load {} file(s)", .0.len())]
    Files(Vec<FileLoadError>),
}

/// Loads workspace files into an [`AnalysisHost`].
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLoader {
    config: AnalysisConfig,
}

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load every enabled, non-excluded file below `dir`.
    ///
    /// Returns the number of files loaded.
    pub fn load_directory_into_host(
        &self,
        dir: impl AsRef<Path>,
        host: &AnalysisHost,
    ) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut loaded = 0;
        let mut errors = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    errors.push(FileLoadError {
                        path: err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let path_text = path.to_string_lossy();
            if !self.config.is_groovy_file(&path_text) || self.config.is_excluded(&path_text) {
                continue;
            }

            match self.load_file_into_host(path, host) {
                Ok(()) => loaded += 1,
                Err(message) => errors.push(FileLoadError {
                    path: path.to_path_buf(),
                    message,
                }),
            }
        }

        tracing::debug!(dir = %dir.display(), loaded, failed = errors.len(), "workspace loaded");

        if errors.is_empty() {
            Ok(loaded)
        } else {
            for error in &errors {
                tracing::warn!(path = %error.path.display(), error = %error.message, "failed to load file");
            }
            Err(LoadError::Files(errors))
        }
    }

    /// Load a single file, keyed by its `file://` URI.
    pub fn load_file_into_host(&self, path: &Path, host: &AnalysisHost) -> Result<(), String> {
        let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
        host.set_file_content(&path_to_uri(path), &text)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// `file://` URI for a filesystem path.
pub fn path_to_uri(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    if text.starts_with('/') {
        format!("file://{text}")
    } else {
        format!("file:///{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_uri() {
        assert_eq!(path_to_uri(Path::new("/work/A.groovy")), "file:///work/A.groovy");
        assert_eq!(path_to_uri(Path::new("C:\\work\\A.groovy")), "file:///C:/work/A.groovy");
    }

    #[test]
    fn test_missing_directory() {
        let host = AnalysisHost::new();
        let result = WorkspaceLoader::new().load_directory_into_host("/definitely/not/here", &host);
        assert!(matches!(result, Err(LoadError::DirectoryNotFound(_))));
    }
}
