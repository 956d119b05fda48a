//! Planning documents read from the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::DocumentError;
use crate::domain::ports::DocumentSource;

/// [`DocumentSource`] resolving ids as paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileDocumentSource {
    root: PathBuf,
}

impl FileDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source rooted at the current directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, id: &str) -> PathBuf {
        let path = Path::new(id);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl DocumentSource for FileDocumentSource {
    async fn document_text(&self, id: &str) -> Result<String, DocumentError> {
        tokio::fs::read_to_string(self.resolve(id))
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => DocumentError::NotFound(id.to_string()),
                _ => DocumentError::Read {
                    id: id.to_string(),
                    reason: err.to_string(),
                },
            })
    }
}
