use std::path::{Path, PathBuf};

use crate::domain::model::book::Book;
use crate::domain::repository::LibraryRepository;

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるLibraryRepository実装。
/// ファイル全体 = Bookの配列。保存は毎回全体を上書きする。
pub struct JsonLibraryRepository {
    path: PathBuf,
}

impl JsonLibraryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryRepository for JsonLibraryRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<Option<Vec<Book>>, Self::Error> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "library file not found");
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let books: Vec<Book> = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), count = books.len(), "library file read");
        Ok(Some(books))
    }

    fn save(&self, books: &[Book]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(books)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = books.len(), "library file written");
        Ok(())
    }
}
