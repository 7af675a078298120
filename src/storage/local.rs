//! Local filesystem storage implementation.
//!
//! ## Layout
//!
//! ```text
//! {dir}/
//! ├── report.html          # Published artifact
//! └── report.html.tmp      # Only present while a publish is in flight
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{PublishMetadata, ReportStorage};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Create a LocalStorage publishing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for in-flight writes.
    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.tmp_path();
        if let Err(e) = Self::write_tmp(&tmp, bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e);
        }

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn write_tmp(tmp: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl ReportStorage for LocalStorage {
    async fn publish(&self, document: &str) -> Result<PublishMetadata> {
        self.write_bytes(document.as_bytes()).await?;
        log::debug!("Published {} bytes to {}", document.len(), self.location());

        Ok(PublishMetadata {
            location: self.location(),
            bytes: document.len(),
            timestamp: Utc::now(),
        })
    }

    async fn load_current(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(document) => Ok(Some(document)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_publish_and_load() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("report.html"));

        let meta = storage.publish("<html>one</html>").await.unwrap();
        assert_eq!(meta.bytes, 16);
        assert_eq!(
            storage.load_current().await.unwrap().as_deref(),
            Some("<html>one</html>")
        );
        assert!(!storage.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_publish_replaces_previous() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("report.html"));

        storage.publish("first").await.unwrap();
        storage.publish("second").await.unwrap();
        assert_eq!(
            storage.load_current().await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nope.html"));
        assert!(storage.load_current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("build/site/index.html"));

        storage.publish("ok").await.unwrap();
        assert!(tmp.path().join("build/site/index.html").exists());
    }

    #[tokio::test]
    async fn test_failed_publish_keeps_previous_artifact() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.html");
        let storage = LocalStorage::new(&path);
        storage.publish("previous").await.unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir(storage.tmp_path()).unwrap();

        assert!(storage.publish("next").await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn test_tmp_path_is_sibling() {
        let storage = LocalStorage::new("out/report.html");
        assert_eq!(storage.tmp_path(), PathBuf::from("out/report.html.tmp"));
    }
}
