use crate::core::Storage;
use crate::domain::model::{FailedImage, FetchResult};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PersistReport {
    pub saved: Vec<String>,
    pub failed: Vec<FailedImage>,
}

/// Writes every successful download under its file name. Failed downloads and
/// write errors are reported and skipped so the remaining files still land.
pub async fn persist<S: Storage>(storage: &S, results: Vec<FetchResult>) -> PersistReport {
    let mut report = PersistReport::default();

    for result in results {
        let file_name = result.link.file_name.clone();
        let url = result.link.source_url.clone();

        let bytes = match result.into_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("⚠️  {}", e.user_friendly_message());
                report.failed.push(FailedImage {
                    file_name,
                    url,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match storage.write_file(&file_name, &bytes).await {
            Ok(()) => {
                tracing::debug!("Saved {} ({} bytes)", file_name, bytes.len());
                report.saved.push(file_name);
            }
            Err(e) => {
                tracing::warn!("⚠️  Could not save {}: {}", file_name, e);
                report.failed.push(FailedImage {
                    file_name,
                    url,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FetchFailure, FetchOutcome, ImageLink};
    use crate::utils::error::{Result, WallpaperError};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        read_only: Vec<String>,
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only.iter().any(|p| p == path) {
                return Err(WallpaperError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("read-only: {}", path),
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn success(url: &str, body: &[u8]) -> FetchResult {
        FetchResult {
            link: ImageLink::new(url),
            outcome: FetchOutcome::Success(body.to_vec()),
        }
    }

    fn failure(url: &str, status: u16) -> FetchResult {
        FetchResult {
            link: ImageLink::new(url),
            outcome: FetchOutcome::Failed(FetchFailure::HttpStatus(status)),
        }
    }

    #[tokio::test]
    async fn test_persist_skips_failed_downloads() {
        let storage = MockStorage::default();
        let results = vec![
            success("https://x.com/a-1280x1024.jpg", b"aaa"),
            failure("https://x.com/b-1280x1024.jpg", 500),
            success("https://x.com/c-1280x1024.jpg", b"ccc"),
        ];

        let report = persist(&storage, results).await;

        assert_eq!(report.saved, vec!["a-1280x1024.jpg", "c-1280x1024.jpg"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file_name, "b-1280x1024.jpg");
        assert!(report.failed[0].reason.contains("HTTP 500"));

        let files = storage.files.lock().await;
        assert_eq!(files.len(), 2);
        assert_eq!(files.get("a-1280x1024.jpg").unwrap(), b"aaa");
        assert!(!files.contains_key("b-1280x1024.jpg"));
    }

    #[tokio::test]
    async fn test_persist_continues_after_write_error() {
        let storage = MockStorage {
            read_only: vec!["a.jpg".to_string()],
            ..Default::default()
        };
        let results = vec![success("https://x.com/a.jpg", b"a"), success("https://x.com/b.jpg", b"b")];

        let report = persist(&storage, results).await;

        assert_eq!(report.saved, vec!["b.jpg"]);
        assert_eq!(report.failed[0].file_name, "a.jpg");
    }

    #[tokio::test]
    async fn test_persist_same_name_overwrites() {
        let storage = MockStorage::default();
        let results = vec![
            success("https://x.com/one/wall.jpg", b"first"),
            success("https://x.com/two/wall.jpg", b"second"),
        ];

        let report = persist(&storage, results).await;

        assert_eq!(report.saved.len(), 2);
        let files = storage.files.lock().await;
        assert_eq!(files.get("wall.jpg").unwrap(), b"second");
    }
}
