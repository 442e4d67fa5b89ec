use crate::core::PageSource;
use crate::utils::error::{HarvestError, Result};

/// Reads pages saved from a browser session. The "URL" is a file path.
#[derive(Debug, Clone, Default)]
pub struct FilePageSource;

impl PageSource for FilePageSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        tokio::fs::read_to_string(url)
            .await
            .map_err(|e| HarvestError::PageNotReady {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_saved_page() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("<html><body>목록</body></html>".as_bytes()).unwrap();

        let html = FilePageSource
            .fetch_page(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(html.contains("목록"));
    }

    #[tokio::test]
    async fn test_missing_file_is_page_fault() {
        let err = FilePageSource
            .fetch_page("/definitely/not/here.html")
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::PageNotReady { .. }));
    }
}
