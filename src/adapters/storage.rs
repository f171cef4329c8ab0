use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// 以本機目錄作為輸出位置
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("out");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.write_file("chart.svg", b"<svg/>").await.unwrap();

        let written = tokio::fs::read(base.join("chart.svg")).await.unwrap();
        assert_eq!(written, b"<svg/>");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("edit_counts.csv", b"day,count\n2023-01-01,1\n").await.unwrap();
        storage.write_file("edit_counts.csv", b"day,count\n").await.unwrap();

        let written = tokio::fs::read_to_string(temp_dir.path().join("edit_counts.csv"))
            .await
            .unwrap();
        assert_eq!(written, "day,count\n");
    }

    #[tokio::test]
    async fn test_write_into_file_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();
        let storage = LocalStorage::new(blocker.to_str().unwrap().to_string());

        let err = storage.write_file("chart.svg", b"<svg/>").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::TrendError::Io(_)));
    }
}
