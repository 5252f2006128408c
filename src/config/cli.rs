use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 本地檔案存取：輸入路徑照呼叫端給的用（絕對或相對工作目錄），
/// 輸出一律寫進 base_path 底下
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
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_and_write_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_str().unwrap().to_string();
        let storage = LocalStorage::new(base.clone());

        storage.write_file("out/result.json", b"{}").await.unwrap();

        let written = temp_dir.path().join("out/result.json");
        assert!(written.exists());

        let data = storage
            .read_file(written.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(data, b"{}");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_an_error() {
        let storage = LocalStorage::new(".".to_string());
        assert!(storage.read_file("definitely/not/here.csv").await.is_err());
    }
}
