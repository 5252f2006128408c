use crate::core::parser;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{InputFile, ParseResult};
use crate::utils::error::Result;

/// 聚合結果的輸出檔名
const RESULT_FILE: &str = "export_result.json";

pub struct ExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ExportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputFile>> {
        let mut files = Vec::new();

        for path in self.config.input_files() {
            tracing::debug!("Reading input file: {}", path);
            let data = self.storage.read_file(path).await?;
            tracing::debug!("Read {} bytes from {}", data.len(), path);
            files.push(InputFile::new(path.clone(), data));
        }

        Ok(files)
    }

    async fn transform(&self, files: Vec<InputFile>) -> Result<ParseResult> {
        // 解析是純 CPU 工作，移到阻塞執行緒，避免卡住互動用的執行緒
        let result = tokio::task::spawn_blocking(move || parser::parse_export(files)).await??;

        tracing::debug!(
            "Parsed {} contacts, {} messages, {} invites, {} follows, {} jobs",
            result.contacts.len(),
            result.messages.len(),
            result.invites.len(),
            result.company_follows.len(),
            result.saved_jobs.len()
        );

        Ok(result)
    }

    async fn load(&self, result: &ParseResult) -> Result<String> {
        let json = serde_json::to_vec_pretty(result)?;

        tracing::debug!("Writing result JSON ({} bytes) to storage", json.len());
        self.storage.write_file(RESULT_FILE, &json).await?;

        Ok(format!("{}/{}", self.config.output_path(), RESULT_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn insert(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_files: Vec<String>,
        output_path: String,
    }

    impl MockConfig {
        fn new(input_files: Vec<String>) -> Self {
            Self {
                input_files,
                output_path: "test_output".to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_files(&self) -> &[String] {
            &self.input_files
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn timeout_seconds(&self) -> u64 {
            60
        }
    }

    const CONNECTIONS: &str = "\
First Name,Last Name,URL,Company,Position,Connected On\n\
Jane,Doe,https://example.com/in/jane,Acme,Engineer,04 Jan 2024\n";

    #[test]
    fn test_extract_reads_configured_inputs() {
        let storage = MockStorage::new();
        tokio_test::block_on(storage.insert("Connections.csv", CONNECTIONS.as_bytes()));

        let config = MockConfig::new(vec!["Connections.csv".to_string()]);
        let pipeline = ExportPipeline::new(storage, config);

        let files = tokio_test::block_on(pipeline.extract()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "Connections.csv");
        assert_eq!(files[0].data, CONNECTIONS.as_bytes());
    }

    #[test]
    fn test_extract_missing_input_is_an_error() {
        let storage = MockStorage::new();
        let config = MockConfig::new(vec!["missing.csv".to_string()]);
        let pipeline = ExportPipeline::new(storage, config);

        assert!(tokio_test::block_on(pipeline.extract()).is_err());
    }

    #[tokio::test]
    async fn test_transform_parses_files() {
        let storage = MockStorage::new();
        let config = MockConfig::new(vec![]);
        let pipeline = ExportPipeline::new(storage, config);

        let files = vec![InputFile::new(
            "Connections.csv",
            CONNECTIONS.as_bytes().to_vec(),
        )];
        let result = pipeline.transform(files).await.unwrap();

        assert_eq!(result.contacts.len(), 1);
        assert_eq!(result.contacts[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_load_writes_result_json() {
        let storage = MockStorage::new();
        let config = MockConfig::new(vec![]);
        let pipeline = ExportPipeline::new(storage.clone(), config);

        let result = ParseResult::default();
        let output_path = pipeline.load(&result).await.unwrap();

        assert_eq!(output_path, "test_output/export_result.json");
        let written = storage.get_file("export_result.json").await.unwrap();
        let parsed: ParseResult = serde_json::from_slice(&written).unwrap();
        assert_eq!(parsed, ParseResult::default());
    }
}
