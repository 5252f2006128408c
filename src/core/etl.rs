use crate::core::Pipeline;
use crate::domain::model::ParseResult;
use crate::utils::error::{EtlError, Result};
use crate::utils::monitor::SystemMonitor;
use std::time::Duration;

/// 單發式引擎：extract → transform → load，整段 transform 受
/// 呼叫端給定的牆鐘逾時管制。逾時即整體放棄，絕不交付部分結果；
/// 放棄是唯一的取消機制，沒有檔案中或列中的細粒度取消。
pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    timeout: Duration,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P, timeout: Duration) -> Self {
        Self::new_with_monitoring(pipeline, timeout, false)
    }

    pub fn new_with_monitoring(pipeline: P, timeout: Duration, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            timeout,
        }
    }

    pub async fn run(&self) -> Result<ParseResult> {
        tracing::info!("Starting export parse...");

        tracing::info!("Extracting input files...");
        self.monitor.log_phase("Extract");
        let files = self.pipeline.extract().await?;
        tracing::info!("Read {} input file(s)", files.len());

        tracing::info!("Normalizing records...");
        self.monitor.log_phase("Transform");
        let result = match tokio::time::timeout(self.timeout, self.pipeline.transform(files)).await
        {
            Ok(parsed) => parsed?,
            Err(_) => {
                return Err(EtlError::TimeoutError {
                    seconds: self.timeout.as_secs(),
                })
            }
        };
        tracing::info!(
            "Normalized {} contacts, {} messages, {} invites, {} company follows, {} jobs ({} warnings)",
            result.contacts.len(),
            result.messages.len(),
            result.invites.len(),
            result.company_follows.len(),
            result.saved_jobs.len(),
            result.summary.warnings.len()
        );

        tracing::info!("Writing output...");
        self.monitor.log_phase("Load");
        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("Output saved to: {}", output_path);

        self.monitor.log_phase("Done");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::InputFile;

    struct MockPipeline {
        transform_delay: Duration,
    }

    impl MockPipeline {
        fn new() -> Self {
            Self {
                transform_delay: Duration::ZERO,
            }
        }

        fn with_transform_delay(delay: Duration) -> Self {
            Self {
                transform_delay: delay,
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for MockPipeline {
        async fn extract(&self) -> Result<Vec<InputFile>> {
            Ok(vec![InputFile::new("Connections.csv", Vec::new())])
        }

        async fn transform(&self, _files: Vec<InputFile>) -> Result<ParseResult> {
            tokio::time::sleep(self.transform_delay).await;
            let mut result = ParseResult::default();
            result.summary.record_file("Connections", 0);
            Ok(result)
        }

        async fn load(&self, _result: &ParseResult) -> Result<String> {
            Ok("test_output/export_result.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_fresh_result() {
        let engine = ExportEngine::new(MockPipeline::new(), Duration::from_secs(5));
        let result = engine.run().await.unwrap();
        assert_eq!(result.summary.files_processed, vec!["Connections"]);
    }

    #[tokio::test]
    async fn test_timeout_abandons_the_invocation() {
        let pipeline = MockPipeline::with_transform_delay(Duration::from_secs(30));
        let engine = ExportEngine::new(pipeline, Duration::from_millis(20));

        match engine.run().await {
            Err(EtlError::TimeoutError { seconds: 0 }) => {}
            other => panic!("expected timeout error, got {:?}", other.map(|_| ())),
        }
    }
}
