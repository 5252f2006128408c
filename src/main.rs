use clap::Parser;
use export_etl::core::ConfigProvider;
use export_etl::utils::{logger, validation::Validate};
use export_etl::{CliConfig, ExportEngine, ExportPipeline, LocalStorage, ResultStore, TomlConfig};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting export-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 指定 TOML 設定檔時，由檔案接管輸入、逾時與輸出路徑
    if let Some(path) = config.config.clone() {
        match TomlConfig::from_file(&path) {
            Ok(file_config) => {
                config.inputs = file_config.input.files.clone();
                config.timeout_seconds = file_config.timeout_seconds();
                config.output_path = file_config.output_path().to_string();
                if file_config.monitoring_enabled() {
                    config.monitor = true;
                }
            }
            Err(e) => {
                tracing::error!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
        }
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 建立儲存、管線與引擎
    let timeout = Duration::from_secs(config.timeout_seconds);
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ExportPipeline::new(storage, config);
    let engine = ExportEngine::new_with_monitoring(pipeline, timeout, monitor_enabled);

    // 結果把手由呼叫端持有；每次執行整體替換
    let mut store = ResultStore::new();

    match engine.run().await {
        Ok(result) => {
            store.set(result);
            if let Some(result) = store.get() {
                tracing::info!("✅ Export parse completed successfully!");
                println!("✅ Export parse completed successfully!");
                println!(
                    "📁 Files processed: {}",
                    result.summary.files_processed.join(", ")
                );
                println!("   Contacts:        {}", result.contacts.len());
                println!("   Messages:        {}", result.messages.len());
                println!("   Invitations:     {}", result.invites.len());
                println!("   Company follows: {}", result.company_follows.len());
                println!("   Jobs:            {}", result.saved_jobs.len());
                if !result.summary.warnings.is_empty() {
                    println!("⚠️  {} warning(s):", result.summary.warnings.len());
                    for warning in &result.summary.warnings {
                        println!("   - {}", warning);
                    }
                }
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Export parse failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                export_etl::utils::error::ErrorSeverity::Low => 0,
                export_etl::utils::error::ErrorSeverity::Medium => 2,
                export_etl::utils::error::ErrorSeverity::High => 1,
                export_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
