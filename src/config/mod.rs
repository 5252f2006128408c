pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// 輸入檔允許的副檔名
pub const ALLOWED_INPUT_EXTENSIONS: &[&str] = &["zip", "csv", "xlsx"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "export-etl")]
#[command(about = "Normalizes personal-data export archives into a deduplicated record set")]
pub struct CliConfig {
    /// 要解析的匯出檔（zip/csv/xlsx），逗號分隔
    #[arg(long, value_delimiter = ',')]
    pub inputs: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// 整段解析的牆鐘逾時；超時即整體放棄，不交付部分結果
    #[arg(long, default_value = "60")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Read inputs, timeout and output path from a TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.inputs
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(EtlError::MissingConfigError {
                field: "inputs".to_string(),
            });
        }
        validation::validate_file_extensions("inputs", &self.inputs, ALLOWED_INPUT_EXTENSIONS)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        Ok(())
    }
}
