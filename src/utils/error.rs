use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet processing error: {0}")]
    SpreadsheetError(#[from] calamine::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid config value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("No usable export entries found in the supplied files")]
    EmptyExportError,

    #[error("Parse operation timed out after {seconds}s")]
    TimeoutError { seconds: u64 },
}

/// 錯誤分類，方便呼叫端做粗粒度處理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Archive,
    Parse,
    Config,
    System,
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ZipError(_) => ErrorCategory::Archive,
            EtlError::CsvError(_) | EtlError::SpreadsheetError(_) => ErrorCategory::Parse,
            EtlError::IoError(_) => ErrorCategory::System,
            EtlError::SerializationError(_) => ErrorCategory::System,
            EtlError::TaskError(_) => ErrorCategory::System,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Config,
            EtlError::ProcessingError { .. } => ErrorCategory::Parse,
            EtlError::EmptyExportError => ErrorCategory::Input,
            EtlError::TimeoutError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::EmptyExportError => ErrorSeverity::Low,
            EtlError::TimeoutError { .. } => ErrorSeverity::Medium,
            EtlError::ZipError(_)
            | EtlError::CsvError(_)
            | EtlError::SpreadsheetError(_)
            | EtlError::ProcessingError { .. } => ErrorSeverity::High,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorSeverity::High,
            EtlError::IoError(_) | EtlError::SerializationError(_) | EtlError::TaskError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ZipError(_) => {
                "Check that the archive is a valid, uncorrupted ZIP export".to_string()
            }
            EtlError::CsvError(_) => "Check the CSV file for malformed rows".to_string(),
            EtlError::SpreadsheetError(_) => {
                "Check that the spreadsheet is a valid XLSX workbook".to_string()
            }
            EtlError::IoError(_) => "Check file paths and permissions".to_string(),
            EtlError::SerializationError(_) => {
                "Check that the output path is writable".to_string()
            }
            EtlError::TaskError(_) => "Re-run the command; the worker task crashed".to_string(),
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Fix the configuration value and re-run".to_string()
            }
            EtlError::ProcessingError { .. } => {
                "Inspect the warnings in the summary for the failing file".to_string()
            }
            EtlError::EmptyExportError => {
                "Supply at least one recognized export file (Connections, messages, Invitations, Company Follows, Saved Jobs, Job Applications)"
                    .to_string()
            }
            EtlError::TimeoutError { seconds } => {
                format!("Increase --timeout-seconds (currently {seconds}s) or supply smaller files")
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::EmptyExportError => {
                "None of the supplied files contained a recognized export table".to_string()
            }
            EtlError::TimeoutError { seconds } => {
                format!("Parsing did not finish within {seconds} seconds and was abandoned")
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
