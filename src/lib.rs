pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{
    etl::ExportEngine, parser::parse_export, pipeline::ExportPipeline, store::ResultStore,
};
pub use domain::model::{InputFile, ParseResult};
pub use utils::error::{EtlError, Result};
