pub mod chain;
pub mod convert;

use paramconv_engine::{ConversionManager, ConverterRegistry, EngineConfig};

use crate::error::CliError;

/// Build the manager from `--config`, or the default chain without one.
pub fn load_manager(config_path: Option<&str>) -> Result<ConversionManager, CliError> {
    let config = match config_path {
        Some(path) => {
            tracing::info!(config = %path, "loading configuration");
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };
    Ok(ConversionManager::from_config(&config, &ConverterRegistry::builtin())?)
}
