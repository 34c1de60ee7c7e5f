use std::process::ExitCode;

use paramconv_engine::ConverterRegistry;

use crate::error::CliError;

pub fn run(config_path: Option<&str>) -> Result<ExitCode, CliError> {
    let manager = super::load_manager(config_path)?;
    if manager.is_empty() {
        println!("(empty chain: nothing converts)");
    }
    for (position, name) in manager.converter_names().enumerate() {
        println!("{position}: {name}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn kinds() -> Result<ExitCode, CliError> {
    let registry = ConverterRegistry::builtin();
    for kind in registry.kinds() {
        println!("{}", kind.name);
        for param in (kind.config_params)() {
            let default = param
                .default
                .map(|d| format!(" (default {d:?})"))
                .unwrap_or_default();
            println!(
                "    {} ({}){default}: {}",
                param.name, param.param_type, param.description
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}
