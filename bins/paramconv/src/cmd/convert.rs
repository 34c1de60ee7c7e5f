use std::process::ExitCode;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use paramconv_engine::{Conversion, TypeDescriptor, Value};

use crate::cli::ConvertArgs;
use crate::error::CliError;

/// No converter bound the parameter.
const EXIT_UNBOUND: u8 = 2;

pub fn run(config_path: Option<&str>, args: ConvertArgs) -> Result<ExitCode, CliError> {
    let manager = super::load_manager(config_path)?;
    let target: TypeDescriptor = args.target.parse()?;
    let source = source_value(&args)?;

    tracing::debug!(parameter = %args.name, target = %target, source = source.kind_name(), "converting");
    match manager.try_convert(&source, &target, &args.name)? {
        Conversion::Converted(value) => {
            let out = serde_json::json!({
                "parameter": &args.name,
                "target": target.to_string(),
                "converted": true,
                "value": value.to_json(),
            });
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Conversion::Inapplicable => {
            let out = serde_json::json!({
                "parameter": &args.name,
                "target": target.to_string(),
                "converted": false,
            });
            println!("{out}");
            eprintln!(
                "no converter binds parameter '{}' ({} source) to {target}",
                args.name,
                source.kind_name()
            );
            Ok(ExitCode::from(EXIT_UNBOUND))
        }
    }
}

fn source_value(args: &ConvertArgs) -> Result<Value, CliError> {
    let Some(raw) = args.value.as_deref() else {
        return Ok(Value::Absent);
    };
    if args.json {
        Ok(Value::Json(serde_json::from_str(raw)?))
    } else if args.bytes {
        Ok(Value::Bytes(STANDARD.decode(raw)?))
    } else {
        Ok(Value::from(raw))
    }
}
