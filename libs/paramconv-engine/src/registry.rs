use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use paramconv_api::config::{ConfigParam, ConfigValues, ParamType, ParamValue};
use paramconv_api::converter::ParameterConverter;
use paramconv_api::error::ConverterError;

use crate::builtin;
use crate::config::ConverterConfig;
use crate::error::EngineError;

/// Returns the config parameters a converter kind accepts.
pub type ConfigParamsFn = fn() -> Vec<ConfigParam>;

/// Creates a converter from validated config values.
pub type CreateConverterFn =
    fn(&ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError>;

/// A converter kind that can be named in configuration.
#[derive(Clone, Copy)]
pub struct ConverterKind {
    pub name: &'static str,
    pub config_params: ConfigParamsFn,
    pub create: CreateConverterFn,
}

impl std::fmt::Debug for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterKind").field("name", &self.name).finish()
    }
}

/// Explicit table of converter kinds available to configuration.
///
/// Kinds are declared in code; nothing is discovered at runtime. The
/// registry only builds chains, it never reorders them.
#[derive(Debug, Clone, Default)]
pub struct ConverterRegistry {
    kinds: Vec<ConverterKind>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Registry with every built-in kind.
    pub fn builtin() -> Self {
        Self {
            kinds: builtin::KINDS.to_vec(),
        }
    }

    /// Add a kind. Names must be unique.
    pub fn register(&mut self, kind: ConverterKind) -> Result<(), EngineError> {
        if self.get(kind.name).is_some() {
            return Err(EngineError::Config(format!(
                "converter kind '{}' registered twice",
                kind.name
            )));
        }
        self.kinds.push(kind);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ConverterKind> {
        self.kinds.iter().find(|k| k.name == name)
    }

    pub fn kinds(&self) -> &[ConverterKind] {
        &self.kinds
    }

    /// Create one converter from its config entry.
    ///
    /// 1. Resolve the kind.
    /// 2. Parse config → raw values, validate, build ConfigValues.
    /// 3. Call the kind's factory.
    pub fn create(
        &self,
        entry: &ConverterConfig,
    ) -> Result<Arc<dyn ParameterConverter>, EngineError> {
        let kind = self
            .get(&entry.kind)
            .ok_or_else(|| EngineError::UnknownConverter(entry.kind.clone()))?;
        let params = (kind.config_params)();
        let config = entry.config_json()?;
        let raw = parse_converter_config(config.as_ref(), &params)?;
        let values = validate_and_build(&raw, &params)?;
        Ok((kind.create)(&values)?)
    }

    /// Build the ordered chain. Position in `entries` is resolution priority.
    pub fn build_chain(
        &self,
        entries: &[ConverterConfig],
    ) -> Result<Vec<Arc<dyn ParameterConverter>>, EngineError> {
        let mut chain = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            let ctx = format!("converter #{position} '{}'", entry.kind);
            let converter = self.create(entry).map_err(|e| e.with_context(&ctx))?;
            tracing::debug!(position, converter = %converter.name(), "registered converter");
            chain.push(converter);
        }
        Ok(chain)
    }
}

// ---------------------------------------------------------------------------
// Config parsing & validation (format-independent)
// ---------------------------------------------------------------------------

/// Parse converter config into format-independent key-value pairs.
///
/// `config` is a `serde_json::Value` already converted from the TOML table.
///
/// - Rejects unknown keys (not declared in `params`).
/// - Converts `serde_json::Value` → `ParamValue` based on declared `ParamType`.
///
/// Returns only the keys that are present in the config source.
/// Defaults and required-checks are handled by `validate_and_build`.
pub fn parse_converter_config(
    config: Option<&serde_json::Value>,
    params: &[ConfigParam],
) -> Result<HashMap<String, ParamValue>, EngineError> {
    let obj = match config {
        Some(serde_json::Value::Object(map)) => map,
        Some(_) => {
            return Err(EngineError::Config(
                "converter config must be a table".into(),
            ))
        }
        None => return Ok(HashMap::new()),
    };

    let known: HashSet<&str> = params.iter().map(|p| p.name.as_str()).collect();
    for key in obj.keys() {
        if !known.contains(key.as_str()) {
            return Err(EngineError::Config(format!("unknown parameter '{key}'")));
        }
    }

    let mut result = HashMap::new();
    for param in params {
        if let Some(v) = obj.get(&param.name) {
            result.insert(param.name.clone(), value_to_param_value(v, param)?);
        }
    }

    Ok(result)
}

/// Build `ConfigValues` from parsed key-value pairs.
///
/// For each declared param:
/// - If present in `parsed`: use the value.
/// - If absent with default: use default value.
/// - If absent and required: return error.
pub fn validate_and_build(
    parsed: &HashMap<String, ParamValue>,
    params: &[ConfigParam],
) -> Result<ConfigValues, EngineError> {
    let mut values = ConfigValues::new();

    for param in params {
        match parsed.get(&param.name) {
            Some(v) => values.set(&param.name, v.clone()),
            None => {
                if let Some(ref default) = param.default {
                    values.set(&param.name, default.clone());
                } else if param.required {
                    return Err(EngineError::Config(format!(
                        "missing required parameter '{}'",
                        param.name
                    )));
                }
            }
        }
    }

    Ok(values)
}

fn type_error(param: &ConfigParam) -> EngineError {
    EngineError::Config(format!(
        "parameter '{}': expected {}",
        param.name, param.param_type
    ))
}

/// Convert a single value to a ParamValue according to the declared type.
fn value_to_param_value(
    val: &serde_json::Value,
    param: &ConfigParam,
) -> Result<ParamValue, EngineError> {
    match param.param_type {
        ParamType::Bool => val.as_bool().map(ParamValue::Bool).ok_or_else(|| type_error(param)),
        ParamType::I64 => val.as_i64().map(ParamValue::I64).ok_or_else(|| type_error(param)),
        ParamType::U64 => val.as_u64().map(ParamValue::U64).ok_or_else(|| type_error(param)),
        ParamType::F64 => val.as_f64().map(ParamValue::F64).ok_or_else(|| type_error(param)),
        ParamType::Str => match val {
            serde_json::Value::String(s) => Ok(ParamValue::Str(s.clone())),
            serde_json::Value::Number(n) => Ok(ParamValue::Str(n.to_string())),
            serde_json::Value::Bool(b) => Ok(ParamValue::Str(b.to_string())),
            _ => Err(type_error(param)),
        },
        ParamType::StrList => {
            let items = val.as_array().ok_or_else(|| type_error(param))?;
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(ParamValue::StrList)
                .ok_or_else(|| type_error(param))
        }
    }
}
