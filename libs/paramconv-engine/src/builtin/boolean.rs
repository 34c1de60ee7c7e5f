use std::sync::Arc;

use paramconv_api::config::ConfigValues;
use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::TypeDescriptor;
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;
use paramconv_api::ConfigParams;

use crate::registry::ConverterKind;

pub const KIND: ConverterKind = ConverterKind {
    name: "string_to_bool",
    config_params: StringToBoolConfig::config_params,
    create,
};

#[derive(Debug, Clone, ConfigParams)]
pub struct StringToBoolConfig {
    #[param(description = "Literals read as true")]
    pub truthy: Vec<String>,
    #[param(description = "Literals read as false")]
    pub falsy: Vec<String>,
    #[param(description = "Compare literals case-sensitively")]
    pub case_sensitive: bool,
}

impl Default for StringToBoolConfig {
    fn default() -> Self {
        Self {
            truthy: vec!["true".to_string()],
            falsy: vec!["false".to_string()],
            case_sensitive: false,
        }
    }
}

fn create(config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    let config = StringToBoolConfig::from_config(config)?;
    Ok(Arc::new(StringToBool::new(config)?))
}

/// Maps boolean literals to `bool`. Anything else is inapplicable.
#[derive(Debug, Clone)]
pub struct StringToBool {
    truthy: Vec<String>,
    falsy: Vec<String>,
    case_sensitive: bool,
}

impl StringToBool {
    pub fn new(config: StringToBoolConfig) -> Result<Self, ConverterError> {
        let converter = Self::folded(config);

        if converter.truthy.is_empty() || converter.falsy.is_empty() {
            return Err(ConverterError::config("truthy and falsy must not be empty"));
        }
        if converter.truthy.iter().chain(&converter.falsy).any(String::is_empty) {
            return Err(ConverterError::config("boolean literals must not be blank"));
        }
        if let Some(both) = converter.truthy.iter().find(|t| converter.falsy.contains(t)) {
            return Err(ConverterError::config(format!(
                "literal '{both}' is both truthy and falsy"
            )));
        }

        Ok(converter)
    }

    /// Trim literals and fold case; no validation.
    fn folded(config: StringToBoolConfig) -> Self {
        let case_sensitive = config.case_sensitive;
        let fold = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .map(|s| {
                    let s = s.trim().to_string();
                    if case_sensitive { s } else { s.to_lowercase() }
                })
                .collect()
        };
        Self {
            truthy: fold(config.truthy),
            falsy: fold(config.falsy),
            case_sensitive,
        }
    }

    fn literal(&self, text: &str) -> Option<bool> {
        let text = text.trim();
        let folded;
        let key = if self.case_sensitive {
            text
        } else {
            folded = text.to_lowercase();
            folded.as_str()
        };

        if self.truthy.iter().any(|t| t == key) {
            Some(true)
        } else if self.falsy.iter().any(|f| f == key) {
            Some(false)
        } else {
            None
        }
    }
}

impl Default for StringToBool {
    fn default() -> Self {
        Self::folded(StringToBoolConfig::default())
    }
}

impl ParameterConverter for StringToBool {
    fn name(&self) -> &str {
        KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        let (Some(text), TypeDescriptor::Bool) = (source.as_str(), target.non_optional()) else {
            return Ok(Conversion::Inapplicable);
        };
        Ok(self
            .literal(text)
            .map_or(Conversion::Inapplicable, |b| Conversion::Converted(Value::Bool(b))))
    }
}
