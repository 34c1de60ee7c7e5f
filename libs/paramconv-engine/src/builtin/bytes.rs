use std::sync::Arc;

use base64::Engine as _;

use paramconv_api::config::ConfigValues;
use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::TypeDescriptor;
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;
use paramconv_api::ConfigParams;

use crate::registry::ConverterKind;

pub const KIND: ConverterKind = ConverterKind {
    name: "bytes_text",
    config_params: BytesTextConfig::config_params,
    create,
};

#[derive(Debug, Clone, ConfigParams)]
pub struct BytesTextConfig {
    #[param(description = "Text encoding of binary payloads: utf8 or base64")]
    pub encoding: String,
}

impl Default for BytesTextConfig {
    fn default() -> Self {
        Self {
            encoding: "utf8".to_string(),
        }
    }
}

/// How binary payloads are represented as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Base64,
}

impl std::str::FromStr for Encoding {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "base64" => Ok(Encoding::Base64),
            other => Err(ConverterError::config(format!(
                "unknown encoding '{other}' (expected utf8 or base64)"
            ))),
        }
    }
}

fn create(config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    let config = BytesTextConfig::from_config(config)?;
    Ok(Arc::new(BytesText::new(config.encoding.parse()?)))
}

/// `bytes` ↔ `string` using the configured encoding.
///
/// UTF-8 decoding fails (inapplicable) on invalid sequences; base64
/// decoding fails on malformed input.
#[derive(Debug, Clone, Default)]
pub struct BytesText {
    encoding: Encoding,
}

impl BytesText {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    fn to_text(&self, bytes: &[u8]) -> Option<String> {
        match self.encoding {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Encoding::Base64 => Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        }
    }

    fn to_bytes(&self, text: &str) -> Option<Vec<u8>> {
        match self.encoding {
            Encoding::Utf8 => Some(text.as_bytes().to_vec()),
            Encoding::Base64 => base64::engine::general_purpose::STANDARD
                .decode(text.trim())
                .ok(),
        }
    }
}

impl ParameterConverter for BytesText {
    fn name(&self) -> &str {
        KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        let converted = match (source, target.non_optional()) {
            (Value::Bytes(b), TypeDescriptor::String) => self.to_text(b).map(Value::String),
            (Value::String(s), TypeDescriptor::Bytes) => self.to_bytes(s).map(Value::Bytes),
            _ => None,
        };
        Ok(converted.map_or(Conversion::Inapplicable, Conversion::Converted))
    }
}
