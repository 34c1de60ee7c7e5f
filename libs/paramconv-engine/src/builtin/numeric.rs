use std::sync::Arc;

use paramconv_api::config::ConfigValues;
use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::TypeDescriptor;
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;
use paramconv_api::ConfigParams;

use crate::registry::ConverterKind;

pub const INT_KIND: ConverterKind = ConverterKind {
    name: "string_to_int",
    config_params: StringToIntConfig::config_params,
    create: create_int,
};

pub const FLOAT_KIND: ConverterKind = ConverterKind {
    name: "string_to_float",
    config_params: StringToFloatConfig::config_params,
    create: create_float,
};

pub const WIDEN_KIND: ConverterKind = ConverterKind {
    name: "numeric_widen",
    config_params: super::no_params,
    create: create_widen,
};

/// Largest integer magnitude an f64 represents exactly (2^53).
const F64_EXACT_INT: u64 = 1 << 53;

/// `v` as f64, if the conversion is exact.
pub(crate) fn int_to_f64(v: i64) -> Option<f64> {
    (v.unsigned_abs() <= F64_EXACT_INT).then_some(v as f64)
}

pub(crate) fn uint_to_f64(v: u64) -> Option<f64> {
    (v <= F64_EXACT_INT).then_some(v as f64)
}

// ---------------------------------------------------------------------------
// string_to_int
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, ConfigParams)]
pub struct StringToIntConfig {
    #[param(description = "Numeric base of the text, 2..=36")]
    pub radix: u64,
    #[param(description = "Strip surrounding whitespace before parsing")]
    pub trim: bool,
}

impl Default for StringToIntConfig {
    fn default() -> Self {
        Self { radix: 10, trim: true }
    }
}

fn create_int(config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    let config = StringToIntConfig::from_config(config)?;
    Ok(Arc::new(StringToInt::new(config)?))
}

/// Parses integer text into `int64` / `uint64`.
#[derive(Debug, Clone)]
pub struct StringToInt {
    radix: u32,
    trim: bool,
}

impl StringToInt {
    pub fn new(config: StringToIntConfig) -> Result<Self, ConverterError> {
        let radix = u32::try_from(config.radix)
            .ok()
            .filter(|r| (2..=36).contains(r))
            .ok_or_else(|| {
                ConverterError::config(format!("radix must be in 2..=36, got {}", config.radix))
            })?;
        Ok(Self {
            radix,
            trim: config.trim,
        })
    }
}

impl Default for StringToInt {
    fn default() -> Self {
        let config = StringToIntConfig::default();
        Self {
            radix: config.radix as u32,
            trim: config.trim,
        }
    }
}

impl ParameterConverter for StringToInt {
    fn name(&self) -> &str {
        INT_KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        let Some(text) = source.as_str() else {
            return Ok(Conversion::Inapplicable);
        };
        let text = if self.trim { text.trim() } else { text };

        let parsed = match target.non_optional() {
            TypeDescriptor::Int64 => i64::from_str_radix(text, self.radix).ok().map(Value::Int64),
            TypeDescriptor::UInt64 => {
                u64::from_str_radix(text, self.radix).ok().map(Value::UInt64)
            }
            _ => None,
        };
        Ok(parsed.map_or(Conversion::Inapplicable, Conversion::Converted))
    }
}

// ---------------------------------------------------------------------------
// string_to_float
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, ConfigParams)]
pub struct StringToFloatConfig {
    #[param(description = "Strip surrounding whitespace before parsing")]
    pub trim: bool,
    #[param(description = "Accept inf / NaN literals")]
    pub allow_non_finite: bool,
}

impl Default for StringToFloatConfig {
    fn default() -> Self {
        Self {
            trim: true,
            allow_non_finite: false,
        }
    }
}

fn create_float(config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    let config = StringToFloatConfig::from_config(config)?;
    Ok(Arc::new(StringToFloat::new(config)))
}

/// Parses decimal text into `float64`.
#[derive(Debug, Clone)]
pub struct StringToFloat {
    trim: bool,
    allow_non_finite: bool,
}

impl StringToFloat {
    pub fn new(config: StringToFloatConfig) -> Self {
        Self {
            trim: config.trim,
            allow_non_finite: config.allow_non_finite,
        }
    }
}

impl Default for StringToFloat {
    fn default() -> Self {
        Self::new(StringToFloatConfig::default())
    }
}

impl ParameterConverter for StringToFloat {
    fn name(&self) -> &str {
        FLOAT_KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        let (Some(text), TypeDescriptor::Float64) = (source.as_str(), target.non_optional()) else {
            return Ok(Conversion::Inapplicable);
        };
        let text = if self.trim { text.trim() } else { text };

        match text.parse::<f64>() {
            Ok(v) if v.is_finite() || self.allow_non_finite => {
                Ok(Conversion::Converted(Value::Float64(v)))
            }
            _ => Ok(Conversion::Inapplicable),
        }
    }
}

// ---------------------------------------------------------------------------
// numeric_widen
// ---------------------------------------------------------------------------

fn create_widen(_config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    Ok(Arc::new(NumericWiden))
}

/// Lossless conversions between numeric shapes.
///
/// - `int64` / `uint64` → `float64` when the magnitude is at most 2^53
/// - `int64` → `uint64` when non-negative
/// - `uint64` → `int64` when it fits
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericWiden;

impl ParameterConverter for NumericWiden {
    fn name(&self) -> &str {
        WIDEN_KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        let converted = match (source, target.non_optional()) {
            (Value::Int64(v), TypeDescriptor::Float64) => int_to_f64(*v).map(Value::Float64),
            (Value::UInt64(v), TypeDescriptor::Float64) => uint_to_f64(*v).map(Value::Float64),
            (Value::Int64(v), TypeDescriptor::UInt64) => u64::try_from(*v).ok().map(Value::UInt64),
            (Value::UInt64(v), TypeDescriptor::Int64) => i64::try_from(*v).ok().map(Value::Int64),
            _ => None,
        };
        Ok(converted.map_or(Conversion::Inapplicable, Conversion::Converted))
    }
}
