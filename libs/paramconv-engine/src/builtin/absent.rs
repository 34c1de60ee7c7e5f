use std::sync::Arc;

use paramconv_api::config::ConfigValues;
use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::TypeDescriptor;
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;

use crate::registry::ConverterKind;

pub const KIND: ConverterKind = ConverterKind {
    name: "absent_to_optional",
    config_params: super::no_params,
    create,
};

fn create(_config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    Ok(Arc::new(AbsentToOptional))
}

/// Binds a missing or null source to an empty optional.
///
/// The only built-in that applies to `Absent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsentToOptional;

impl ParameterConverter for AbsentToOptional {
    fn name(&self) -> &str {
        KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        if source.is_empty() && target.is_optional() {
            Ok(Conversion::Converted(Value::Null))
        } else {
            Ok(Conversion::Inapplicable)
        }
    }
}
