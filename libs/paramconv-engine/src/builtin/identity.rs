use std::sync::Arc;

use paramconv_api::config::ConfigValues;
use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::TypeDescriptor;
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;

use crate::registry::ConverterKind;

pub const KIND: ConverterKind = ConverterKind {
    name: "identity",
    config_params: super::no_params,
    create,
};

fn create(_config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    Ok(Arc::new(Identity))
}

/// Source already is a value of the target type; hand over a copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ParameterConverter for Identity {
    fn name(&self) -> &str {
        KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        if target.accepts(source) {
            Ok(Conversion::Converted(source.clone()))
        } else {
            Ok(Conversion::Inapplicable)
        }
    }
}
