//! Built-in converter kinds.
//!
//! Each module exposes a `KIND` entry for the registry. `DEFAULT_CHAIN` is
//! the resolution order used when configuration does not list converters:
//! empty sources first, exact matches next, then text parsing from the
//! narrowest target to the most general.

use std::sync::Arc;

use paramconv_api::config::ConfigParam;
use paramconv_api::converter::ParameterConverter;

use crate::registry::ConverterKind;

pub mod absent;
pub mod boolean;
pub mod bytes;
pub mod identity;
pub mod json;
pub mod numeric;

pub use absent::AbsentToOptional;
pub use boolean::StringToBool;
pub use bytes::BytesText;
pub use identity::Identity;
pub use json::JsonText;
pub use numeric::{NumericWiden, StringToFloat, StringToInt};

/// Every built-in kind, in default chain order.
pub const KINDS: &[ConverterKind] = &[
    absent::KIND,
    identity::KIND,
    numeric::WIDEN_KIND,
    numeric::INT_KIND,
    numeric::FLOAT_KIND,
    boolean::KIND,
    bytes::KIND,
    json::KIND,
];

pub const DEFAULT_CHAIN: &[&str] = &[
    "absent_to_optional",
    "identity",
    "numeric_widen",
    "string_to_int",
    "string_to_float",
    "string_to_bool",
    "bytes_text",
    "json_text",
];

/// The default chain with default settings, without going through config.
pub fn default_chain() -> Vec<Arc<dyn ParameterConverter>> {
    vec![
        Arc::new(AbsentToOptional),
        Arc::new(Identity),
        Arc::new(NumericWiden),
        Arc::new(StringToInt::default()),
        Arc::new(StringToFloat::default()),
        Arc::new(StringToBool::default()),
        Arc::new(BytesText::default()),
        Arc::new(JsonText),
    ]
}

/// `config_params` for kinds without settings.
pub(crate) fn no_params() -> Vec<ConfigParam> {
    Vec::new()
}
