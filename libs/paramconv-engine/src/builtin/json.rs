use std::sync::Arc;

use paramconv_api::config::ConfigValues;
use paramconv_api::converter::{Conversion, ParameterConverter};
use paramconv_api::descriptor::TypeDescriptor;
use paramconv_api::error::ConverterError;
use paramconv_api::value::Value;

use super::numeric;
use crate::registry::ConverterKind;

pub const KIND: ConverterKind = ConverterKind {
    name: "json_text",
    config_params: super::no_params,
    create,
};

fn create(_config: &ConfigValues) -> Result<Arc<dyn ParameterConverter>, ConverterError> {
    Ok(Arc::new(JsonText))
}

/// Deserializes JSON payloads into structured targets.
///
/// Sources: JSON text (`string` or `bytes`), untyped `json` documents, and
/// JSON-shaped arrays or scalars. Targets: `json`, `named:T` (object →
/// record), `array<T>`, and their optionals. A `json` document also binds
/// scalar targets; scalar targets from text are left to the text converters.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonText;

impl ParameterConverter for JsonText {
    fn name(&self) -> &str {
        KIND.name
    }

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        _parameter: &str,
    ) -> Result<Conversion, ConverterError> {
        let structured = matches!(
            target.non_optional(),
            TypeDescriptor::Json | TypeDescriptor::Named(_) | TypeDescriptor::Array(_)
        );

        let document = match source {
            Value::Json(j) => Some(j.clone()),
            _ if !structured => None,
            Value::String(s) => serde_json::from_str(s).ok(),
            Value::Bytes(b) => serde_json::from_slice(b).ok(),
            Value::Array(_) | Value::Int64(_) | Value::UInt64(_) | Value::Float64(_) | Value::Bool(_)
                if json_shaped(source) =>
            {
                Some(source.to_json())
            }
            _ => None,
        };

        Ok(document
            .and_then(|doc| json_to_target(doc, target))
            .map_or(Conversion::Inapplicable, Conversion::Converted))
    }
}

/// Whether `value` renders to JSON without loss.
fn json_shaped(value: &Value) -> bool {
    match value {
        Value::Null
        | Value::Bool(_)
        | Value::Int64(_)
        | Value::UInt64(_)
        | Value::String(_)
        | Value::Json(_) => true,
        Value::Float64(v) => v.is_finite(),
        Value::Array(items) => items.iter().all(json_shaped),
        Value::Absent | Value::Bytes(_) | Value::Record { .. } => false,
    }
}

/// Shape a JSON document as `target`, or `None` if it does not fit.
fn json_to_target(doc: serde_json::Value, target: &TypeDescriptor) -> Option<Value> {
    use serde_json::Value as Json;

    match (target, doc) {
        (TypeDescriptor::Optional(_), Json::Null) => Some(Value::Null),
        (TypeDescriptor::Optional(inner), doc) => json_to_target(doc, inner),
        (TypeDescriptor::Json, doc) => Some(Value::Json(doc)),
        (TypeDescriptor::Named(name), Json::Object(body)) => Some(Value::Record {
            type_name: name.clone(),
            body,
        }),
        (TypeDescriptor::Array(inner), Json::Array(items)) => items
            .into_iter()
            .map(|item| json_to_target(item, inner))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        (TypeDescriptor::Float64, Json::Number(n)) => {
            let exact = if let Some(i) = n.as_i64() {
                numeric::int_to_f64(i)
            } else if let Some(u) = n.as_u64() {
                numeric::uint_to_f64(u)
            } else {
                n.as_f64()
            };
            exact.map(Value::Float64)
        }
        (target, doc) => {
            let value = Value::from_json(doc);
            target.accepts(&value).then_some(value)
        }
    }
}
