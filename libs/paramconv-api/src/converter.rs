use crate::descriptor::TypeDescriptor;
use crate::error::ConverterError;
use crate::value::Value;

/// Outcome of a single conversion attempt.
///
/// `Converted(Value::Null)` is a successful conversion to an empty optional,
/// not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// The converter applied; the value is accepted by the requested type.
    Converted(Value),
    /// The converter does not handle this source/target pair.
    Inapplicable,
}

impl Conversion {
    pub fn is_converted(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Conversion::Converted(v) => Some(v),
            Conversion::Inapplicable => None,
        }
    }
}

/// Parameter conversion strategy.
///
/// Solves one task: turn a source shape into a requested target type.
///
/// Contract:
/// - `Ok(Inapplicable)` when the pair is not handled, never `Err`.
/// - `Ok(Converted(v))` only with `target.accepts(&v)`.
/// - `Err` only for defects unrelated to applicability.
/// - No observable side effects; identical inputs give identical results.
///
/// Called concurrently from many in-flight resolutions without
/// synchronization.
pub trait ParameterConverter: Send + Sync {
    /// Diagnostic name (logs, chain listing). Never used for dispatch.
    fn name(&self) -> &str;

    fn try_convert(
        &self,
        source: &Value,
        target: &TypeDescriptor,
        parameter: &str,
    ) -> Result<Conversion, ConverterError>;
}
