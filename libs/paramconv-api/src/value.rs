/// Runtime value handed to the engine by the invocation pipeline.
///
/// Strategy by shape:
/// - Scalars (Int64, UInt64, Float64, Bool): carried as-is
/// - String, Bytes: owned, the engine only borrows the source
/// - Json: platform-native structured payload, kept untyped
/// - Array, Record: produced by converters from structured sources
///
/// `Absent` is not a value of any type: the pipeline had nothing to bind.
/// It is distinct from `Null`, which is a present-but-empty value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Null,

    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Bool(bool),

    String(String),
    /// Opaque binary data (raw message body, blob trigger content).
    Bytes(Vec<u8>),

    Json(serde_json::Value),

    /// Elements converted individually.
    Array(Vec<Value>),
    /// Structured value of an application-defined type, matched by name.
    Record {
        type_name: String,
        body: serde_json::Map<String, serde_json::Value>,
    },
}

impl Value {
    /// Short shape name for diagnostics (logs, error messages).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Int64(_) => "int64",
            Value::UInt64(_) => "uint64",
            Value::Float64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Json(_) => "json",
            Value::Array(_) => "array",
            Value::Record { .. } => "record",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// `Absent` or `Null`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Absent | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Map a JSON document onto the closest value shape.
    ///
    /// Objects stay `Json` because their target type is not known yet.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt64(u)
                } else {
                    // serde_json numbers are always i64, u64 or finite f64.
                    Value::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            obj @ serde_json::Value::Object(_) => Value::Json(obj),
        }
    }

    /// Render as JSON for output surfaces.
    ///
    /// Bytes are rendered as an array of numbers, `Absent` as `null`.
    /// Non-finite floats have no JSON form and render as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Absent | Value::Null => serde_json::Value::Null,
            Value::Int64(v) => serde_json::Value::from(*v),
            Value::UInt64(v) => serde_json::Value::from(*v),
            Value::Float64(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::from(b.clone()),
            Value::Json(j) => j.clone(),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Record { body, .. } => serde_json::Value::Object(body.clone()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}
