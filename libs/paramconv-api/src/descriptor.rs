use std::fmt;
use std::str::FromStr;

use crate::value::Value;

/// Description of the type a handler parameter asks for.
///
/// Closed set of variants; `Named` is the structural fallback for
/// application-defined types only known at runtime, compared by name.
/// A descriptor is always fully resolved: `Optional` and `Array` carry
/// their element type.
///
/// Textual form (also the serde form):
/// - `int64`, `uint64`, `float64`, `bool`, `string`, `bytes`, `json`
/// - `optional<T>`, `array<T>`
/// - `named:OrderPlaced`
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeDescriptor {
    Int64,
    UInt64,
    Float64,
    Bool,
    String,
    Bytes,
    Json,
    Optional(Box<TypeDescriptor>),
    Array(Box<TypeDescriptor>),
    Named(String),
}

impl TypeDescriptor {
    pub fn optional(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Optional(Box::new(inner))
    }

    pub fn array(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(inner))
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::Optional(_))
    }

    /// The descriptor with every `Optional` layer removed.
    ///
    /// A converter producing `T` also satisfies `optional<T>`.
    pub fn non_optional(&self) -> &TypeDescriptor {
        let mut current = self;
        while let TypeDescriptor::Optional(inner) = current {
            current = inner;
        }
        current
    }

    /// Assignability test: is `value` a valid instance of this type?
    ///
    /// `Absent` is assignable to nothing; `Null` only to `optional<_>`.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Absent) => false,
            (TypeDescriptor::Optional(_), Value::Null) => true,
            (TypeDescriptor::Optional(inner), v) => inner.accepts(v),
            (TypeDescriptor::Int64, Value::Int64(_))
            | (TypeDescriptor::UInt64, Value::UInt64(_))
            | (TypeDescriptor::Float64, Value::Float64(_))
            | (TypeDescriptor::Bool, Value::Bool(_))
            | (TypeDescriptor::String, Value::String(_))
            | (TypeDescriptor::Bytes, Value::Bytes(_))
            | (TypeDescriptor::Json, Value::Json(_)) => true,
            (TypeDescriptor::Array(inner), Value::Array(items)) => {
                items.iter().all(|item| inner.accepts(item))
            }
            (TypeDescriptor::Named(name), Value::Record { type_name, .. }) => name == type_name,
            _ => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Int64 => f.write_str("int64"),
            TypeDescriptor::UInt64 => f.write_str("uint64"),
            TypeDescriptor::Float64 => f.write_str("float64"),
            TypeDescriptor::Bool => f.write_str("bool"),
            TypeDescriptor::String => f.write_str("string"),
            TypeDescriptor::Bytes => f.write_str("bytes"),
            TypeDescriptor::Json => f.write_str("json"),
            TypeDescriptor::Optional(inner) => write!(f, "optional<{inner}>"),
            TypeDescriptor::Array(inner) => write!(f, "array<{inner}>"),
            TypeDescriptor::Named(name) => write!(f, "named:{name}"),
        }
    }
}

/// Malformed textual type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorParseError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for DescriptorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type descriptor '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for DescriptorParseError {}

impl FromStr for TypeDescriptor {
    type Err = DescriptorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_descriptor(s.trim()).map_err(|reason| DescriptorParseError {
            input: s.to_string(),
            reason,
        })
    }
}

fn parse_descriptor(s: &str) -> Result<TypeDescriptor, &'static str> {
    if let Some(name) = s.strip_prefix("named:") {
        let name = name.trim();
        if name.is_empty() {
            return Err("named type requires a name");
        }
        return Ok(TypeDescriptor::Named(name.to_string()));
    }

    if let Some(rest) = s.strip_suffix('>') {
        let (head, inner) = rest.split_once('<').ok_or("unbalanced '>'")?;
        let inner = parse_descriptor(inner.trim())?;
        return match head.trim().to_ascii_lowercase().as_str() {
            "optional" => Ok(TypeDescriptor::optional(inner)),
            "array" => Ok(TypeDescriptor::array(inner)),
            _ => Err("unknown generic type (expected optional<T> or array<T>)"),
        };
    }

    match s.to_ascii_lowercase().as_str() {
        "int64" | "i64" => Ok(TypeDescriptor::Int64),
        "uint64" | "u64" => Ok(TypeDescriptor::UInt64),
        "float64" | "f64" => Ok(TypeDescriptor::Float64),
        "bool" => Ok(TypeDescriptor::Bool),
        "string" => Ok(TypeDescriptor::String),
        "bytes" => Ok(TypeDescriptor::Bytes),
        "json" => Ok(TypeDescriptor::Json),
        "optional" | "array" => Err("generic type requires an argument"),
        "" => Err("empty descriptor"),
        _ => Err("unknown type"),
    }
}

impl TryFrom<String> for TypeDescriptor {
    type Error = DescriptorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TypeDescriptor> for String {
    fn from(d: TypeDescriptor) -> Self {
        d.to_string()
    }
}

// ---------------------------------------------------------------------------
// Compile-time resolution
// ---------------------------------------------------------------------------

/// A Rust type that can be requested from the engine directly.
///
/// `descriptor()` is resolved per call site; `from_value()` extracts the
/// typed result from a value the descriptor accepts.
pub trait FromValue: Sized {
    fn descriptor() -> TypeDescriptor;
    fn from_value(value: Value) -> Option<Self>;
}

/// Binary payload, requested as `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

macro_rules! scalar_from_value {
    ($ty:ty, $desc:ident, $variant:ident) => {
        impl FromValue for $ty {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::$desc
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

scalar_from_value!(i64, Int64, Int64);
scalar_from_value!(u64, UInt64, UInt64);
scalar_from_value!(f64, Float64, Float64);
scalar_from_value!(bool, Bool, Bool);
scalar_from_value!(String, String, String);
scalar_from_value!(serde_json::Value, Json, Json);

impl FromValue for Binary {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Bytes
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(Binary(b)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::optional(T::descriptor())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}
