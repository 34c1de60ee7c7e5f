pub mod config;
pub mod converter;
pub mod descriptor;
pub mod error;
pub mod value;

pub use converter::{Conversion, ParameterConverter};
pub use descriptor::{FromValue, TypeDescriptor};
pub use error::{ConverterError, ErrorKind};
pub use paramconv_api_derive::ConfigParams;
pub use value::Value;
