//! Parameter conversion engine.
//!
//! [`ConversionManager`] resolves a runtime [`Value`] into a requested
//! [`TypeDescriptor`] by trying an ordered chain of converters. Chains are
//! assembled explicitly or from TOML through the [`ConverterRegistry`].
//!
//! ```
//! use paramconv_engine::{builtin, ConversionManager, Value};
//!
//! let manager = ConversionManager::new(builtin::default_chain());
//! let port: Option<i64> = manager.convert(&Value::from("8080"), "port").unwrap();
//! assert_eq!(port, Some(8080));
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod manager;
pub mod registry;

pub use config::{ConverterConfig, EngineConfig};
pub use error::EngineError;
pub use manager::ConversionManager;
pub use registry::{ConverterKind, ConverterRegistry};

pub use paramconv_api::descriptor::DescriptorParseError;
pub use paramconv_api::{
    Conversion, ConverterError, FromValue, ParameterConverter, TypeDescriptor, Value,
};
