use paramconv_engine::{ConverterError, DescriptorParseError, EngineError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Descriptor(#[from] DescriptorParseError),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("converter defect: {0}")]
    Defect(#[from] ConverterError),
}
