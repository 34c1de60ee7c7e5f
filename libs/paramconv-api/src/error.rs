use std::fmt;

/// Category of a converter defect. Inapplicability is never an error;
/// every kind here means something is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid converter configuration. Permanent, fails at assembly.
    Config,
    /// Internal invariant of a converter violated during resolution.
    Invariant,
    /// Converter reported success with a value its target does not accept.
    Contract,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Config => f.write_str("config"),
            ErrorKind::Invariant => f.write_str("invariant"),
            ErrorKind::Contract => f.write_str("contract"),
        }
    }
}

/// Defect raised by a converter (or by the manager on its behalf).
///
/// Distinct from `Conversion::Inapplicable`: callers must report a defect
/// as a bug, not as a missing binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConverterError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Config, message: msg.into() }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Invariant, message: msg.into() }
    }

    pub fn contract(msg: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Contract, message: msg.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Add context to the error, preserving the original ErrorKind.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self {
            kind: self.kind,
            message: format!("{ctx}: {}", self.message),
        }
    }
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConverterError {}
