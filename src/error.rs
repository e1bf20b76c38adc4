use miette::Diagnostic;
use thiserror::Error;

/// Main error type for blazon operations
#[derive(Error, Diagnostic, Debug)]
pub enum BlazonError {
    #[error("IO error: {0}")]
    #[diagnostic(code(blazon::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(blazon::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Asset error: primitive '{id}': {message}")]
    #[diagnostic(code(blazon::asset))]
    Asset {
        id: String,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(blazon::encode))]
    Encode { message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(blazon::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl BlazonError {
    /// Build an `Asset` error for a primitive that could not be resolved.
    pub fn asset(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Asset {
            id: id.into(),
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlazonError>;
