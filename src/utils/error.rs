use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("cannot read input file '{}': {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output file '{}': {source}", path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid bitmap: {reason}")]
    InvalidBitmap { reason: String },

    #[error("Encoded payload exceeds {max} bytes")]
    PayloadTooLarge { max: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Encoding,
    Output,
}

impl CompareError {
    pub fn input_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_bitmap(reason: impl Into<String>) -> Self {
        Self::InvalidBitmap {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputUnavailable { .. } | Self::InvalidBitmap { .. } => ErrorCategory::Input,
            Self::OutputUnavailable { .. } => ErrorCategory::Output,
            Self::PayloadTooLarge { .. } => ErrorCategory::Encoding,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit status for the process when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Encoding => 3,
            ErrorCategory::Output => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputUnavailable { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => {
                    "Check that the file exists relative to the working or base directory"
                }
                std::io::ErrorKind::PermissionDenied => "Check the file's read permissions",
                _ => "Make sure the path names a readable regular file",
            },
            Self::OutputUnavailable { .. } => "Check that the output directory is writable",
            Self::InvalidBitmap { .. } => {
                "Provide an uncompressed 1bpp BMP with a BITMAPINFOHEADER and a black first palette entry"
            }
            Self::PayloadTooLarge { .. } => "Use a smaller or less detailed bitmap",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the configuration file syntax"
            }
            Self::InvalidConfigValueError { .. } => "Provide a valid value for the named field",
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
