use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlateSegError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    #[error("Image encode error: {0}")]
    ImageEncodeError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Classifier error: {0}")]
    ClassifierError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`PlateSegError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl PlateSegError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create an invalid-input error (precondition violated by the caller).
    invalid_input => InvalidInput,
    /// Create an image decode error.
    image_decode => ImageDecodeError,
    /// Create an image encode error.
    image_encode => ImageEncodeError,
    /// Create a report error.
    report => ReportError,
    /// Create a classifier error.
    classifier => ClassifierError,
}

impl From<serde_json::Error> for PlateSegError {
    fn from(e: serde_json::Error) -> Self {
        Self::ReportError(e.to_string())
    }
}

impl From<serde_yml::Error> for PlateSegError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<image::ImageError> for PlateSegError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::Decoding(_) | image::ImageError::Unsupported(_) => {
                Self::ImageDecodeError(e.to_string())
            }
            image::ImageError::IoError(io) => Self::IoError(io),
            other => Self::ImageEncodeError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlateSegError>;
