//! Domain layer error types
//!
//! All errors that can stop an icon from being produced.

use thiserror::Error;

/// Main error type for the extraction pipeline
#[derive(Error, Debug)]
pub enum IconError {
    /// Bitmap allocation, drawing or read-back failed
    #[error("Render error: {reason}{}", code_suffix(.code))]
    Render {
        reason: String,
        /// Platform error code, when the platform reported one
        code: Option<u32>,
    },

    /// Pixel buffer length does not match the declared dimensions
    #[error("Sizing error: expected {expected} bytes, got {actual}")]
    Sizing { expected: usize, actual: usize },

    /// Icon resource could not be pulled out of an executable
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Resize/encode collaborator failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// IO error (wrapped)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The handle-based path only exists on Windows
    #[error("Icon extraction is not supported on this platform")]
    UnsupportedPlatform,
}

impl IconError {
    /// Render failure without a platform code
    pub fn render(reason: impl Into<String>) -> Self {
        IconError::Render {
            reason: reason.into(),
            code: None,
        }
    }

    /// Render failure carrying the platform's last error code
    pub fn render_with_code(reason: impl Into<String>, code: u32) -> Self {
        IconError::Render {
            reason: reason.into(),
            code: Some(code),
        }
    }
}

fn code_suffix(code: &Option<u32>) -> String {
    match code {
        Some(code) => format!(" (code {})", code),
        None => String::new(),
    }
}

impl From<image::ImageError> for IconError {
    fn from(err: image::ImageError) -> Self {
        IconError::Encode(err.to_string())
    }
}
