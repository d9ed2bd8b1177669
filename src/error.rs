//! Error types for stamp pipeline operations.

use thiserror::Error;

/// Primary error type for stamp pipeline operations.
#[derive(Error, Debug)]
pub enum StampError {
    // Stamp library errors
    #[error("Stamps directory not found: {path}")]
    StampsDirNotFound { path: String },

    #[error("No stamp images found in {dir}")]
    NoStampsFound { dir: String },

    #[error("Invalid stamp index {index}: must be 1 or greater")]
    InvalidStampIndex { index: i64 },

    // Image errors
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Image file not found: {path}")]
    ImageNotFound { path: String },

    // Layout configuration errors
    #[error("Layout file not found: {path}")]
    LayoutNotFound { path: String },

    #[error("Layout parse error: {0}")]
    LayoutParse(String),

    #[error("Invalid layout: {0}")]
    LayoutInvalid(String),

    // Archive errors
    #[error("Archive write failed: {0}")]
    Archive(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl StampError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::StampsDirNotFound { .. }
                | Self::NoStampsFound { .. }
                | Self::InvalidStampIndex { .. }
                | Self::ImageNotFound { .. }
                | Self::LayoutNotFound { .. }
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::StampsDirNotFound { .. } => {
                Some("Ensure the stamp images are located in public/stamps/ or pass --stamps-dir")
            }
            Self::NoStampsFound { .. } => {
                Some("Stamp files must be named {index}.png (e.g. 1.png, 2.png)")
            }
            Self::InvalidStampIndex { .. } => Some("Use a positive stamp number, e.g. 7"),
            Self::LayoutNotFound { .. } => Some("Check the path passed to --layout"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using StampError.
pub type Result<T> = std::result::Result<T, StampError>;
