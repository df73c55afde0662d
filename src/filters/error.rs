//! Error type shared by the morphology filters.

/// An error type for the morphology filters.
///
/// Every variant is raised by input validation before any pixel is touched.
#[derive(thiserror::Error, Debug)]
pub enum MorphologyError {
    /// Buffer length does not match `width * height * 4`, or a dimension is zero.
    #[error("Data length ({len}) does not match the image size {width}x{height}x4")]
    InvalidDimensions {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
        /// Length of the supplied buffer.
        len: usize,
    },

    /// Image array does not carry exactly 4 (RGBA) channels.
    #[error("Expected 4 RGBA channels, got {0}")]
    InvalidChannelCount(usize),

    /// Structuring element is not 3x3 or holds values outside {0, 1}.
    #[error("Invalid structuring element: {0}")]
    InvalidStructuringElement(String),

    /// Operator name is not one of the recognized morphology operators.
    #[error("Unrecognized operator: {0:?}")]
    UnrecognizedOperator(String),

    /// Error when shape is not valid.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),
}

/// Result alias for the morphology filters.
pub type Result<T> = std::result::Result<T, MorphologyError>;
