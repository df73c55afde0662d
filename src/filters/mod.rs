//! Filter modules for binary/grayscale morphology.
//!
//! ## Supported Format
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | R = G = B intensity + alpha, 0-255 |
//!
//! Flat interleaved RGBA buffers (as produced by image decoders and canvas
//! APIs) are wrapped with [`buffer::rgba_view`] / [`buffer::rgba_view_mut`].
//!
//! ## Architecture
//!
//! - **3x3 neighborhood** - Structuring elements are fixed 3x3 binary masks
//! - **Red-channel sampling** - Kernels read R and write R, G and B
//! - **Alpha preservation** - Alpha is never modified
//! - **Border copy** - Outermost rows/columns are copied from the input
//! - **Validate first** - Every error is raised before any pixel is touched
//!
//! ## Operators
//!
//! - **Dilate / Erode**: neighborhood max / min
//! - **Open / Close**: erode-then-dilate / dilate-then-erode
//! - **Hit-or-Miss**: binarize (in place), then match fixed hit/miss patterns

pub mod buffer;
pub mod error;
pub mod morphology;
pub mod operator;
pub mod structuring;

pub use error::{MorphologyError, Result};
pub use operator::{apply_rgba, Operator};
pub use structuring::StructuringElement;
