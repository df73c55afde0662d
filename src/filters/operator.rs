//! Operator selection and dispatch.
//!
//! An [`Operator`] pairs one of the five morphology transforms with the
//! structuring element it needs. Hit-or-miss carries none: its patterns are
//! fixed.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use ndarray::{Array3, ArrayView3, ArrayViewMut3};

use super::buffer::{into_raw, rgba_view_mut};
use super::error::{MorphologyError, Result};
use super::morphology::{close_u8, dilate_u8, erode_u8, hit_or_miss_u8, open_u8};
use super::structuring::StructuringElement;

/// A morphology transform ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Neighborhood maximum.
    Dilation(StructuringElement),
    /// Neighborhood minimum.
    Erosion(StructuringElement),
    /// Erosion followed by dilation with the same element.
    Opening(StructuringElement),
    /// Dilation followed by erosion with the same element.
    Closing(StructuringElement),
    /// Binarize, then match the built-in cross/corners patterns.
    HitOrMiss,
}

impl Operator {
    /// Names accepted by [`Operator::from_name`], in display order.
    pub const NAMES: [&'static str; 5] =
        ["dilation", "erosion", "opening", "closing", "hit-or-miss"];

    /// Build an operator from its selection name.
    ///
    /// Matching ignores case and surrounding whitespace. `se` is dropped for
    /// hit-or-miss.
    pub fn from_name(name: &str, se: StructuringElement) -> Result<Self> {
        let op = match name.trim().to_ascii_lowercase().as_str() {
            "dilation" => Self::Dilation(se),
            "erosion" => Self::Erosion(se),
            "opening" => Self::Opening(se),
            "closing" => Self::Closing(se),
            "hit-or-miss" | "hit_or_miss" | "hitormiss" => Self::HitOrMiss,
            _ => return Err(MorphologyError::UnrecognizedOperator(name.to_string())),
        };
        Ok(op)
    }

    /// Canonical selection name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dilation(_) => "dilation",
            Self::Erosion(_) => "erosion",
            Self::Opening(_) => "opening",
            Self::Closing(_) => "closing",
            Self::HitOrMiss => "hit-or-miss",
        }
    }

    /// Structuring element used by this operator, if it takes one.
    pub fn structuring_element(&self) -> Option<&StructuringElement> {
        match self {
            Self::Dilation(se) | Self::Erosion(se) | Self::Opening(se) | Self::Closing(se) => {
                Some(se)
            }
            Self::HitOrMiss => None,
        }
    }

    /// Run the operator on an RGBA image.
    ///
    /// Only [`Operator::HitOrMiss`] writes to `input` (it binarizes it in
    /// place); the others read it and return a fresh image.
    pub fn apply(&self, input: ArrayViewMut3<u8>) -> Result<Array3<u8>> {
        debug!("applying {} to {:?}", self.name(), input.dim());
        match self {
            Self::Dilation(se) => dilate_u8(input.view(), se),
            Self::Erosion(se) => erode_u8(input.view(), se),
            Self::Opening(se) => open_u8(input.view(), se),
            Self::Closing(se) => close_u8(input.view(), se),
            Self::HitOrMiss => hit_or_miss_u8(input),
        }
    }

    /// Whether [`Operator::apply`] writes to its input.
    pub fn mutates_input(&self) -> bool {
        matches!(self, Self::HitOrMiss)
    }

    /// Run the operator on a read-only RGBA image.
    ///
    /// Hit-or-miss binarizes a private copy, so `input` is never modified.
    pub fn apply_view(&self, input: ArrayView3<u8>) -> Result<Array3<u8>> {
        debug!("applying {} to {:?}", self.name(), input.dim());
        match self {
            Self::Dilation(se) => dilate_u8(input, se),
            Self::Erosion(se) => erode_u8(input, se),
            Self::Opening(se) => open_u8(input, se),
            Self::Closing(se) => close_u8(input, se),
            Self::HitOrMiss => {
                let mut scratch = input.to_owned();
                hit_or_miss_u8(scratch.view_mut())
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = MorphologyError;

    /// Parse with the default (full) structuring element.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s, StructuringElement::default())
    }
}

/// Apply a named operator to a flat RGBA buffer.
///
/// # Arguments
/// * `name` - One of [`Operator::NAMES`]
/// * `data` - Flat array of RGBA bytes (length = width * height * 4);
///   binarized in place for hit-or-miss
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `element` - 9 row-major structuring element flags; empty selects the
///   full 3x3 neighborhood
///
/// # Returns
/// Flat array of RGBA bytes with the same dimensions
pub fn apply_rgba(
    name: &str,
    data: &mut [u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<Vec<u8>> {
    let (op, view) = prepare(name, data, width, height, element)
        .inspect_err(|err| warn!("rejected {name:?} on {width}x{height} buffer: {err}"))?;
    Ok(into_raw(op.apply(view)?))
}

fn prepare<'a>(
    name: &str,
    data: &'a mut [u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<(Operator, ArrayViewMut3<'a, u8>)> {
    let se = if element.is_empty() {
        StructuringElement::default()
    } else {
        StructuringElement::from_flat(element)?
    };
    let op = Operator::from_name(name, se)?;
    let view = rgba_view_mut(data, width, height)?;
    Ok((op, view))
}
