//! Morphology filters: Dilate, Erode, Open, Close, Hit-or-Miss.
//!
//! These filters apply 3x3 morphological operations to RGBA u8 images.
//!
//! ## Channel Handling
//!
//! Images are (height, width, 4). The neighborhood is sampled from the red
//! channel only and the result is written to R, G and B alike, so inputs are
//! expected to be grayscale (R = G = B) or already binarized. Alpha is never
//! modified.
//!
//! ## Borders
//!
//! The outermost rows and columns have no full 3x3 neighborhood. They are
//! copied from the input unchanged.
//!
//! ## Performance
//!
//! Output rows are independent, so the neighborhood scan is parallelized
//! over rows with Rayon. The source is only ever read during the scan.

use log::trace;
use ndarray::{Array3, ArrayView3, ArrayViewMut3};
use rayon::prelude::*;

use super::buffer::validate_rgba;
use super::error::Result;
use super::structuring::StructuringElement;

/// Red values strictly above this become 255 during hit-or-miss binarization.
pub const BINARIZE_THRESHOLD: u8 = 128;

// ============================================================================
// Shared kernel
// ============================================================================

/// Scan every interior pixel, fold `pick` over the red values of the
/// neighbors selected by `se`, and write the result to R, G and B.
fn rank_filter_u8(
    input: ArrayView3<u8>,
    se: &StructuringElement,
    init: u8,
    pick: fn(u8, u8) -> u8,
) -> Result<Array3<u8>> {
    validate_rgba(input.dim())?;
    let (height, width, channels) = input.dim();
    let offsets: Vec<(isize, isize)> = se.offsets().collect();

    // Border pixels keep these copied values.
    let mut output_flat: Vec<u8> = input.iter().copied().collect();
    output_flat
        .par_chunks_mut(width * channels)
        .enumerate()
        .skip(1)
        .take(height.saturating_sub(2))
        .for_each(|(y, row)| {
            for x in 1..width.saturating_sub(1) {
                let mut acc = init;
                for &(dy, dx) in &offsets {
                    let sy = (y as isize + dy) as usize;
                    let sx = (x as isize + dx) as usize;
                    acc = pick(acc, input[[sy, sx, 0]]);
                }
                let px = x * channels;
                row[px] = acc;
                row[px + 1] = acc;
                row[px + 2] = acc;
            }
        });

    Ok(Array3::from_shape_vec((height, width, channels), output_flat)?)
}

// ============================================================================
// Dilate / Erode
// ============================================================================

/// Apply dilation to image - u8 version.
///
/// Each interior pixel becomes the maximum red value among the neighbors
/// selected by the structuring element (0 if the element is empty).
/// Bright regions grow, dark regions shrink.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `se` - 3x3 structuring element
///
/// # Returns
/// Newly allocated dilated image; `input` is not modified
pub fn dilate_u8(input: ArrayView3<u8>, se: &StructuringElement) -> Result<Array3<u8>> {
    trace!("dilate {:?}", input.dim());
    rank_filter_u8(input, se, u8::MIN, std::cmp::max)
}

/// Apply erosion to image - u8 version.
///
/// Each interior pixel becomes the minimum red value among the neighbors
/// selected by the structuring element (255 if the element is empty).
/// Dark regions grow, bright regions shrink.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `se` - 3x3 structuring element
///
/// # Returns
/// Newly allocated eroded image; `input` is not modified
pub fn erode_u8(input: ArrayView3<u8>, se: &StructuringElement) -> Result<Array3<u8>> {
    trace!("erode {:?}", input.dim());
    rank_filter_u8(input, se, u8::MAX, std::cmp::min)
}

// ============================================================================
// Open / Close
// ============================================================================

/// Morphological opening (erode then dilate) - u8 version.
///
/// Removes small bright spots (noise) while preserving larger bright regions.
/// The same element is used for both passes.
pub fn open_u8(input: ArrayView3<u8>, se: &StructuringElement) -> Result<Array3<u8>> {
    let eroded = erode_u8(input, se)?;
    dilate_u8(eroded.view(), se)
}

/// Morphological closing (dilate then erode) - u8 version.
///
/// Fills small dark holes while preserving larger dark regions.
pub fn close_u8(input: ArrayView3<u8>, se: &StructuringElement) -> Result<Array3<u8>> {
    let dilated = dilate_u8(input, se)?;
    erode_u8(dilated.view(), se)
}

// ============================================================================
// Hit-or-Miss
// ============================================================================

/// Binarize an RGBA image in place.
///
/// R, G and B become 255 where red > [`BINARIZE_THRESHOLD`], else 0.
/// Alpha is preserved.
pub fn binarize_u8(mut input: ArrayViewMut3<u8>) -> Result<()> {
    validate_rgba(input.dim())?;
    let (height, width, _) = input.dim();

    for y in 0..height {
        for x in 0..width {
            let gray = if input[[y, x, 0]] > BINARIZE_THRESHOLD { 255 } else { 0 };
            input[[y, x, 0]] = gray;
            input[[y, x, 1]] = gray;
            input[[y, x, 2]] = gray;
        }
    }
    Ok(())
}

/// Hit-or-miss transform with the built-in patterns - u8 version.
///
/// Uses [`StructuringElement::cross`] as the hit pattern and
/// [`StructuringElement::corners`] as the miss pattern, so an interior pixel
/// is set when it and its 4-neighbors are white while all diagonal neighbors
/// are black.
///
/// **Side effect:** `input` is binarized in place first (see
/// [`binarize_u8`]). Copy the image beforehand to keep the original.
///
/// # Returns
/// Binary image (R = G = B in {0, 255} at interior pixels), alpha preserved
pub fn hit_or_miss_u8(input: ArrayViewMut3<u8>) -> Result<Array3<u8>> {
    hit_or_miss_with_u8(
        input,
        &StructuringElement::cross(),
        &StructuringElement::corners(),
    )
}

/// Hit-or-miss transform with caller-supplied patterns - u8 version.
///
/// A pixel matches when no `hit` neighbor is black and no `miss` neighbor
/// is white. Binarizes `input` in place before scanning.
pub fn hit_or_miss_with_u8(
    mut input: ArrayViewMut3<u8>,
    hit: &StructuringElement,
    miss: &StructuringElement,
) -> Result<Array3<u8>> {
    validate_rgba(input.dim())?;

    // Must finish before the scan reads any neighbor.
    binarize_u8(input.view_mut())?;

    let binary = input.view();
    let (height, width, channels) = binary.dim();
    let hit_offsets: Vec<(isize, isize)> = hit.offsets().collect();
    let miss_offsets: Vec<(isize, isize)> = miss.offsets().collect();
    trace!("hit-or-miss {:?}", binary.dim());

    let mut output_flat: Vec<u8> = binary.iter().copied().collect();
    output_flat
        .par_chunks_mut(width * channels)
        .enumerate()
        .skip(1)
        .take(height.saturating_sub(2))
        .for_each(|(y, row)| {
            let red = |dy: isize, dx: isize, x: usize| {
                binary[[(y as isize + dy) as usize, (x as isize + dx) as usize, 0]]
            };

            for x in 1..width.saturating_sub(1) {
                let is_hit = hit_offsets.iter().all(|&(dy, dx)| red(dy, dx, x) != 0);
                let is_miss = miss_offsets.iter().all(|&(dy, dx)| red(dy, dx, x) != 255);

                let value = if is_hit && is_miss { 255 } else { 0 };
                let px = x * channels;
                row[px] = value;
                row[px + 1] = value;
                row[px + 2] = value;
            }
        });

    Ok(Array3::from_shape_vec((height, width, channels), output_flat)?)
}
