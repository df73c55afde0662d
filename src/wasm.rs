//! WebAssembly exports for the morphology filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen and operate on
//! flat RGBA byte arrays, e.g. `ImageData.data` from a canvas.
//!
//! Structuring elements are passed as 9 row-major flags; an empty array
//! selects the full 3x3 neighborhood. Validation failures are thrown as JS
//! errors carrying the message.

use wasm_bindgen::prelude::*;

use crate::filters::buffer::{into_raw, rgba_view, rgba_view_mut};
use crate::filters::morphology::{close_u8, dilate_u8, erode_u8, hit_or_miss_u8, open_u8};
use crate::filters::{apply_rgba, MorphologyError, StructuringElement};

fn to_js(err: MorphologyError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn element_or_full(element: &[u8]) -> Result<StructuringElement, JsValue> {
    if element.is_empty() {
        Ok(StructuringElement::full())
    } else {
        StructuringElement::from_flat(element).map_err(to_js)
    }
}

// ============================================================================
// Dilate / Erode
// ============================================================================

/// Dilate an RGBA u8 image.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `element` - 9 structuring element flags (0 or 1), or empty for all ones
///
/// # Returns
/// Flat array of RGBA bytes
#[wasm_bindgen]
pub fn dilate_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<Vec<u8>, JsValue> {
    let se = element_or_full(element)?;
    let input = rgba_view(data, width, height).map_err(to_js)?;
    let result = dilate_u8(input, &se).map_err(to_js)?;
    Ok(into_raw(result))
}

/// Erode an RGBA u8 image.
#[wasm_bindgen]
pub fn erode_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<Vec<u8>, JsValue> {
    let se = element_or_full(element)?;
    let input = rgba_view(data, width, height).map_err(to_js)?;
    let result = erode_u8(input, &se).map_err(to_js)?;
    Ok(into_raw(result))
}

// ============================================================================
// Open / Close
// ============================================================================

/// Morphological opening (erode then dilate) of an RGBA u8 image.
#[wasm_bindgen]
pub fn open_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<Vec<u8>, JsValue> {
    let se = element_or_full(element)?;
    let input = rgba_view(data, width, height).map_err(to_js)?;
    let result = open_u8(input, &se).map_err(to_js)?;
    Ok(into_raw(result))
}

/// Morphological closing (dilate then erode) of an RGBA u8 image.
#[wasm_bindgen]
pub fn close_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<Vec<u8>, JsValue> {
    let se = element_or_full(element)?;
    let input = rgba_view(data, width, height).map_err(to_js)?;
    let result = close_u8(input, &se).map_err(to_js)?;
    Ok(into_raw(result))
}

// ============================================================================
// Hit-or-Miss / Dispatch
// ============================================================================

/// Hit-or-miss transform of an RGBA u8 image.
///
/// `data` is binarized in place; the change is copied back into the
/// caller's typed array.
#[wasm_bindgen]
pub fn hit_or_miss_rgba_wasm(
    data: &mut [u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsValue> {
    let input = rgba_view_mut(data, width, height).map_err(to_js)?;
    let result = hit_or_miss_u8(input).map_err(to_js)?;
    Ok(into_raw(result))
}

/// Apply a morphology operator selected by name.
///
/// # Arguments
/// * `name` - `dilation`, `erosion`, `opening`, `closing` or `hit-or-miss`
/// * `data` - Flat array of RGBA bytes; binarized in place for hit-or-miss
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `element` - 9 structuring element flags, or empty for all ones
#[wasm_bindgen]
pub fn morphology_rgba_wasm(
    name: &str,
    data: &mut [u8],
    width: usize,
    height: usize,
    element: &[u8],
) -> Result<Vec<u8>, JsValue> {
    apply_rgba(name, data, width, height, element).map_err(to_js)
}
