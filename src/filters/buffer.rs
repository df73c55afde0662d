//! RGBA pixel buffer helpers.
//!
//! Images are `(height, width, 4)` u8 arrays. At the boundary (WASM, raw
//! decoded bitmaps) they arrive as flat interleaved RGBA bytes plus
//! dimensions; these helpers validate and convert between the two forms.

use ndarray::{Array3, ArrayView3, ArrayViewMut3};

use super::error::{MorphologyError, Result};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const RGBA_CHANNELS: usize = 4;

/// Check that an `(height, width, channels)` shape is a non-empty RGBA image.
pub fn validate_rgba(dim: (usize, usize, usize)) -> Result<()> {
    let (height, width, channels) = dim;
    if channels != RGBA_CHANNELS {
        return Err(MorphologyError::InvalidChannelCount(channels));
    }
    if width == 0 || height == 0 {
        return Err(MorphologyError::InvalidDimensions {
            width,
            height,
            len: 0,
        });
    }
    Ok(())
}

fn validate_len(len: usize, width: usize, height: usize) -> Result<()> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(RGBA_CHANNELS));
    match expected {
        Some(expected) if expected != 0 && expected == len => Ok(()),
        _ => Err(MorphologyError::InvalidDimensions { width, height, len }),
    }
}

/// View a flat RGBA byte buffer as a `(height, width, 4)` array.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn rgba_view(data: &[u8], width: usize, height: usize) -> Result<ArrayView3<'_, u8>> {
    validate_len(data.len(), width, height)?;
    Ok(ArrayView3::from_shape((height, width, RGBA_CHANNELS), data)?)
}

/// Mutable counterpart of [`rgba_view`].
///
/// Writes through the view land in the caller's buffer.
pub fn rgba_view_mut(
    data: &mut [u8],
    width: usize,
    height: usize,
) -> Result<ArrayViewMut3<'_, u8>> {
    validate_len(data.len(), width, height)?;
    Ok(ArrayViewMut3::from_shape((height, width, RGBA_CHANNELS), data)?)
}

/// Flatten an image back into interleaved RGBA bytes in row-major order.
pub fn into_raw(image: Array3<u8>) -> Vec<u8> {
    if image.is_standard_layout() {
        image.into_raw_vec_and_offset().0
    } else {
        image.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_view_shape() {
        let data = vec![0u8; 3 * 2 * 4];
        let view = rgba_view(&data, 3, 2).unwrap();
        assert_eq!(view.dim(), (2, 3, 4));
    }

    #[test]
    fn test_rgba_view_rejects_short_buffer() {
        let data = vec![0u8; 10];
        let err = rgba_view(&data, 3, 2).unwrap_err();
        assert!(matches!(
            err,
            MorphologyError::InvalidDimensions { width: 3, height: 2, len: 10 }
        ));
    }

    #[test]
    fn test_rgba_view_rejects_zero_dimension() {
        let data: Vec<u8> = Vec::new();
        assert!(rgba_view(&data, 0, 5).is_err());
    }

    #[test]
    fn test_rgba_view_rejects_overflowing_dimensions() {
        let data = vec![0u8; 16];
        let err = rgba_view(&data, usize::MAX / 2, 4).unwrap_err();
        assert!(matches!(
            err,
            MorphologyError::InvalidDimensions { width, height: 4, len: 16 }
                if width == usize::MAX / 2
        ));
        assert!(err.to_string().contains("Data length (16)"));
    }

    #[test]
    fn test_rgba_view_mut_writes_through() {
        let mut data = vec![0u8; 2 * 2 * 4];
        {
            let mut view = rgba_view_mut(&mut data, 2, 2).unwrap();
            view[[1, 0, 2]] = 77;
        }
        assert_eq!(data[2 * 4 + 2], 77);
    }

    #[test]
    fn test_validate_rgba_channels() {
        assert!(validate_rgba((4, 4, 4)).is_ok());
        assert!(matches!(
            validate_rgba((4, 4, 3)),
            Err(MorphologyError::InvalidChannelCount(3))
        ));
    }

    #[test]
    fn test_into_raw_row_major() {
        let mut img = Array3::<u8>::zeros((2, 2, 4));
        img[[0, 1, 0]] = 9;
        img[[1, 0, 3]] = 5;
        let raw = into_raw(img);
        assert_eq!(raw.len(), 16);
        assert_eq!(raw[4], 9);
        assert_eq!(raw[8 + 3], 5);
    }
}
