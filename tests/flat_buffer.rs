//! End-to-end checks over flat RGBA buffers, the form decoded bitmaps and
//! canvas `ImageData` arrive in.

use pixelmorph::filters::buffer::{into_raw, rgba_view};
use pixelmorph::filters::morphology::{close_u8, dilate_u8, erode_u8, open_u8};
use pixelmorph::filters::{apply_rgba, MorphologyError, Operator, StructuringElement};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Opaque black `width x height` RGBA buffer.
fn black(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 4];
    for px in data.chunks_exact_mut(4) {
        px[3] = 255;
    }
    data
}

fn set_gray(data: &mut [u8], width: usize, x: usize, y: usize, value: u8) {
    let i = (y * width + x) * 4;
    data[i] = value;
    data[i + 1] = value;
    data[i + 2] = value;
}

fn red(data: &[u8], width: usize, x: usize, y: usize) -> u8 {
    data[(y * width + x) * 4]
}

#[test]
fn test_single_bright_pixel_dilates_to_square() {
    init_logger();
    let mut data = black(5, 5);
    set_gray(&mut data, 5, 2, 2, 255);

    let result = apply_rgba("dilation", &mut data.clone(), 5, 5, &[1; 9]).unwrap();

    for y in 0..5 {
        for x in 0..5 {
            let i = (y * 5 + x) * 4;
            let inside = (1..=3).contains(&x) && (1..=3).contains(&y);
            let expected = if inside { 255 } else { 0 };
            assert_eq!(&result[i..i + 3], &[expected; 3], "pixel ({x}, {y})");
            assert_eq!(result[i + 3], 255);
        }
    }
}

#[test]
fn test_single_bright_pixel_erodes_away() {
    init_logger();
    let mut data = black(5, 5);
    set_gray(&mut data, 5, 2, 2, 255);

    let result = apply_rgba("erosion", &mut data, 5, 5, &[]).unwrap();

    assert!(result.chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));
}

#[test]
fn test_input_untouched_by_rank_filters() {
    init_logger();
    let mut data = black(6, 6);
    set_gray(&mut data, 6, 3, 3, 180);
    set_gray(&mut data, 6, 1, 4, 40);
    let original = data.clone();

    for name in ["dilation", "erosion", "opening", "closing"] {
        apply_rgba(name, &mut data, 6, 6, &[]).unwrap();
        assert_eq!(data, original, "{name} modified its input");
    }
}

#[test]
fn test_borders_copied_for_rank_filters() {
    init_logger();
    let (width, height) = (7, 5);
    let mut data: Vec<u8> = (0..width * height * 4).map(|i| (i * 31 % 256) as u8).collect();
    for px in data.chunks_exact_mut(4) {
        px[1] = px[0];
        px[2] = px[0];
    }
    let view = rgba_view(&data, width, height).unwrap();
    let se = StructuringElement::full();

    let outputs = [
        into_raw(dilate_u8(view, &se).unwrap()),
        into_raw(erode_u8(view, &se).unwrap()),
        into_raw(open_u8(view, &se).unwrap()),
        into_raw(close_u8(view, &se).unwrap()),
    ];

    for out in &outputs {
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    let i = (y * width + x) * 4;
                    assert_eq!(&out[i..i + 4], &data[i..i + 4]);
                }
            }
        }
    }
}

#[test]
fn test_closing_fills_dark_pixel() {
    init_logger();
    let mut data = vec![255u8; 5 * 5 * 4];
    set_gray(&mut data, 5, 2, 2, 0);

    let result = apply_rgba("closing", &mut data, 5, 5, &[]).unwrap();

    assert_eq!(red(&result, 5, 2, 2), 255);
}

#[test]
fn test_hit_or_miss_binarizes_caller_buffer() {
    init_logger();
    let mut data = black(4, 4);
    set_gray(&mut data, 4, 1, 1, 200);
    set_gray(&mut data, 4, 2, 1, 100);

    let result = apply_rgba("hit-or-miss", &mut data, 4, 4, &[]).unwrap();

    let i = (4 + 1) * 4;
    assert_eq!(&data[i..i + 3], &[255, 255, 255]);
    let j = (4 + 2) * 4;
    assert_eq!(&data[j..j + 3], &[0, 0, 0]);
    assert!(result.chunks_exact(4).all(|px| matches!(px[0], 0 | 255)));
}

#[test]
fn test_hit_or_miss_ignores_element() {
    init_logger();
    let op = Operator::from_name("hit-or-miss", StructuringElement::cross()).unwrap();
    assert_eq!(op, Operator::HitOrMiss);
}

#[test]
fn test_validation_errors() {
    init_logger();
    let mut data = black(3, 3);

    assert!(matches!(
        apply_rgba("dilation", &mut data, 4, 3, &[]),
        Err(MorphologyError::InvalidDimensions { width: 4, height: 3, len: 36 })
    ));
    assert!(matches!(
        apply_rgba("dilation", &mut data, 3, 3, &[1, 1, 1]),
        Err(MorphologyError::InvalidStructuringElement(_))
    ));
    assert!(matches!(
        apply_rgba("sharpen", &mut data, 3, 3, &[]),
        Err(MorphologyError::UnrecognizedOperator(_))
    ));
}

#[test]
fn test_failed_hit_or_miss_leaves_buffer_alone() {
    init_logger();
    let mut data = vec![200u8; 3 * 3 * 4 - 4];
    let original = data.clone();

    assert!(apply_rgba("hit-or-miss", &mut data, 3, 3, &[]).is_err());
    assert_eq!(data, original);
}

#[test]
fn test_oversized_dimensions_rejected() {
    init_logger();
    let mut data = [0u8; 16];

    let result = apply_rgba("dilation", &mut data, usize::MAX / 2, 4, &[]);

    assert!(matches!(
        result,
        Err(MorphologyError::InvalidDimensions { height: 4, len: 16, .. })
    ));
}
