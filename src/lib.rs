//! PixelMorph
//!
//! 3x3 binary/grayscale morphology (dilation, erosion, opening, closing and
//! hit-or-miss) on RGBA images, with Python bindings via PyO3 and WASM
//! bindings for JavaScript.
//!
//! ## Image Format
//! Images are (height, width, 4) u8 arrays holding interleaved R, G, B, A.
//! Kernels sample the red channel and write the result to R, G and B, so
//! callers pass grayscale (R = G = B) or pre-binarized images. Alpha is
//! preserved.
//!
//! ## Side Effects
//! Dilation, erosion, opening and closing never modify their input.
//! Hit-or-miss binarizes its input in place before scanning.
//!
//! ## Example
//! ```
//! use ndarray::Array3;
//! use pixelmorph::filters::{Operator, StructuringElement};
//!
//! let mut image = Array3::<u8>::zeros((5, 5, 4));
//! image[[2, 2, 0]] = 255;
//!
//! let op = Operator::from_name("dilation", StructuringElement::full()).unwrap();
//! let dilated = op.apply(image.view_mut()).unwrap();
//! assert_eq!(dilated[[1, 1, 0]], 255);
//! ```

pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyArrayMethods, PyReadonlyArray3, PyReadwriteArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::morphology;
    use crate::filters::{MorphologyError, Operator, StructuringElement};

    impl From<MorphologyError> for PyErr {
        fn from(err: MorphologyError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn element_or_full(element: Option<Vec<Vec<u8>>>) -> PyResult<StructuringElement> {
        match element {
            Some(rows) => Ok(StructuringElement::from_rows(&rows)?),
            None => Ok(StructuringElement::full()),
        }
    }

    // ========================================================================
    // Morphology Filters
    // ========================================================================

    /// Dilate an RGBA u8 image (neighborhood maximum of the red channel).
    ///
    /// # Arguments
    /// * `image` - RGBA image (height, width, 4)
    /// * `element` - 3x3 nested list of 0/1 flags (default: all ones)
    #[pyfunction]
    #[pyo3(signature = (image, element=None))]
    pub fn dilate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        element: Option<Vec<Vec<u8>>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let se = element_or_full(element)?;
        let result = morphology::dilate_u8(image.as_array(), &se)?;
        Ok(result.into_pyarray(py))
    }

    /// Erode an RGBA u8 image (neighborhood minimum of the red channel).
    #[pyfunction]
    #[pyo3(signature = (image, element=None))]
    pub fn erode<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        element: Option<Vec<Vec<u8>>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let se = element_or_full(element)?;
        let result = morphology::erode_u8(image.as_array(), &se)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological opening (erode then dilate).
    #[pyfunction]
    #[pyo3(signature = (image, element=None))]
    pub fn opening<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        element: Option<Vec<Vec<u8>>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let se = element_or_full(element)?;
        let result = morphology::open_u8(image.as_array(), &se)?;
        Ok(result.into_pyarray(py))
    }

    /// Morphological closing (dilate then erode).
    #[pyfunction]
    #[pyo3(signature = (image, element=None))]
    pub fn closing<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        element: Option<Vec<Vec<u8>>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let se = element_or_full(element)?;
        let result = morphology::close_u8(image.as_array(), &se)?;
        Ok(result.into_pyarray(py))
    }

    /// Hit-or-miss transform. Binarizes `image` in place.
    #[pyfunction]
    pub fn hit_or_miss<'py>(
        py: Python<'py>,
        mut image: PyReadwriteArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = morphology::hit_or_miss_u8(image.as_array_mut())?;
        Ok(result.into_pyarray(py))
    }

    /// Apply a morphology operator selected by name.
    ///
    /// `name` is one of `dilation`, `erosion`, `opening`, `closing`,
    /// `hit-or-miss`. Only hit-or-miss needs a writable `image`, which it
    /// binarizes in place; the other operators accept read-only arrays.
    #[pyfunction]
    #[pyo3(signature = (name, image, element=None))]
    pub fn apply_morphology<'py>(
        py: Python<'py>,
        name: &str,
        image: Bound<'py, PyArray3<u8>>,
        element: Option<Vec<Vec<u8>>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let se = element_or_full(element)?;
        let op = Operator::from_name(name, se)?;
        let result = if op.mutates_input() {
            let mut image = image
                .try_readwrite()
                .map_err(|err| PyValueError::new_err(err.to_string()))?;
            op.apply(image.as_array_mut())?
        } else {
            let image = image
                .try_readonly()
                .map_err(|err| PyValueError::new_err(err.to_string()))?;
            op.apply_view(image.as_array())?
        };
        Ok(result.into_pyarray(py))
    }

    /// PixelMorph Rust extension module
    #[pymodule]
    pub fn pixelmorph(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(dilate, m)?)?;
        m.add_function(wrap_pyfunction!(erode, m)?)?;
        m.add_function(wrap_pyfunction!(opening, m)?)?;
        m.add_function(wrap_pyfunction!(closing, m)?)?;
        m.add_function(wrap_pyfunction!(hit_or_miss, m)?)?;
        m.add_function(wrap_pyfunction!(apply_morphology, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixelmorph;
