//! 3x3 binary structuring elements.
//!
//! Entries are indexed by relative offset: `rows()[dy + 1][dx + 1]` is the
//! membership flag for the neighbor at `(y + dy, x + dx)`.

use super::error::{MorphologyError, Result};

/// Side length of every structuring element.
pub const ELEMENT_SIZE: usize = 3;

/// A fixed 3x3 matrix of membership flags (each 0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuringElement {
    rows: [[u8; ELEMENT_SIZE]; ELEMENT_SIZE],
}

impl StructuringElement {
    /// Create an element from a 3x3 matrix, rejecting values outside {0, 1}.
    pub fn new(rows: [[u8; ELEMENT_SIZE]; ELEMENT_SIZE]) -> Result<Self> {
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v > 1 {
                    return Err(MorphologyError::InvalidStructuringElement(format!(
                        "entry ({r}, {c}) is {v}, expected 0 or 1"
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Create an element from 9 row-major entries.
    pub fn from_flat(values: &[u8]) -> Result<Self> {
        if values.len() != ELEMENT_SIZE * ELEMENT_SIZE {
            return Err(MorphologyError::InvalidStructuringElement(format!(
                "expected {} entries, got {}",
                ELEMENT_SIZE * ELEMENT_SIZE,
                values.len()
            )));
        }
        let mut rows = [[0u8; ELEMENT_SIZE]; ELEMENT_SIZE];
        for (dst, src) in rows.iter_mut().zip(values.chunks_exact(ELEMENT_SIZE)) {
            dst.copy_from_slice(src);
        }
        Self::new(rows)
    }

    /// Create an element from nested rows, as supplied by a UI grid or a
    /// Python list of lists.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        if rows.len() != ELEMENT_SIZE {
            return Err(MorphologyError::InvalidStructuringElement(format!(
                "expected {ELEMENT_SIZE} rows, got {}",
                rows.len()
            )));
        }
        if let Some((r, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ELEMENT_SIZE) {
            return Err(MorphologyError::InvalidStructuringElement(format!(
                "row {r} has {} entries, expected {ELEMENT_SIZE}",
                row.len()
            )));
        }
        let flat: Vec<u8> = rows.iter().flatten().copied().collect();
        Self::from_flat(&flat)
    }

    /// Full 8-connected neighborhood (all ones).
    pub const fn full() -> Self {
        Self {
            rows: [[1, 1, 1], [1, 1, 1], [1, 1, 1]],
        }
    }

    /// Plus shape: center and 4-neighbors. Used as the hit pattern.
    pub const fn cross() -> Self {
        Self {
            rows: [[0, 1, 0], [1, 1, 1], [0, 1, 0]],
        }
    }

    /// The four diagonal corners only. Used as the miss pattern.
    pub const fn corners() -> Self {
        Self {
            rows: [[1, 0, 1], [0, 0, 0], [1, 0, 1]],
        }
    }

    /// Raw membership matrix.
    pub fn rows(&self) -> &[[u8; ELEMENT_SIZE]; ELEMENT_SIZE] {
        &self.rows
    }

    /// Whether the neighbor at offset `(dy, dx)` participates.
    ///
    /// Offsets outside `-1..=1` are never members.
    pub fn contains(&self, dy: isize, dx: isize) -> bool {
        if !(-1..=1).contains(&dy) || !(-1..=1).contains(&dx) {
            return false;
        }
        self.rows[(dy + 1) as usize][(dx + 1) as usize] == 1
    }

    /// Iterate the active `(dy, dx)` offsets in row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        (-1..=1isize)
            .flat_map(|dy| (-1..=1isize).map(move |dx| (dy, dx)))
            .filter(move |&(dy, dx)| self.contains(dy, dx))
    }
}

impl Default for StructuringElement {
    fn default() -> Self {
        Self::full()
    }
}
