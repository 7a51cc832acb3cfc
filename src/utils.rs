//! Utility functions

use crate::error::{PackError, Result};

/// Number of elements described by `shape`, guarding against overflow
pub fn element_count(shape: &[usize]) -> Result<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| {
        acc.checked_mul(dim).ok_or_else(|| {
            PackError::InvalidArray(format!("Element count of shape {:?} overflows", shape))
        })
    })
}

/// Human-readable shape, e.g. `2 x 3 x 4`
pub fn shape_summary(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" x ")
}
