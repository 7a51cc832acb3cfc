//! Volume layout: extent descriptors and winding-order conversion

use crate::array::NdArray;
use crate::error::{PackError, Result};
use ndarray::{ArrayD, IxDyn};

/// Index bounds per dimension: `[0, s0 - 1, 0, s1 - 1, ...]`
pub fn compute_extent(shape: &[usize]) -> Vec<i64> {
    shape
        .iter()
        .flat_map(|&s| [0, i64::try_from(s).map_or(i64::MAX, |s| s - 1)])
        .collect()
}

/// Swap the first and last axes of a 3-dimensional array.
///
/// vtk.js expects the fastest-varying index first, the reverse of the
/// row-major order arrays arrive in. Elements are relocated byte-for-byte,
/// so values and byte order are untouched: `result[k, j, i] == array[i, j, k]`.
pub fn reorder_axes(array: &NdArray) -> Result<NdArray> {
    if array.ndim() != 3 {
        return Err(PackError::UnsupportedDimensionality(array.ndim()));
    }

    match array.data_type().size_in_bytes() {
        1 => swap_outer_axes::<1>(array),
        2 => swap_outer_axes::<2>(array),
        4 => swap_outer_axes::<4>(array),
        8 => swap_outer_axes::<8>(array),
        width => Err(PackError::InvalidArray(format!(
            "Unsupported element width: {} bytes",
            width
        ))),
    }
}

fn swap_outer_axes<const W: usize>(array: &NdArray) -> Result<NdArray> {
    let elements = array
        .as_bytes()
        .chunks_exact(W)
        .map(<[u8; W]>::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PackError::InvalidArray(e.to_string()))?;

    let mut grid = ArrayD::from_shape_vec(IxDyn(array.shape()), elements)?;
    let last = grid.ndim() - 1;
    grid.swap_axes(0, last);

    let shape = grid.shape().to_vec();
    let buffer: Vec<u8> = grid.iter().flatten().copied().collect();
    array.with_layout(shape, buffer)
}
