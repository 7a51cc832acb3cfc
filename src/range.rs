//! Value range of an array's elements

use crate::array::{Element, NdArray};
use crate::error::{PackError, Result};
use crate::types::{DataType, ValueRange};

/// Minimum and maximum element of `array`.
///
/// Expects a sanitized array; see [`sanitize`](crate::sanitize::sanitize).
/// Fails with `InvalidArray` when there are no elements to measure or any
/// element is NaN or infinite.
pub fn compute_range(array: &NdArray) -> Result<ValueRange> {
    if array.is_empty() {
        return Err(PackError::InvalidArray(
            "Cannot compute the range of an empty array".to_string(),
        ));
    }

    match array.data_type() {
        DataType::U1 | DataType::U8 => typed_range::<u8>(array),
        DataType::I8 => typed_range::<i8>(array),
        DataType::U16 => typed_range::<u16>(array),
        DataType::I16 => typed_range::<i16>(array),
        DataType::U32 => typed_range::<u32>(array),
        DataType::I32 => typed_range::<i32>(array),
        DataType::U64 => typed_range::<u64>(array),
        DataType::I64 => typed_range::<i64>(array),
        DataType::F32 => typed_range::<f32>(array),
        DataType::F64 => typed_range::<f64>(array),
    }
}

fn typed_range<T: Element>(array: &NdArray) -> Result<ValueRange> {
    let encoding = array.byte_order().encoding();
    let mut elements = array
        .as_bytes()
        .chunks_exact(array.data_type().size_in_bytes())
        .map(|chunk| T::decode(chunk, encoding));

    let first = elements
        .next()
        .ok_or_else(|| PackError::InvalidArray("Array has no elements".to_string()))?;
    let (mut min, mut max) = (first, first);

    for value in std::iter::once(first).chain(elements) {
        if !value.to_scalar().as_f64().is_finite() {
            return Err(PackError::InvalidArray(
                "Array contains non-finite values; sanitize it first".to_string(),
            ));
        }
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }

    Ok(ValueRange::new(min.to_scalar(), max.to_scalar()))
}
