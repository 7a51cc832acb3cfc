//! N-dimensional array container handed over by the dataset loader

use crate::error::{PackError, Result};
use crate::types::{ByteOrder, DataType, Encoding, Scalar};
use crate::utils::element_count;
use bytes::Bytes;
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};

/// Rust element types that can be read from and written into an [`NdArray`] buffer
pub trait Element: Copy + PartialOrd + Send + Sync + 'static {
    /// Element type tag for this Rust type
    const DATA_TYPE: DataType;

    /// Decode one element from exactly `DATA_TYPE.size_in_bytes()` bytes
    fn decode(bytes: &[u8], encoding: Encoding) -> Self;

    /// Append the encoded element to `out`
    fn encode(self, encoding: Encoding, out: &mut Vec<u8>);

    /// Lossless conversion into a range bound
    fn to_scalar(self) -> Scalar;
}

macro_rules! impl_element {
    ($t:ty, $data_type:expr, $variant:ident, $wide:ty) => {
        impl Element for $t {
            const DATA_TYPE: DataType = $data_type;

            fn decode(bytes: &[u8], encoding: Encoding) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                match encoding {
                    Encoding::LittleEndian => <$t>::from_le_bytes(raw),
                    Encoding::BigEndian => <$t>::from_be_bytes(raw),
                }
            }

            fn encode(self, encoding: Encoding, out: &mut Vec<u8>) {
                match encoding {
                    Encoding::LittleEndian => out.extend_from_slice(&self.to_le_bytes()),
                    Encoding::BigEndian => out.extend_from_slice(&self.to_be_bytes()),
                }
            }

            fn to_scalar(self) -> Scalar {
                Scalar::$variant(self as $wide)
            }
        }
    };
}

impl_element!(i8, DataType::I8, Integer, i64);
impl_element!(u8, DataType::U8, Integer, i64);
impl_element!(i16, DataType::I16, Integer, i64);
impl_element!(u16, DataType::U16, Integer, i64);
impl_element!(i32, DataType::I32, Integer, i64);
impl_element!(u32, DataType::U32, Integer, i64);
impl_element!(i64, DataType::I64, Integer, i64);
impl_element!(u64, DataType::U64, Unsigned, u64);
impl_element!(f32, DataType::F32, Float, f64);
impl_element!(f64, DataType::F64, Float, f64);

/// A dense, row-major N-dimensional array with a raw element buffer.
///
/// The buffer holds `product(shape)` elements of `data_type`, each encoded in
/// the order given by `byte_order`. Arrays are immutable; every transformation
/// in this crate produces a new array.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data_type: DataType,
    byte_order: ByteOrder,
    buffer: Bytes,
}

impl NdArray {
    /// Wrap an existing buffer, checking its length against shape and element width
    pub fn from_bytes(
        shape: Vec<usize>,
        data_type: DataType,
        byte_order: ByteOrder,
        buffer: impl Into<Bytes>,
    ) -> Result<Self> {
        let buffer = buffer.into();
        let expected = element_count(&shape)?
            .checked_mul(data_type.size_in_bytes())
            .ok_or_else(|| PackError::InvalidArray("Buffer size overflows usize".to_string()))?;

        if buffer.len() != expected {
            return Err(PackError::InvalidArray(format!(
                "Buffer size mismatch: expected {} bytes, got {}",
                expected,
                buffer.len()
            )));
        }

        Ok(Self {
            shape,
            data_type,
            byte_order,
            buffer,
        })
    }

    /// Build a native-order array from row-major values
    pub fn from_shape_vec<T: Element>(shape: Vec<usize>, values: Vec<T>) -> Result<Self> {
        Self::from_values(shape, ByteOrder::Native, &values)
    }

    /// Copy an `ndarray` array (any memory layout) in logical row-major order
    pub fn from_ndarray<T, S, D>(array: &ArrayBase<S, D>) -> Self
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let encoding = ByteOrder::Native.encoding();
        let mut buffer = Vec::with_capacity(array.len() * T::DATA_TYPE.size_in_bytes());
        for &value in array.iter() {
            value.encode(encoding, &mut buffer);
        }

        Self {
            shape: array.shape().to_vec(),
            data_type: T::DATA_TYPE,
            byte_order: ByteOrder::Native,
            buffer: Bytes::from(buffer),
        }
    }

    pub(crate) fn from_values<T: Element>(
        shape: Vec<usize>,
        byte_order: ByteOrder,
        values: &[T],
    ) -> Result<Self> {
        let encoding = byte_order.encoding();
        let mut buffer = Vec::with_capacity(values.len() * T::DATA_TYPE.size_in_bytes());
        for &value in values {
            value.encode(encoding, &mut buffer);
        }
        Self::from_bytes(shape, T::DATA_TYPE, byte_order, buffer)
    }

    /// Same element type and byte order, new shape and buffer
    pub(crate) fn with_layout(&self, shape: Vec<usize>, buffer: Vec<u8>) -> Result<Self> {
        Self::from_bytes(shape, self.data_type, self.byte_order, buffer)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.buffer.len() / self.data_type.size_in_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Raw element buffer, contiguous and unpadded
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Shared handle to the raw element buffer
    pub fn bytes(&self) -> Bytes {
        self.buffer.clone()
    }

    /// Decode all elements in row-major order, honoring the byte-order marker
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        if T::DATA_TYPE != self.data_type {
            return Err(PackError::InvalidDataType);
        }

        let encoding = self.byte_order.encoding();
        Ok(self
            .buffer
            .chunks_exact(self.data_type.size_in_bytes())
            .map(|chunk| T::decode(chunk, encoding))
            .collect())
    }

    /// Decode into an owned `ndarray` array of the same shape
    pub fn to_ndarray<T: Element>(&self) -> Result<ArrayD<T>> {
        let values = self.to_vec::<T>()?;
        Ok(ArrayD::from_shape_vec(IxDyn(&self.shape), values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_from_bytes_validates_length() {
        let ok = NdArray::from_bytes(vec![2, 2], DataType::U16, ByteOrder::Little, vec![0u8; 8]);
        assert!(ok.is_ok());

        let err = NdArray::from_bytes(vec![2, 2], DataType::U16, ByteOrder::Little, vec![0u8; 7]);
        assert!(matches!(err, Err(PackError::InvalidArray(_))));
    }

    #[test]
    fn test_explicit_big_endian_decoding() {
        let array =
            NdArray::from_bytes(vec![2], DataType::U16, ByteOrder::Big, vec![0x01u8, 0x00, 0x00, 0x02])
                .unwrap();
        assert_eq!(array.to_vec::<u16>().unwrap(), vec![256, 2]);
    }

    #[test]
    fn test_from_ndarray_uses_logical_order() {
        let values = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 12 + j * 4 + k) as i32);
        // A transposed view must still be copied in its own logical order
        let view = values.t();
        let array = NdArray::from_ndarray(&view);

        assert_eq!(array.shape(), &[4, 3, 2]);
        assert_eq!(array.data_type(), DataType::I32);
        assert_eq!(array.byte_order(), ByteOrder::Native);

        let decoded = array.to_ndarray::<i32>().unwrap();
        assert_eq!(decoded[[3, 2, 1]], values[[1, 2, 3]]);
    }

    #[test]
    fn test_typed_access_requires_matching_type() {
        let array = NdArray::from_shape_vec(vec![3], vec![1.0f32, 2.0, 3.0]).unwrap();
        assert_eq!(array.len(), 3);
        assert!(matches!(
            array.to_vec::<f64>(),
            Err(PackError::InvalidDataType)
        ));
    }

    #[test]
    fn test_empty_array() {
        let array = NdArray::from_shape_vec(vec![0, 4], Vec::<u8>::new()).unwrap();
        assert!(array.is_empty());
        assert_eq!(array.len(), 0);
        assert_eq!(array.ndim(), 2);
    }
}
