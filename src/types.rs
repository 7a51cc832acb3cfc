//! Core data types: element types, byte order and their wire representations

use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element types an [`NdArray`](crate::NdArray) can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DataType {
    /// 1-bit boolean
    U1 = 0,
    /// Unsigned 8-bit integer
    U8 = 1,
    /// Unsigned 16-bit integer
    U16 = 2,
    /// Unsigned 32-bit integer
    U32 = 3,
    /// Unsigned 64-bit integer
    U64 = 4,
    /// Signed 8-bit integer
    I8 = 5,
    /// Signed 16-bit integer
    I16 = 6,
    /// Signed 32-bit integer
    I32 = 7,
    /// Signed 64-bit integer
    I64 = 8,
    /// 32-bit floating point
    F32 = 9,
    /// 64-bit floating point
    F64 = 10,
}

impl DataType {
    /// Size in bytes of this data type
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DataType::U1 => 1, // Stored as full bytes
            DataType::U8 | DataType::I8 => 1,
            DataType::U16 | DataType::I16 => 2,
            DataType::U32 | DataType::I32 | DataType::F32 => 4,
            DataType::U64 | DataType::I64 | DataType::F64 => 8,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Typed array tags understood by vtk.js `vtkDataArray`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    Int8Array,
    Uint8Array,
    Int16Array,
    Uint16Array,
    Int32Array,
    Uint32Array,
    Float32Array,
    Float64Array,
}

impl WireType {
    /// The tag as written into `index.json`
    pub fn as_str(&self) -> &'static str {
        match self {
            WireType::Int8Array => "Int8Array",
            WireType::Uint8Array => "Uint8Array",
            WireType::Int16Array => "Int16Array",
            WireType::Uint16Array => "Uint16Array",
            WireType::Int32Array => "Int32Array",
            WireType::Uint32Array => "Uint32Array",
            WireType::Float32Array => "Float32Array",
            WireType::Float64Array => "Float64Array",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an element type to its wire type tag.
///
/// Only 8/16/32-bit integers and 32/64-bit floats have a tag; everything
/// else is rejected rather than widened or truncated.
pub fn map_data_type(data_type: DataType) -> Result<WireType> {
    match data_type {
        DataType::I8 => Ok(WireType::Int8Array),
        DataType::U8 => Ok(WireType::Uint8Array),
        DataType::I16 => Ok(WireType::Int16Array),
        DataType::U16 => Ok(WireType::Uint16Array),
        DataType::I32 => Ok(WireType::Int32Array),
        DataType::U32 => Ok(WireType::Uint32Array),
        DataType::F32 => Ok(WireType::Float32Array),
        DataType::F64 => Ok(WireType::Float64Array),
        DataType::U1 | DataType::U64 | DataType::I64 => Err(PackError::UnsupportedType(data_type)),
    }
}

/// Byte-order marker attached to an array buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// No explicit marker; the buffer uses the host's order
    #[default]
    Native,
    /// Explicitly little-endian
    Little,
    /// Explicitly big-endian
    Big,
}

impl ByteOrder {
    /// Resolve the marker to the concrete encoding of the buffer bytes
    pub fn encoding(&self) -> Encoding {
        match self {
            ByteOrder::Little => Encoding::LittleEndian,
            ByteOrder::Big => Encoding::BigEndian,
            ByteOrder::Native => Encoding::host(),
        }
    }
}

/// Endianness tag written to `ref.encode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    LittleEndian,
    BigEndian,
}

impl Encoding {
    /// Byte order of the host performing the conversion
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            Encoding::BigEndian
        } else {
            Encoding::LittleEndian
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::LittleEndian => "LittleEndian",
            Encoding::BigEndian => "BigEndian",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single range bound, kept integral for integer element types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl Scalar {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::Integer(v) => v as f64,
            Scalar::Unsigned(v) => v as f64,
            Scalar::Float(v) => v,
        }
    }
}

/// Value range of an array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: Scalar,
    pub max: Scalar,
}

impl ValueRange {
    pub fn new(min: Scalar, max: Scalar) -> Self {
        Self { min, max }
    }
}
