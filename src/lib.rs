//! vtkjs-volume - volumes packaged for vtk.js
//!
//! Converts an in-memory N-dimensional array into the archive a vtk.js
//! `vtkImageData` reader consumes: an `index.json` metadata document plus the
//! raw scalar payload under `data/volume`, bundled into one zip file.
//!
//! # Pipeline
//!
//! - Non-finite values are substituted (NaN, +Inf, -Inf) by a configurable policy
//! - The element type is mapped to a typed array tag (`Uint8Array`, `Float32Array`, ...)
//! - Byte order, extent and value range are derived for the metadata document
//! - The first and last axes are swapped to match vtk.js winding order
//! - Both files are stored, uncompressed, in a zip archive
//!
//! Loading arrays out of a dataset store is left to a [`DatasetLoader`]
//! implementation; [`PackageService`] ties a loader to the converter and maps
//! failures to response status codes.
//!
//! # Example
//!
//! ```rust
//! use vtkjs_volume::{build_package, NdArray};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let array = NdArray::from_shape_vec(vec![2, 2, 2], (0u8..8).collect())?;
//! let archive = build_package(&array, "demo")?;
//! assert!(!archive.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod array;
pub mod config;
pub mod converter;
pub mod error;
pub mod io;
pub mod layout;
pub mod metadata;
pub mod range;
pub mod sanitize;
pub mod service;
pub mod types;
pub mod utils;

// Re-exports
pub use archive::{assemble, read_archive, ArchiveEntry, INDEX_ENTRY, PAYLOAD_ENTRY};
pub use array::{Element, NdArray};
pub use config::ConverterConfig;
pub use converter::{build_package, VolumeConverter};
pub use error::{PackError, Result};
pub use io::{DatasetLoader, DatasetSource, InMemoryLoader, LoadedVolume};
pub use layout::{compute_extent, reorder_axes};
pub use metadata::{build_metadata, ImageDataDescriptor};
pub use range::compute_range;
pub use sanitize::{sanitize, SanitizePolicy};
pub use service::{PackageRequest, PackageResponse, PackageService};
pub use types::{map_data_type, ByteOrder, DataType, Encoding, Scalar, ValueRange, WireType};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
