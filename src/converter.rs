//! The conversion pipeline: array in, vtk.js archive out

use crate::archive::assemble_with;
use crate::array::NdArray;
use crate::config::ConverterConfig;
use crate::error::{PackError, Result};
use crate::layout::reorder_axes;
use crate::metadata::{build_metadata, ImageDataDescriptor};
use crate::sanitize::sanitize;
use crate::types::map_data_type;
use crate::utils::shape_summary;
use bytes::Bytes;
use tracing::{debug, info, warn};

/// Stateless converter holding only its configuration.
///
/// Each call works on its own copies; concurrent calls sharing a converter
/// never observe each other.
#[derive(Debug, Clone, Default)]
pub struct VolumeConverter {
    config: ConverterConfig,
}

impl VolumeConverter {
    /// Create a converter, rejecting invalid configuration
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Check that `array` can be packaged at all
    pub fn validate(&self, array: &NdArray) -> Result<()> {
        if array.ndim() == 0 {
            return Err(PackError::InvalidArray("Array has no dimensions".to_string()));
        }
        if array.is_empty() {
            return Err(PackError::InvalidArray(format!(
                "Array of shape {:?} has no elements",
                array.shape()
            )));
        }
        if array.ndim() != 3 {
            return Err(PackError::UnsupportedDimensionality(array.ndim()));
        }
        map_data_type(array.data_type())?;
        Ok(())
    }

    /// Sanitized copy of `array`; what every later stage consumes
    pub fn prepare(&self, array: &NdArray) -> Result<NdArray> {
        self.validate(array)?;

        let sanitized = sanitize(array, &self.config.sanitize)?;
        if sanitized.replaced > 0 {
            warn!(
                replaced = sanitized.replaced,
                "Substituted non-finite values before packaging"
            );
        }
        Ok(sanitized.array)
    }

    /// Metadata document for `array` as it would be packaged
    pub fn describe(&self, array: &NdArray, display_name: &str) -> Result<ImageDataDescriptor> {
        let prepared = self.prepare(array)?;
        build_metadata(&prepared, display_name)
    }

    /// Convert `array` into a complete archive.
    ///
    /// Fails without producing any output if any stage fails.
    #[tracing::instrument(
        skip(self, array),
        fields(shape = %shape_summary(array.shape()), data_type = %array.data_type())
    )]
    pub fn build_package(&self, array: &NdArray, display_name: &str) -> Result<Bytes> {
        let prepared = self.prepare(array)?;

        let metadata = build_metadata(&prepared, display_name)?;
        debug!(extent = ?metadata.extent, "Built metadata document");

        let reordered = reorder_axes(&prepared)?;
        debug!(shape = %shape_summary(reordered.shape()), "Reordered axes");

        let archive = assemble_with(&metadata, &reordered, self.config.pretty_metadata)?;
        info!(
            payload_bytes = reordered.as_bytes().len(),
            archive_bytes = archive.len(),
            "Packaged volume"
        );
        Ok(archive)
    }
}

/// Convert `array` with the default configuration
pub fn build_package(array: &NdArray, display_name: &str) -> Result<Bytes> {
    VolumeConverter::default().build_package(array, display_name)
}
