//! vtk.js `vtkImageData` metadata document (`index.json`)

use crate::array::NdArray;
use crate::error::Result;
use crate::layout::compute_extent;
use crate::range::compute_range;
use crate::types::{map_data_type, Encoding, Scalar, WireType};
use serde::{Deserialize, Serialize};

pub const IMAGE_DATA_CLASS: &str = "vtkImageData";
pub const DATA_SET_ATTRIBUTES_CLASS: &str = "vtkDataSetAttributes";
pub const DATA_ARRAY_CLASS: &str = "vtkDataArray";

/// Name of the single scalar array
pub const SCALAR_ARRAY_NAME: &str = "ImageFile";
pub const SCALAR_REGISTRATION: &str = "setScalars";
/// Payload id; together with `basepath` it names the `data/volume` entry
pub const PAYLOAD_ID: &str = "volume";
pub const PAYLOAD_BASEPATH: &str = "data";

/// Root of the metadata document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDataDescriptor {
    pub vtk_class: String,
    pub metadata: DatasetMetadata,
    pub extent: Vec<i64>,
    pub origin: Vec<f64>,
    pub spacing: Vec<f64>,
    pub point_data: PointData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointData {
    pub arrays: Vec<PointDataArray>,
    pub vtk_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDataArray {
    pub data: DataArrayDescriptor,
}

/// Describes the scalar array carried in the archive payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataArrayDescriptor {
    pub number_of_components: usize,
    pub name: String,
    pub vtk_class: String,
    pub data_type: WireType,
    pub ranges: Vec<ComponentRange>,
    #[serde(rename = "ref")]
    pub reference: ArrayReference,
    pub size: usize,
}

/// Range of one component; `component: None` is the single-component case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRange {
    pub min: Scalar,
    pub max: Scalar,
    pub component: Option<usize>,
}

/// Where the client finds the payload and how its bytes are ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayReference {
    pub registration: String,
    pub id: String,
    pub encode: Encoding,
    pub basepath: String,
}

impl ImageDataDescriptor {
    /// The scalar array descriptor
    pub fn scalars(&self) -> Option<&DataArrayDescriptor> {
        self.point_data.arrays.first().map(|a| &a.data)
    }
}

/// Compose the metadata document for `array`.
///
/// The array must already be sanitized. Type tag, encoding, extent and range
/// are derived in that order and the first failure is returned.
pub fn build_metadata(array: &NdArray, display_name: &str) -> Result<ImageDataDescriptor> {
    let data_type = map_data_type(array.data_type())?;
    let encode = array.byte_order().encoding();
    let extent = compute_extent(array.shape());
    let range = compute_range(array)?;
    let ndim = array.ndim();

    Ok(ImageDataDescriptor {
        vtk_class: IMAGE_DATA_CLASS.to_string(),
        metadata: DatasetMetadata {
            name: display_name.to_string(),
        },
        extent,
        origin: vec![0.0; ndim],
        spacing: vec![1.0; ndim],
        point_data: PointData {
            arrays: vec![PointDataArray {
                data: DataArrayDescriptor {
                    number_of_components: 1,
                    name: SCALAR_ARRAY_NAME.to_string(),
                    vtk_class: DATA_ARRAY_CLASS.to_string(),
                    data_type,
                    ranges: vec![ComponentRange {
                        min: range.min,
                        max: range.max,
                        component: None,
                    }],
                    reference: ArrayReference {
                        registration: SCALAR_REGISTRATION.to_string(),
                        id: PAYLOAD_ID.to_string(),
                        encode,
                        basepath: PAYLOAD_BASEPATH.to_string(),
                    },
                    size: array.len(),
                },
            }],
            vtk_class: DATA_SET_ATTRIBUTES_CLASS.to_string(),
        },
    })
}
