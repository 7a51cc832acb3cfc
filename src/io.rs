//! Dataset loaders supplying arrays to the converter

use crate::array::NdArray;
use crate::error::{PackError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Opaque identifiers of the sub-array to load: a source file and a path inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetSource {
    pub filename: String,
    pub path: String,
}

impl DatasetSource {
    pub fn new(filename: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
        }
    }
}

/// An array ready for conversion together with the name shown to users
#[derive(Debug, Clone)]
pub struct LoadedVolume {
    pub array: NdArray,
    pub display_name: String,
}

/// Trait for loading arrays out of a backing dataset store.
///
/// Implementations own storage access and slicing; the converter accepts
/// whatever array and name they return.
#[async_trait]
pub trait DatasetLoader: Send + Sync {
    /// Load the array identified by `source`
    async fn load(&self, source: &DatasetSource) -> Result<LoadedVolume>;
}

/// Loader serving arrays registered in memory
#[derive(Debug, Default)]
pub struct InMemoryLoader {
    volumes: RwLock<HashMap<DatasetSource, NdArray>>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `array` under `source`, replacing any previous one
    pub fn insert(&self, source: DatasetSource, array: NdArray) {
        self.volumes.write().insert(source, array);
    }

    pub fn remove(&self, source: &DatasetSource) -> Option<NdArray> {
        self.volumes.write().remove(source)
    }

    pub fn len(&self) -> usize {
        self.volumes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.read().is_empty()
    }
}

#[async_trait]
impl DatasetLoader for InMemoryLoader {
    async fn load(&self, source: &DatasetSource) -> Result<LoadedVolume> {
        let array = self.volumes.read().get(source).cloned().ok_or_else(|| {
            PackError::NotFound(format!("{}:{}", source.filename, source.path))
        })?;

        Ok(LoadedVolume {
            array,
            display_name: source.filename.clone(),
        })
    }
}
