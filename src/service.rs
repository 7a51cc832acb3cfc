//! Request handling around the converter: parameter checks, loading, status mapping

use crate::converter::VolumeConverter;
use crate::error::{PackError, Result};
use crate::io::{DatasetLoader, DatasetSource};
use bytes::Bytes;
use tracing::{info, warn};

pub const CONTENT_TYPE_ARCHIVE: &str = "application/octet-stream";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Query parameters of a package request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRequest {
    pub filename: Option<String>,
    pub path: Option<String>,
}

impl PackageRequest {
    pub fn new(filename: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            path: Some(path.into()),
        }
    }

    /// Pick `filename` and `path` out of decoded query pairs; other keys are ignored
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "filename" => request.filename = Some(value.into()),
                "path" => request.path = Some(value.into()),
                _ => {}
            }
        }
        request
    }

    /// Both parameters, or the name of the first missing one
    pub fn source(&self) -> Result<DatasetSource> {
        let filename = required(&self.filename, "filename")?;
        let path = required(&self.path, "path")?;
        Ok(DatasetSource::new(filename, path))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PackError::MissingField(name.to_string())),
    }
}

/// Response handed back to the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl PackageResponse {
    fn archive(body: Bytes) -> Self {
        Self {
            status: STATUS_OK,
            content_type: CONTENT_TYPE_ARCHIVE,
            body,
        }
    }

    fn error(err: &PackError) -> Self {
        Self {
            status: status_for(err),
            content_type: CONTENT_TYPE_TEXT,
            body: Bytes::from(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// HTTP status code for a failed request
pub fn status_for(err: &PackError) -> u16 {
    match err {
        PackError::MissingField(_) => STATUS_BAD_REQUEST,
        PackError::NotFound(_) => STATUS_NOT_FOUND,
        _ => STATUS_INTERNAL_ERROR,
    }
}

/// Serves package requests from a dataset loader
pub struct PackageService<L> {
    loader: L,
    converter: VolumeConverter,
}

impl<L: DatasetLoader> PackageService<L> {
    pub fn new(loader: L, converter: VolumeConverter) -> Self {
        Self { loader, converter }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Handle a request, mapping every failure to an error response
    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, request: &PackageRequest) -> PackageResponse {
        match self.package(request).await {
            Ok(archive) => {
                info!(bytes = archive.len(), "Serving package");
                PackageResponse::archive(archive)
            }
            Err(err) => {
                warn!(error = %err, "Package request failed");
                PackageResponse::error(&err)
            }
        }
    }

    /// Validate, load and convert; the archive bytes on success
    pub async fn package(&self, request: &PackageRequest) -> Result<Bytes> {
        let source = request.source()?;
        let volume = self.loader.load(&source).await?;

        let converter = self.converter.clone();
        tokio::task::spawn_blocking(move || {
            converter.build_package(&volume.array, &volume.display_name)
        })
        .await
        .map_err(|e| PackError::Internal(e.to_string()))?
    }
}
