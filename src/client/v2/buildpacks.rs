//! Buildpack requests and resources.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::resource::Resource;
use crate::client::validation::{require, require_text};
use crate::error::RequestError;

/// A buildpack entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackEntity {
    /// Buildpack name.
    pub name: String,
    /// Uploaded archive file name.
    #[serde(default)]
    pub filename: Option<String>,
    /// Detection order.
    #[serde(default)]
    pub position: Option<u32>,
    /// Whether the buildpack is used for staging.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Whether the buildpack is locked against updates.
    #[serde(default)]
    pub locked: Option<bool>,
}

/// A buildpack resource.
pub type BuildpackResource = Resource<BuildpackEntity>;

/// Request to upload buildpack bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBuildpackRequest {
    buildpack_id: String,
    buildpack: PathBuf,
    filename: String,
}

impl UploadBuildpackRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> UploadBuildpackRequestBuilder {
        UploadBuildpackRequestBuilder::default()
    }

    /// The buildpack identifier.
    #[must_use]
    pub fn buildpack_id(&self) -> &str {
        &self.buildpack_id
    }

    /// Path to the buildpack archive.
    #[must_use]
    pub fn buildpack(&self) -> &Path {
        &self.buildpack
    }

    /// File name reported to the platform.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Builder for [`UploadBuildpackRequest`].
#[derive(Debug, Clone, Default)]
pub struct UploadBuildpackRequestBuilder {
    buildpack_id: Option<String>,
    buildpack: Option<PathBuf>,
    filename: Option<String>,
}

impl UploadBuildpackRequestBuilder {
    /// Sets the buildpack identifier.
    #[must_use]
    pub fn buildpack_id(mut self, id: impl Into<String>) -> Self {
        self.buildpack_id = Some(id.into());
        self
    }

    /// Sets the archive to upload.
    #[must_use]
    pub fn buildpack(mut self, path: impl Into<PathBuf>) -> Self {
        self.buildpack = Some(path.into());
        self
    }

    /// Sets the file name.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three fields is missing.
    pub fn build(self) -> Result<UploadBuildpackRequest, RequestError> {
        Ok(UploadBuildpackRequest {
            buildpack_id: require_text(self.buildpack_id, "buildpack id")?,
            buildpack: require(self.buildpack, "buildpack")?,
            filename: require_text(self.filename, "filename")?,
        })
    }
}
