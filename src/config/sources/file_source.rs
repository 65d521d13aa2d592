//! Generic async file-based config source with SHA256 change detection.
//!
//! [`FileSource`] implements [`ConfigSource`]
//! for any file format by accepting a deserialization function at
//! construction time. It reads the file asynchronously via Tokio,
//! validates the document, converts it into a [`RoutesConfig`]
//! snapshot, and computes a SHA256 hash for version tracking.

use std::path::PathBuf;

use async_trait::async_trait;

use super::sha256_hex;
use crate::config::model::RoutesDocument;
use crate::config::validation::validate;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::GatehouseError;
use crate::routes::RoutesConfig;

type DeserializeFn = fn(&str) -> Result<RoutesDocument, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: DeserializeFn,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, deserialize: DeserializeFn) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_content(&self) -> Result<String, GatehouseError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GatehouseError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                GatehouseError::Io(e)
            }
        })
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn load(&self) -> Result<(RoutesConfig, ConfigVersion), GatehouseError> {
        let content = self.read_content().await?;

        let doc = (self.deserialize)(&content).map_err(|e| GatehouseError::ConfigParse {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Err(errors) = validate(&doc) {
            return Err(GatehouseError::ConfigValidation { errors });
        }

        let hash = sha256_hex(content.as_bytes());
        tracing::debug!(
            path = %self.path.display(),
            routes = doc.route_count(),
            "config file parsed"
        );
        Ok((doc.into_config(), ConfigVersion::Hash(hash)))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, GatehouseError> {
        let content = self.read_content().await?;
        let hash = sha256_hex(content.as_bytes());
        Ok(*current != ConfigVersion::Hash(hash))
    }
}
