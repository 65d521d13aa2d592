//! Configuration loading, validation, and hot-reloading.
//!
//! Defines the [`ConfigSource`] trait for pluggable config backends
//! and the [`ConfigVersion`] enum for change detection. Submodules provide
//! the document model, validation logic, the snapshot store, and
//! concrete source implementations.

pub mod model;
pub mod sources;
pub mod store;
pub mod validation;

use async_trait::async_trait;

use crate::error::GatehouseError;
use crate::routes::RoutesConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    Hash(String),
}

impl ConfigVersion {
    /// First eight characters, for logs and health output.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Hash(h) => h.get(..8).unwrap_or(h),
        }
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(RoutesConfig, ConfigVersion), GatehouseError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, GatehouseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_version_truncates() {
        assert_eq!(ConfigVersion::Hash("0123456789abcdef".into()).short(), "01234567");
        assert_eq!(ConfigVersion::Hash("abc".into()).short(), "abc");
    }
}
