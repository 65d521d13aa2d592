//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature flags
//! and the [`parse_config_str`] helper for format-specific
//! deserialization.

pub mod file_source;

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "toml")]
pub mod toml_source;

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::model::RoutesDocument;
use crate::config::validation::validate;
use crate::config::ConfigSource;
use crate::error::GatehouseError;
use crate::routes::RoutesConfig;

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<RoutesDocument, GatehouseError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| GatehouseError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| GatehouseError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| GatehouseError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(GatehouseError::UnsupportedFormat(other.to_string())),
    }
}

/// Read, parse, and validate a config file into a snapshot.
///
/// Synchronous counterpart of [`ConfigSource::load`] for one-shot
/// commands (`validate`, `inspect`).
pub fn load_file(path: &Path) -> Result<RoutesConfig, GatehouseError> {
    if !path.exists() {
        return Err(GatehouseError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let doc = parse_config_str(ext, &content, &path.display().to_string())?;

    if let Err(errors) = validate(&doc) {
        return Err(GatehouseError::ConfigValidation { errors });
    }

    Ok(doc.into_config())
}

/// Build the file source matching a path's extension.
pub fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, GatehouseError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(yaml::new(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(json::new(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(toml_source::new(path.to_path_buf()))),

        other => Err(GatehouseError::UnsupportedFormat(other.to_string())),
    }
}

/// Compute a lowercase hex-encoded SHA-256 digest.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_stable() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            parse_config_str("xml", "<routes/>", "routes.xml"),
            Err(GatehouseError::UnsupportedFormat(ext)) if ext == "xml"
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_file(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, GatehouseError::ConfigFileNotFound { .. }));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_empty_list_marks_custom_sensitive_headers() {
        let doc = parse_config_str(
            "yaml",
            "routes:\n  foo:\n    path: /foo/**\n    sensitive_headers: []\n",
            "inline.yaml",
        )
        .unwrap();
        let config = doc.into_config();
        assert!(config.route("foo").unwrap().custom_sensitive_headers());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yaml_blank_key_marks_custom_sensitive_headers() {
        let doc = parse_config_str(
            "yaml",
            "sensitive_headers:\nroutes:\n  foo:\n    path: /foo/**\n    sensitive_headers:\n",
            "inline.yaml",
        )
        .unwrap();
        let config = doc.into_config();
        let route = config.route("foo").unwrap();
        assert!(route.custom_sensitive_headers());
        assert!(crate::policy::effective_sensitive_headers(&config, Some(route)).is_empty());
        assert!(config.sensitive_headers.is_explicit());
    }
}
