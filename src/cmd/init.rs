//! `gatehouse init` — generate a starter configuration file.
//!
//! Builds a small [`RoutesDocument`] with one service route and one
//! URL route and writes it in YAML, JSON, or TOML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::config::model::{RouteDocument, RoutesDocument};
use crate::error::GatehouseError;

pub fn execute(args: &InitArgs) -> Result<(), GatehouseError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("gatehouse.{}", args.format.extension())));

    if output.exists() {
        return Err(GatehouseError::FileExists { path: output });
    }

    let content = serialize_document(&starter_document(), &args.format)?;
    std::fs::write(&output, content)?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub fn starter_document() -> RoutesDocument {
    let mut routes = BTreeMap::new();
    routes.insert(
        "users".to_string(),
        RouteDocument {
            path: Some("/users/**".into()),
            service_id: Some("users-service".into()),
            ..RouteDocument::default()
        },
    );
    routes.insert(
        "legacy".to_string(),
        RouteDocument {
            path: Some("/legacy/**".into()),
            url: Some("http://localhost:8080".into()),
            sensitive_headers: Some(vec![]),
            ..RouteDocument::default()
        },
    );

    RoutesDocument {
        routes,
        ..RoutesDocument::default()
    }
}

/// Serialize a document to a formatted string in the given format.
pub fn serialize_document(
    doc: &RoutesDocument,
    format: &ConfigFormat,
) -> Result<String, GatehouseError> {
    match format {
        #[cfg(feature = "yaml")]
        ConfigFormat::Yaml => {
            serde_yml::to_string(doc).map_err(|e| GatehouseError::Serialize(e.to_string()))
        }

        #[cfg(not(feature = "yaml"))]
        ConfigFormat::Yaml => Err(GatehouseError::UnsupportedFormat("yaml".into())),

        ConfigFormat::Json => {
            serde_json::to_string_pretty(doc).map_err(|e| GatehouseError::Serialize(e.to_string()))
        }

        #[cfg(feature = "toml")]
        ConfigFormat::Toml => {
            toml::to_string_pretty(doc).map_err(|e| GatehouseError::Serialize(e.to_string()))
        }

        #[cfg(not(feature = "toml"))]
        ConfigFormat::Toml => Err(GatehouseError::UnsupportedFormat("toml".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate;

    #[test]
    fn starter_document_is_valid() {
        assert!(validate(&starter_document()).is_ok());
    }

    #[test]
    fn starter_json_parses_back() {
        let json = serialize_document(&starter_document(), &ConfigFormat::Json).unwrap();
        let doc: RoutesDocument = serde_json::from_str(&json).unwrap();
        let config = doc.into_config();
        assert_eq!(config.route_count(), 2);
        assert!(config.route("legacy").unwrap().custom_sensitive_headers());
        assert!(!config.route("users").unwrap().custom_sensitive_headers());
    }
}
