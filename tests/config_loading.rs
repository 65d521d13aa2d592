//! Integration tests for config loading across all file formats.

use gatehouse::config::model::RoutesDocument;
use gatehouse::config::sources::{load_file, parse_config_str};
use gatehouse::config::validation::validate;
use gatehouse::policy::effective_sensitive_headers;

fn load_demo(name: &str) -> String {
    let path = format!("demo/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

#[test]
fn yaml_demo_loads_and_validates() {
    let content = load_demo("gatehouse.yaml");
    let doc = parse_config_str("yaml", &content, "gatehouse.yaml").unwrap();
    validate(&doc).unwrap();
    let config = doc.into_config();
    assert_eq!(config.route_count(), 3);
    assert_eq!(config.prefix, "/api");
}

#[test]
fn yaml_demo_route_overrides() {
    let config = load_file(std::path::Path::new("demo/gatehouse.yaml")).unwrap();

    let users = config.route("users").unwrap();
    assert!(!users.custom_sensitive_headers());
    assert!(effective_sensitive_headers(&config, Some(users)).contains("Cookie"));

    let billing = config.route("billing").unwrap();
    let sensitive = effective_sensitive_headers(&config, Some(billing));
    assert_eq!(sensitive.to_vec(), vec!["X-Api-Key".to_string()]);
    assert!(config.is_retryable(billing));

    let public = config.route("public").unwrap();
    assert!(public.custom_sensitive_headers());
    assert!(effective_sensitive_headers(&config, Some(public)).is_empty());
    assert!(!public.strip_prefix);
}

#[cfg(feature = "json")]
#[test]
fn json_demo_loads_and_validates() {
    let content = load_demo("gatehouse.json");
    let doc = parse_config_str("json", &content, "gatehouse.json").unwrap();
    validate(&doc).unwrap();
    assert_eq!(doc.route_count(), 3);
}

#[cfg(feature = "toml")]
#[test]
fn toml_demo_loads_and_validates() {
    let content = load_demo("gatehouse.toml");
    let doc = parse_config_str("toml", &content, "gatehouse.toml").unwrap();
    validate(&doc).unwrap();
    assert_eq!(doc.route_count(), 3);
}

#[cfg(all(feature = "json", feature = "toml"))]
#[test]
fn all_formats_produce_equivalent_configs() {
    let yaml = parse_config_str("yaml", &load_demo("gatehouse.yaml"), "yaml").unwrap();
    let json = parse_config_str("json", &load_demo("gatehouse.json"), "json").unwrap();
    let toml = parse_config_str("toml", &load_demo("gatehouse.toml"), "toml").unwrap();

    let yaml = yaml.into_config();
    assert_eq!(yaml, json.into_config());
    assert_eq!(yaml, toml.into_config());
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_config_str("xml", "{}", "test.xml");
    assert!(result.is_err());
}

#[test]
fn malformed_document_is_a_parse_error() {
    let result = parse_config_str("yaml", "routes: [not, a, map]", "broken.yaml");
    assert!(matches!(
        result,
        Err(gatehouse::error::GatehouseError::ConfigParse { .. })
    ));
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let doc: RoutesDocument = serde_json::from_str(r#"{"routes": {"orders": {}}}"#).unwrap();
    validate(&doc).unwrap();
    let config = doc.into_config();
    let orders = config.route("orders").unwrap();
    assert_eq!(orders.path, "/orders/**");
    assert_eq!(orders.location(), Some("orders"));
    assert!(orders.strip_prefix);
    assert!(!config.is_retryable(orders));
}

#[test]
fn invalid_config_fails_validation() {
    let doc: RoutesDocument =
        serde_json::from_str(r#"{"routes": {"a": {"url": "mailto:x@y"}}}"#).unwrap();
    assert!(validate(&doc).is_err());
}
