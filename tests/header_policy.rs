//! Integration tests for sensitive/ignored header resolution through the
//! public API.

use axum::http::{HeaderMap, HeaderValue};
use gatehouse::policy::header_set::{HeaderSet, SECURITY_HEADERS};
use gatehouse::policy::{
    effective_ignored_headers, effective_sensitive_headers, global_sensitive_headers, HeaderPolicy,
};
use gatehouse::{Route, RoutesConfig};

fn config_with_routes() -> RoutesConfig {
    let mut config = RoutesConfig::new();
    config.add_or_replace_route(Route::new("inherits"));

    let mut custom = Route::new("custom");
    custom.set_sensitive_headers(["X-Api-Key"]);
    config.add_or_replace_route(custom);

    let mut open = Route::new("open");
    open.set_sensitive_headers(Vec::<String>::new());
    config.add_or_replace_route(open);

    config
}

#[test]
fn defaults_are_the_security_headers() {
    let config = RoutesConfig::new();
    let sensitive = global_sensitive_headers(&config);
    for name in SECURITY_HEADERS {
        assert!(sensitive.contains(name), "missing {name}");
    }
    assert_eq!(sensitive.len(), SECURITY_HEADERS.len());
}

#[test]
fn route_without_override_inherits_global_set() {
    let mut config = config_with_routes();
    config.add_sensitive_header("X-Tenant");
    let route = config.route("inherits").unwrap();
    assert_eq!(
        effective_sensitive_headers(&config, Some(route)),
        global_sensitive_headers(&config)
    );
}

#[test]
fn explicit_route_list_replaces_global_set() {
    let config = config_with_routes();
    let route = config.route("custom").unwrap();
    let sensitive = effective_sensitive_headers(&config, Some(route));
    assert!(sensitive.contains("x-api-key"));
    assert!(!sensitive.contains("Cookie"));
}

#[test]
fn explicit_empty_list_means_nothing_is_sensitive() {
    let config = config_with_routes();
    let route = config.route("open").unwrap();
    assert!(route.custom_sensitive_headers());
    assert!(effective_sensitive_headers(&config, Some(route)).is_empty());
}

#[test]
fn additions_are_unioned_with_the_base_set() {
    let mut config = RoutesConfig::new();
    config.add_sensitive_header("X-Tenant");
    config.add_sensitive_header("x-tenant");
    let sensitive = global_sensitive_headers(&config);
    assert!(sensitive.is_superset(&HeaderSet::security_defaults()));
    assert!(sensitive.contains("X-TENANT"));
    assert_eq!(sensitive.len(), SECURITY_HEADERS.len() + 1);
}

#[test]
fn setting_base_replaces_defaults_but_keeps_additions() {
    let mut config = RoutesConfig::new();
    config.add_sensitive_header("X-Tenant");
    config.set_sensitive_headers(["X-Session"]);

    let sensitive = global_sensitive_headers(&config);
    assert_eq!(sensitive.len(), 2);
    assert!(sensitive.contains("X-Session"));
    assert!(sensitive.contains("X-Tenant"));
}

#[test]
fn resolution_does_not_depend_on_field_order() {
    let mut first = RoutesConfig::new();
    first.ignore_security_headers = false;
    first.add_sensitive_header("X-A");

    let mut second = RoutesConfig::new();
    second.add_sensitive_header("X-A");
    second.ignore_security_headers = false;

    assert_eq!(
        global_sensitive_headers(&first),
        global_sensitive_headers(&second)
    );
    assert_eq!(global_sensitive_headers(&first).to_vec(), vec!["X-A".to_string()]);
}

#[test]
fn ignored_headers_include_security_defaults_when_enabled() {
    let mut config = RoutesConfig::new();
    config.set_ignored_headers(["X-Internal"]);
    let ignored = effective_ignored_headers(&config);
    assert!(ignored.contains("x-internal"));
    assert!(ignored.contains("Authorization"));

    config.ignore_security_headers = false;
    let ignored = effective_ignored_headers(&config);
    assert_eq!(ignored.to_vec(), vec!["X-Internal".to_string()]);
}

#[test]
fn unknown_route_id_gets_global_policy() {
    let config = config_with_routes();
    let policy = HeaderPolicy::for_route_id(&config, "missing");
    assert!(policy.route.is_none());
    assert!(!policy.custom_sensitive_headers);
    assert_eq!(policy.sensitive, global_sensitive_headers(&config));
}

#[test]
fn request_filter_strips_sensitive_headers_case_insensitively() {
    let mut config = config_with_routes();
    config.ignore_security_headers = false;
    let policy = HeaderPolicy::for_route_id(&config, "custom");

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_static("secret"));
    headers.insert("cookie", HeaderValue::from_static("session=1"));
    headers.insert("accept", HeaderValue::from_static("*/*"));

    let removed = policy.filter_request(&mut headers);
    assert_eq!(removed, 1);
    assert!(headers.get("x-api-key").is_none());
    assert!(headers.get("cookie").is_some());
    assert!(headers.get("accept").is_some());
}

#[test]
fn response_filter_only_strips_ignored_headers() {
    let mut config = RoutesConfig::new();
    config.ignore_security_headers = false;
    config.set_ignored_headers(["X-Debug"]);
    let policy = HeaderPolicy::resolve(&config, None);

    let mut headers = HeaderMap::new();
    headers.insert("x-debug", HeaderValue::from_static("1"));
    headers.insert("set-cookie", HeaderValue::from_static("a=b"));

    assert_eq!(policy.filter_response(&mut headers), 1);
    assert!(headers.get("set-cookie").is_some());
    assert!(!policy.is_response_header_allowed("X-DEBUG"));
    assert!(policy.is_request_header_allowed("Cookie"));
    assert!(!policy.is_request_header_allowed("x-debug"));
}
