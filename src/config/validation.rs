//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`RoutesDocument`] for
//! structural errors: bad route ids, paths that do not start with `/`,
//! malformed target URLs, unusable service ids, and header names that
//! are not valid HTTP field names. Returns a list of [`ValidationError`]
//! values with per-field suggestions.
//!
//! A route with both `url` and `service_id` is accepted (the url wins)
//! but logged as a warning.

use http::HeaderName;
use url::Url;

use super::model::RoutesDocument;
use crate::error::ValidationError;
use crate::policy::header_set::HeaderSet;
use crate::policy::{effective_ignored_headers, global_sensitive_headers, HeaderPolicy};
use crate::routes::RoutesConfig;

const ROOT: &str = "(root)";

/// Validate a route path pattern. Returns `Ok(())` or a human-readable error.
pub fn validate_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("path cannot be empty".into());
    }
    if !path.starts_with('/') {
        return Err(format!("path must start with '/' (did you mean '/{path}'?)"));
    }
    if path.chars().any(char::is_whitespace) {
        return Err("path cannot contain whitespace".into());
    }
    Ok(())
}

/// Validate a literal target URL. Returns `Ok(())` or a human-readable error.
pub fn validate_target_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

/// Validate a logical service name. Returns `Ok(())` or a human-readable error.
pub fn validate_service_id(service_id: &str) -> Result<(), String> {
    if service_id.is_empty() {
        return Err("service id cannot be empty".into());
    }
    if service_id.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(format!(
            "'{service_id}' is not a valid service id (no whitespace or '/')"
        ));
    }
    Ok(())
}

/// Validate an HTTP header name. Returns `Ok(())` or a human-readable error.
pub fn validate_header_name(name: &str) -> Result<(), String> {
    HeaderName::from_bytes(name.as_bytes())
        .map(|_| ())
        .map_err(|_| format!("'{name}' is not a valid header name"))
}

fn check_headers(errors: &mut Vec<ValidationError>, route: &str, field: &str, names: &[String]) {
    for name in names {
        if let Err(msg) = validate_header_name(name) {
            errors.push(ValidationError {
                route: route.into(),
                field: field.into(),
                message: msg,
                suggestion: None,
            });
        }
    }
}

pub fn validate(doc: &RoutesDocument) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !doc.prefix.is_empty() {
        if !doc.prefix.starts_with('/') {
            errors.push(ValidationError {
                route: ROOT.into(),
                field: "prefix".into(),
                message: "prefix must start with '/'".into(),
                suggestion: Some(format!("did you mean '/{}'?", doc.prefix)),
            });
        } else if doc.prefix.ends_with('/') {
            errors.push(ValidationError {
                route: ROOT.into(),
                field: "prefix".into(),
                message: "prefix must not end with '/'".into(),
                suggestion: Some(format!(
                    "did you mean '{}'?",
                    doc.prefix.trim_end_matches('/')
                )),
            });
        }
    }

    check_headers(&mut errors, ROOT, "ignored_headers", &doc.ignored_headers);
    if let Some(ref names) = doc.sensitive_headers {
        check_headers(&mut errors, ROOT, "sensitive_headers", names);
    }
    check_headers(
        &mut errors,
        ROOT,
        "additional_sensitive_headers",
        &doc.additional_sensitive_headers,
    );

    for (id, route) in &doc.routes {
        if id.trim().is_empty() {
            errors.push(ValidationError {
                route: format!("'{id}'"),
                field: "id".into(),
                message: "route id cannot be blank".into(),
                suggestion: None,
            });
        }

        if let Some(ref path) = route.path {
            if let Err(msg) = validate_path(path) {
                errors.push(ValidationError {
                    route: id.clone(),
                    field: "path".into(),
                    message: msg,
                    suggestion: if !path.is_empty() && !path.starts_with('/') {
                        Some(format!("did you mean '/{path}'?"))
                    } else {
                        None
                    },
                });
            }
        }

        if let Some(ref url) = route.url {
            if let Err(msg) = validate_target_url(url) {
                errors.push(ValidationError {
                    route: id.clone(),
                    field: "url".into(),
                    message: msg,
                    suggestion: None,
                });
            }
        }

        if let Some(ref service_id) = route.service_id {
            if let Err(msg) = validate_service_id(service_id) {
                errors.push(ValidationError {
                    route: id.clone(),
                    field: "service_id".into(),
                    message: msg,
                    suggestion: None,
                });
            }
        }

        if route.url.is_some() && route.service_id.is_some() {
            tracing::warn!(
                route = %id,
                "both url and service_id are set, url takes precedence"
            );
        }

        if let Some(ref names) = route.sensitive_headers {
            check_headers(&mut errors, id, "sensitive_headers", names);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &RoutesConfig) -> String {
    let mut lines = vec![format!("  {} routes\n", config.route_count())];

    if !config.prefix.is_empty() {
        lines.push(format!(
            "  prefix:            {} ({})",
            config.prefix,
            if config.strip_prefix {
                "stripped before forwarding"
            } else {
                "kept when forwarding"
            }
        ));
    }
    lines.push(format!(
        "  ignored headers:   {}",
        display_set(&effective_ignored_headers(config))
    ));
    lines.push(format!(
        "  sensitive headers: {}\n",
        display_set(&global_sensitive_headers(config))
    ));

    for route in config.routes() {
        let policy = HeaderPolicy::resolve(config, Some(route));
        let sensitive = if policy.custom_sensitive_headers {
            display_set(&policy.sensitive)
        } else {
            "(global)".to_string()
        };

        lines.push(format!(
            "  {}  {} -> {}",
            route.id,
            config.full_path(route),
            route.location().unwrap_or("none"),
        ));
        lines.push(format!(
            "    strip_prefix: {}, retryable: {}",
            route.strip_prefix,
            config.is_retryable(route)
        ));
        lines.push(format!("    sensitive headers: {sensitive}"));
    }

    for (full_path, ids) in config.duplicate_full_paths() {
        lines.push(format!(
            "\n  warning: {full_path} is shared by {}",
            ids.join(", ")
        ));
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}

pub(crate) fn display_set(set: &HeaderSet) -> String {
    if set.is_empty() {
        "(none)".to_string()
    } else {
        set.to_string()
    }
}
