//! Serde data structures for the gatehouse configuration file.
//!
//! Contains [`RoutesDocument`] (the root), [`RouteDocument`] and
//! [`ThreadPoolDocument`]. All types derive `Serialize` and `Deserialize`
//! with `deny_unknown_fields` for strict parsing. A document is turned
//! into a [`RoutesConfig`] snapshot with [`RoutesDocument::into_config`],
//! which also fills in per-route defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::routes::route::default_path;
use crate::routes::{Route, RoutesConfig, SensitiveHeaders, ThreadPool};

const fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// A key that is present but blank (`sensitive_headers:` in YAML, `null`
/// in JSON) is an empty list, not an absent key.
fn present_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(|names| Some(names.unwrap_or_default()))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesDocument {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub strip_prefix: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub retryable: bool,

    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub ignore_security_headers: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_headers: Vec<String>,

    /// Presence of the key (even an empty list) replaces the defaults.
    #[serde(
        default,
        deserialize_with = "present_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub sensitive_headers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_sensitive_headers: Vec<String>,

    #[serde(default, skip_serializing_if = "ThreadPoolDocument::is_default")]
    pub thread_pool: ThreadPoolDocument,

    #[serde(default)]
    pub routes: BTreeMap<String, RouteDocument>,
}

impl Default for RoutesDocument {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            strip_prefix: default_true(),
            retryable: false,
            ignore_security_headers: default_true(),
            ignored_headers: Vec::new(),
            sensitive_headers: None,
            additional_sensitive_headers: Vec::new(),
            thread_pool: ThreadPoolDocument::default(),
            routes: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,

    /// Presence of the key (even an empty list) overrides the global set.
    #[serde(
        default,
        deserialize_with = "present_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub sensitive_headers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThreadPoolDocument {
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_separate_thread_pools: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub thread_pool_key_prefix: String,
}

impl ThreadPoolDocument {
    fn is_default(&self) -> bool {
        !self.use_separate_thread_pools && self.thread_pool_key_prefix.is_empty()
    }
}

impl RoutesDocument {
    /// Build a snapshot. Routes without a path get `/{id}/**`; routes
    /// with neither `url` nor `service_id` use their id as service id.
    #[must_use]
    pub fn into_config(self) -> RoutesConfig {
        let mut config = RoutesConfig::new();
        config.prefix = self.prefix;
        config.strip_prefix = self.strip_prefix;
        config.retryable = self.retryable;
        config.ignored_headers = self.ignored_headers.into_iter().collect();
        config.sensitive_headers = self.sensitive_headers.into();
        config.additional_sensitive_headers =
            self.additional_sensitive_headers.into_iter().collect();
        config.ignore_security_headers = self.ignore_security_headers;
        config.thread_pool = ThreadPool {
            use_separate_thread_pools: self.thread_pool.use_separate_thread_pools,
            thread_pool_key_prefix: self.thread_pool.thread_pool_key_prefix,
        };

        for (id, doc) in self.routes {
            config.add_or_replace_route(doc.into_route(id));
        }

        for (path, ids) in config.duplicate_full_paths() {
            tracing::warn!(
                path = %path,
                routes = %ids.join(", "),
                "routes share a full path, only one is visible in diagnostics"
            );
        }

        config
    }

    #[must_use]
    pub fn from_config(config: &RoutesConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            strip_prefix: config.strip_prefix,
            retryable: config.retryable,
            ignore_security_headers: config.ignore_security_headers,
            ignored_headers: config.ignored_headers.to_vec(),
            sensitive_headers: config.sensitive_headers.explicit().map(|s| s.to_vec()),
            additional_sensitive_headers: config.additional_sensitive_headers.to_vec(),
            thread_pool: ThreadPoolDocument {
                use_separate_thread_pools: config.thread_pool.use_separate_thread_pools,
                thread_pool_key_prefix: config.thread_pool.thread_pool_key_prefix.clone(),
            },
            routes: config
                .routes()
                .map(|route| (route.id.clone(), RouteDocument::from_route(route)))
                .collect(),
        }
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl RouteDocument {
    fn into_route(self, id: String) -> Route {
        let path = self.path.unwrap_or_else(|| default_path(&id));
        let service_id = if self.url.is_none() && self.service_id.is_none() {
            Some(id.clone())
        } else {
            self.service_id
        };
        Route::with_fields(
            id,
            path,
            service_id,
            self.url,
            self.strip_prefix.unwrap_or(true),
            self.retryable,
            self.sensitive_headers,
        )
    }

    fn from_route(route: &Route) -> Self {
        Self {
            path: Some(route.path.clone()),
            service_id: route.service_id.clone(),
            url: route.url.clone(),
            strip_prefix: (!route.strip_prefix).then_some(false),
            retryable: route.retryable,
            sensitive_headers: match route.sensitive_headers() {
                SensitiveHeaders::Inherited => None,
                SensitiveHeaders::Explicit(set) => Some(set.to_vec()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let doc: RoutesDocument = serde_json::from_str("{}").unwrap();
        let config = doc.into_config();
        assert!(config.ignore_security_headers);
        assert!(config.strip_prefix);
        assert!(!config.retryable);
        assert_eq!(config.sensitive_headers, SensitiveHeaders::Inherited);
        assert_eq!(config.route_count(), 0);
    }

    #[test]
    fn route_defaults_are_filled_in() {
        let doc: RoutesDocument = serde_json::from_str(r#"{"routes": {"users": {}}}"#).unwrap();
        let config = doc.into_config();
        let route = config.route("users").unwrap();
        assert_eq!(route.path, "/users/**");
        assert_eq!(route.service_id.as_deref(), Some("users"));
        assert!(route.strip_prefix);
        assert!(route.retryable.is_none());
        assert!(!route.custom_sensitive_headers());
    }

    #[test]
    fn empty_sensitive_list_is_an_override() {
        let doc: RoutesDocument = serde_json::from_str(
            r#"{"routes": {"a": {"sensitive_headers": []}, "b": {"url": "http://b"}}}"#,
        )
        .unwrap();
        let config = doc.into_config();
        assert!(config.route("a").unwrap().custom_sensitive_headers());
        assert!(!config.route("b").unwrap().custom_sensitive_headers());
        assert!(config.route("b").unwrap().service_id.is_none());
    }

    #[test]
    fn null_sensitive_list_is_an_empty_override() {
        let doc: RoutesDocument = serde_json::from_str(
            r#"{"sensitive_headers": null, "routes": {"a": {"sensitive_headers": null}}}"#,
        )
        .unwrap();
        let config = doc.into_config();
        assert_eq!(
            config.sensitive_headers,
            SensitiveHeaders::Explicit(Default::default())
        );
        let route = config.route("a").unwrap();
        assert!(route.custom_sensitive_headers());
        assert!(crate::policy::effective_sensitive_headers(&config, Some(route)).is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<RoutesDocument, _> =
            serde_json::from_str(r#"{"routes": {"a": {"pathh": "/a"}}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn document_survives_config_conversion() {
        let json = r#"{
            "prefix": "/api",
            "sensitive_headers": ["X-Bar"],
            "routes": {
                "foo": {"path": "/foo/**", "url": "http://foo:80", "strip_prefix": false,
                        "retryable": true, "sensitive_headers": ["X-Foo"]}
            }
        }"#;
        let doc: RoutesDocument = serde_json::from_str(json).unwrap();
        let config = doc.into_config();
        let back = RoutesDocument::from_config(&config).into_config();
        assert_eq!(config, back);
    }
}
