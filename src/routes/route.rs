//! A single proxy route: path pattern, target, and per-route overrides.

use std::fmt;

use serde::Serialize;

use crate::policy::header_set::HeaderSet;

/// Sensitive-header setting for a route (or the global base set).
///
/// `Explicit` with an empty set is a real override meaning "nothing is
/// sensitive here"; it is not the same as `Inherited`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SensitiveHeaders {
    #[default]
    Inherited,
    Explicit(HeaderSet),
}

impl SensitiveHeaders {
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    #[must_use]
    pub const fn explicit(&self) -> Option<&HeaderSet> {
        match self {
            Self::Inherited => None,
            Self::Explicit(set) => Some(set),
        }
    }
}

impl<S: Into<String>> From<Option<Vec<S>>> for SensitiveHeaders {
    fn from(value: Option<Vec<S>>) -> Self {
        value.map_or(Self::Inherited, |names| {
            Self::Explicit(names.into_iter().collect())
        })
    }
}

/// The active forwarding target of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Target {
    Url(String),
    Service(String),
}

impl Target {
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Service(id) => id,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.location())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub path: String,
    pub service_id: Option<String>,
    pub url: Option<String>,
    pub strip_prefix: bool,
    pub retryable: Option<bool>,
    sensitive_headers: SensitiveHeaders,
}

impl Route {
    /// A route with default settings: path `/{id}/**`, no target,
    /// prefix stripping on, inherited sensitive headers.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: default_path(&id),
            id,
            service_id: None,
            url: None,
            strip_prefix: true,
            retryable: None,
            sensitive_headers: SensitiveHeaders::Inherited,
        }
    }

    /// Build a route with every field given up front. Passing
    /// `Some(names)` for `sensitive_headers` is the same as calling
    /// [`Route::set_sensitive_headers`] after [`Route::new`].
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn with_fields<S: Into<String>>(
        id: impl Into<String>,
        path: impl Into<String>,
        service_id: Option<String>,
        url: Option<String>,
        strip_prefix: bool,
        retryable: Option<bool>,
        sensitive_headers: Option<Vec<S>>,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            service_id,
            url,
            strip_prefix,
            retryable,
            sensitive_headers: sensitive_headers.into(),
        }
    }

    /// Override the sensitive headers for this route. Any call, even with
    /// an empty iterator, marks the route as carrying custom headers.
    pub fn set_sensitive_headers<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_headers = SensitiveHeaders::Explicit(names.into_iter().collect());
    }

    /// Drop the override and fall back to the global set.
    pub fn inherit_sensitive_headers(&mut self) {
        self.sensitive_headers = SensitiveHeaders::Inherited;
    }

    #[must_use]
    pub const fn sensitive_headers(&self) -> &SensitiveHeaders {
        &self.sensitive_headers
    }

    #[must_use]
    pub const fn custom_sensitive_headers(&self) -> bool {
        self.sensitive_headers.is_explicit()
    }

    /// `url` wins over `service_id` when both are present.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        self.url
            .clone()
            .map(Target::Url)
            .or_else(|| self.service_id.clone().map(Target::Service))
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.url.as_deref().or(self.service_id.as_deref())
    }
}

pub(crate) fn default_path(id: &str) -> String {
    format!("/{id}/**")
}
