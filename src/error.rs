//! Unified error types for gatehouse.
//!
//! Defines [`GatehouseError`] (the main crate error enum) and
//! [`ValidationError`] for config validation failures. Error messages
//! include contextual hints to guide the user toward a fix.
//!
//! Route lookups and header policy resolution never fail, so neither
//! has a variant here.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub route: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  route {}: {} — {}",
            self.route, self.field, self.message
        )?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatehouseError {
    #[error("No config source found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Config serialization failed: {0}")]
    Serialize(String),

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_includes_suggestion() {
        let err = ValidationError {
            route: "users".into(),
            field: "path".into(),
            message: "path must start with '/'".into(),
            suggestion: Some("did you mean '/users/**'?".into()),
        };
        assert_eq!(
            err.to_string(),
            "  route users: path — path must start with '/' (did you mean '/users/**'?)"
        );
    }

    #[test]
    fn validation_failure_lists_every_error() {
        let errors = vec![
            ValidationError {
                route: "a".into(),
                field: "url".into(),
                message: "bad".into(),
                suggestion: None,
            },
            ValidationError {
                route: "b".into(),
                field: "path".into(),
                message: "worse".into(),
                suggestion: None,
            },
        ];
        let msg = GatehouseError::ConfigValidation { errors }.to_string();
        assert!(msg.contains("route a: url — bad"));
        assert!(msg.contains("route b: path — worse"));
    }
}
