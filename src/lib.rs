//! gatehouse is the route table and header redaction policy of a
//! reverse proxy.
//!
//! It loads a set of routes (id → path pattern → service id or URL) plus
//! global routing defaults, and resolves for every route which headers
//! are *sensitive* (never sent upstream) and which are *ignored* (never
//! forwarded in either direction). The forwarding pipeline itself lives
//! elsewhere; it consults this crate through [`RoutesStore`] snapshots
//! and [`HeaderPolicy`].
//!
//! # Architecture
//!
//! - [`routes`] -- The route table: [`RoutesConfig`], [`Route`], and the
//!   `Inherited | Explicit` sensitive-header override.
//! - [`policy`] -- Header policy resolution and the case-insensitive
//!   [`HeaderSet`](policy::header_set::HeaderSet).
//! - [`config`] -- Config document model, validation, file sources, and
//!   the lock-free snapshot store.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, validate, inspect, init).
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`actuator`] -- `/actuator/routes` and friends.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum server setup, shared application state, and
//!   graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod actuator;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod policy;
pub mod routes;
pub mod server;

pub use config::store::RoutesStore;
pub use policy::HeaderPolicy;
pub use routes::{Route, RoutesConfig};
