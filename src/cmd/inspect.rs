//! `gatehouse inspect` — print the effective header policy.
//!
//! Loads a config file and resolves the ignored and sensitive header
//! sets for one route, or the global policy when no route (or an
//! unknown route) is given.

use crate::cli::{InspectArgs, OutputFormat};
use crate::config::sources::load_file;
use crate::config::validation::display_set;
use crate::error::GatehouseError;
use crate::policy::HeaderPolicy;

pub fn execute(args: &InspectArgs) -> Result<(), GatehouseError> {
    let config = load_file(&args.config)?;

    let policy = match args.route.as_deref() {
        Some(id) => {
            if config.route(id).is_none() {
                eprintln!("route '{id}' not found, showing the global policy");
            }
            HeaderPolicy::for_route_id(&config, id)
        }
        None => HeaderPolicy::resolve(&config, None),
    };

    match args.format {
        OutputFormat::Text => {
            let scope = policy.route.as_deref().unwrap_or("(global)");
            println!("route:     {scope}");
            if let Some(route) = policy.route.as_deref().and_then(|id| config.route(id)) {
                println!("path:      {}", config.full_path(route));
                println!("location:  {}", route.location().unwrap_or("none"));
            }
            println!("ignored:   {}", display_set(&policy.ignored));
            println!(
                "sensitive: {}{}",
                display_set(&policy.sensitive),
                if policy.custom_sensitive_headers {
                    " (route override)"
                } else {
                    ""
                }
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&policy)
                .map_err(|e| GatehouseError::Serialize(e.to_string()))?;
            println!("{json}");
        }
    }

    Ok(())
}
