//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`validate`], [`inspect`], or [`init`].
//! Each handler lives in its own submodule.

pub mod init;
pub mod inspect;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::GatehouseError;

pub async fn dispatch(cli: Cli) -> Result<(), GatehouseError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Inspect(ref args)) => inspect::execute(args),
        Some(Commands::Init(ref args)) => init::execute(args),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  gatehouse v{version} \u{2014} route table and header policy for reverse proxies\n\n  \
         No command provided. To get started:\n\n    \
         gatehouse init                      Generate a starter config\n    \
         gatehouse validate gatehouse.yaml   Check a config file\n    \
         gatehouse run -c gatehouse.yaml     Serve and hot-reload a config\n    \
         gatehouse --help                    See all commands and options\n"
    );
}
