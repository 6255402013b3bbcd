#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI orchestrator for the facility map toolchain.
//!
//! Provides a unified entry point that lets users either search for
//! nearby facilities directly in the terminal or start the API server.
//!
//! Uses `indicatif-log-bridge` (via [`facility_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the dataset loading spinner never fight for the terminal.

mod search;

use dialoguer::Select;

/// Top-level tool selection for the facility map toolchain.
enum Tool {
    Search,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Search, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search facilities",
            Self::Server => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = facility_map_cli_utils::init_logger();

    println!("Facility Map Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Search => search::run(&multi).await?,
        Tool::Server => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(facility_map_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}
