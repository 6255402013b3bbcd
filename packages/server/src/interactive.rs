//! Interactive mode for the server.
//!
//! Prompts the user for bind address, port and an optional static frontend
//! directory before starting the server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Defaults for every prompt come from [`ServerConfig::from_env`], so
/// pressing enter through the prompts behaves like the plain server binary.
///
/// # Errors
///
/// Returns an `std::io::Result` error if a dataset cannot be loaded or the
/// underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Facility Map Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let static_dir: String = Input::new()
        .with_prompt("Static frontend directory (blank for none)")
        .default(
            defaults
                .static_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();

    let config = ServerConfig {
        bind_addr,
        port,
        static_dir: Some(static_dir.trim())
            .filter(|d| !d.is_empty())
            .map(PathBuf::from),
    };

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {}:{}?",
            config.bind_addr, config.port
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
