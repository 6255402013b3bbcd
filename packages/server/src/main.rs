#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the facility map application.
//!
//! Loads the facility catalog and ZIP gazetteer, then serves the search
//! API. Configuration comes from the environment (`BIND_ADDR`, `PORT`,
//! `STATIC_DIR`, and the dataset source overrides).

use facility_map_server::{ServerConfig, run_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    run_server(ServerConfig::from_env()).await
}
