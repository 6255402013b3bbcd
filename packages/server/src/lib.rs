#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the facility map application.
//!
//! Serves the search pipeline as a JSON API for a map frontend, plus an
//! optional directory of static frontend files. The facility catalog and
//! ZIP gazetteer are loaded once before the server binds and shared
//! read-only by every worker; each request recomputes its result from
//! scratch.

mod handlers;
pub mod interactive;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use facility_map_catalog::Catalog;

/// Shared application state.
pub struct AppState {
    /// The immutable facility catalog and ZIP gazetteer.
    pub catalog: Arc<Catalog>,
}

/// Where and how the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to bind to.
    pub port: u16,
    /// Directory of frontend files served at `/`, if any.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `STATIC_DIR`, falling back to
    /// `127.0.0.1:8080` with no static files.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Registers the `/api` routes.
///
/// Query strings that fail to deserialize (a negative or non-numeric
/// radius, for instance) are answered with a 400
/// [`ApiError`](facility_map_server_models::ApiError) body like
/// every other rejected search.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::QueryConfig::default().error_handler(handlers::query_error))
            .route("/health", web::get().to(handlers::health))
            .route("/facility-types", web::get().to(handlers::facility_types))
            .route("/search", web::get().to(handlers::search)),
    );
}

/// Loads the catalog and starts the facility map API server.
///
/// The caller provides the async runtime (e.g. via `#[actix_web::main]`)
/// and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if either dataset cannot be loaded,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading facility catalog...");
    let catalog = Catalog::load().await.map_err(|e| {
        log::error!("Dataset unavailable: {e}");
        std::io::Error::other(e)
    })?;

    serve(Arc::new(catalog), config).await
}

/// Starts the HTTP server over an already-loaded catalog.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn serve(catalog: Arc<Catalog>, config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState { catalog });

    let ServerConfig {
        bind_addr,
        port,
        static_dir,
    } = config;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let mut app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api);

        // Serve frontend static files (production)
        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir).index_file("index.html"));
        }

        app
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
