#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Sakila chart tools.
//!
//! Lists the registered tools and enums, runs a tool by name with a JSON
//! body of arguments, and answers enum searches. Every tool call issues its
//! queries through a [`SqlQueryExecutor`] over a `PostgreSQL` connection.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use sakila_database::{db, executor::SqlQueryExecutor};
use sakila_toolbox::{registry::ToolRegistry, state::State};
use switchy_database::Database;

/// Shared application state.
pub struct AppState {
    /// Query context handed to every tool and enum search.
    pub toolbox: State,
    /// Registered tools.
    pub registry: ToolRegistry,
}

impl AppState {
    /// Creates the state with every tool registered.
    #[must_use]
    pub fn new(toolbox: State) -> Self {
        Self {
            toolbox,
            registry: ToolRegistry::new(),
        }
    }
}

/// Mounts the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handlers::query_error));
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/tools", web::get().to(handlers::tools))
            .route("/tools/{name}", web::post().to(handlers::call_tool))
            .route("/enums", web::get().to(handlers::enums))
            .route("/enums/{name}/search", web::get().to(handlers::enum_search))
            .route(
                "/enums/{name}/best-match",
                web::get().to(handlers::enum_best_match),
            ),
    );
}

/// Starts the toolbox API server on `host:port`.
///
/// Connects to the database named by the environment, loads the query
/// catalog, and starts the Actix-Web HTTP server. The caller provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// * If the database connection fails
/// * If the query catalog is malformed
/// * If the HTTP server fails to bind or encounters a runtime error
#[allow(clippy::future_not_send)]
pub async fn run_server(host: &str, port: u16) -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to database...");
    let db_conn: Arc<dyn Database> = Arc::from(
        db::connect_from_env()
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?,
    );

    let executor = SqlQueryExecutor::with_default_catalog(db_conn)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!("Loaded {} named queries", executor.catalog().len());

    let state = web::Data::new(AppState::new(State::new(Arc::new(executor))));

    log::info!("Starting server on {host}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
