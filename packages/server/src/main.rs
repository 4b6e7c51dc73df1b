#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Serves the Sakila chart tools over HTTP.
//!
//! ```text
//! sakila_server [--host 127.0.0.1] [--port 8886]
//! ```
//!
//! The database is configured through `POSTGRES_*` variables or
//! `DATABASE_URL`.

use clap::Parser;

#[derive(Parser)]
#[command(name = "sakila_server", about = "Serve the Sakila chart tools over HTTP")]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to listen on
    #[arg(long, default_value_t = 8886)]
    port: u16,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    sakila_server::run_server(&cli.host, cli.port).await
}
