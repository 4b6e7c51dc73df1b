#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Named-query execution against the Sakila database.
//!
//! Queries are never built at runtime. They live in an embedded
//! `queries.sql` catalog, are addressed by name, and take keyword
//! arguments. [`executor::SqlQueryExecutor`] runs them through
//! `switchy_database` with `query_raw_params()`.

pub mod db;
pub mod executor;
pub mod queries;

use sakila_query_models::{QueryArgs, QueryRow};
use thiserror::Error;

/// Errors that can occur while resolving or running a named query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// No query with this name exists in the catalog.
    #[error("Unknown query: {name}")]
    UnknownQuery {
        /// The requested query name.
        name: String,
    },

    /// The query references a parameter that was not supplied.
    #[error("Query '{query}' is missing argument '{name}'")]
    MissingArgument {
        /// Query name.
        query: String,
        /// Parameter name.
        name: String,
    },

    /// The query catalog text is malformed.
    #[error("Catalog error: {message}")]
    Catalog {
        /// Description of what went wrong.
        message: String,
    },

    /// Could not establish a database connection.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of what went wrong.
        message: String,
    },

    /// A result column came back with a type the row model cannot hold.
    #[error("Unsupported value in column '{column}': {value}")]
    UnsupportedValue {
        /// Column name.
        column: String,
        /// Debug rendering of the database value.
        value: String,
    },

    /// The executor failed for a reason not covered above.
    #[error("Execution error: {message}")]
    Execution {
        /// Description of what went wrong.
        message: String,
    },
}

/// Runs a named, pre-defined query and returns its rows in order.
///
/// Implementations own connection acquisition and release. Callers get
/// either every row or an error, never a partial result.
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes `query_name` with the given keyword arguments.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the query is unknown, an argument is
    /// missing, or the database fails.
    async fn run_query(
        &self,
        query_name: &str,
        args: &QueryArgs,
    ) -> Result<Vec<QueryRow>, QueryError>;
}
