//! Shared invocation context.

use std::sync::Arc;

use sakila_database::QueryExecutor;
use sakila_query_models::{QueryArgs, QueryRow};

use crate::{
    ToolboxError,
    normalize::{ToolArg, normalize},
};

/// Default row cap for [`State::search`].
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Named, not-yet-normalized query arguments.
pub type ToolArgs = Vec<(&'static str, ToolArg)>;

/// Context every tool and enum search runs against.
#[derive(Clone)]
pub struct State {
    executor: Arc<dyn QueryExecutor>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}

impl State {
    /// Creates a state backed by `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Normalizes `args` and runs `query_name` once.
    ///
    /// # Errors
    ///
    /// * If the executor fails
    pub async fn run_query(
        &self,
        query_name: &str,
        args: ToolArgs,
    ) -> Result<Vec<QueryRow>, ToolboxError> {
        let args: QueryArgs = args
            .into_iter()
            .map(|(name, arg)| (name, normalize(arg)))
            .collect();

        log::debug!("run_query {query_name} with {} args", args.len());

        Ok(self.executor.run_query(query_name, &args).await?)
    }

    /// Runs a lookup query with `value` and `limit` arguments.
    ///
    /// With `use_fuzzy_matching` the value is wrapped as `%value%`, so it
    /// matches anywhere in the label. Pattern characters in `value` are not
    /// escaped.
    ///
    /// # Errors
    ///
    /// * If the executor fails
    pub async fn search(
        &self,
        query_name: &str,
        value: &str,
        use_fuzzy_matching: bool,
        limit: u32,
    ) -> Result<Vec<QueryRow>, ToolboxError> {
        let value = if use_fuzzy_matching {
            format!("%{value}%")
        } else {
            value.to_string()
        };

        log::info!("search {query_name}, {value}, limit {limit}");

        self.run_query(
            query_name,
            vec![("value", value.into()), ("limit", i64::from(limit).into())],
        )
        .await
    }
}
