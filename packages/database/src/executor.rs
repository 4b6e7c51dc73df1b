//! [`QueryExecutor`] backed by a `switchy_database` connection.

use std::sync::Arc;

use sakila_query_models::{QueryArgs, QueryRow, QueryValue};
use switchy_database::{Database, DatabaseValue, Row};

use crate::queries::QueryCatalog;
use crate::{QueryError, QueryExecutor};

/// Runs catalog queries with `query_raw_params()`.
pub struct SqlQueryExecutor {
    db: Arc<dyn Database>,
    catalog: QueryCatalog,
}

impl SqlQueryExecutor {
    /// Creates an executor over an explicit catalog.
    #[must_use]
    pub fn new(db: Arc<dyn Database>, catalog: QueryCatalog) -> Self {
        Self { db, catalog }
    }

    /// Creates an executor over the embedded default catalog.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Catalog`] if the embedded catalog is malformed.
    pub fn with_default_catalog(db: Arc<dyn Database>) -> Result<Self, QueryError> {
        Ok(Self::new(db, QueryCatalog::load_default()?))
    }

    /// The catalog this executor resolves names against.
    #[must_use]
    pub const fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }
}

#[async_trait::async_trait]
impl QueryExecutor for SqlQueryExecutor {
    async fn run_query(
        &self,
        query_name: &str,
        args: &QueryArgs,
    ) -> Result<Vec<QueryRow>, QueryError> {
        let query = self.catalog.get(query_name)?;
        let params = query.bind(args)?;

        log::debug!("run_query {query_name} ({} params)", params.len());

        let rows = self.db.query_raw_params(&query.sql, &params).await?;

        rows.into_iter().map(to_query_row).collect()
    }
}

fn to_query_row(row: Row) -> Result<QueryRow, QueryError> {
    row.columns
        .into_iter()
        .map(|(name, value)| {
            let value = from_database_value(&name, value)?;
            Ok((name, value))
        })
        .collect()
}

/// The catalog casts every output column to `bigint`, `float8`, `text` or
/// `boolean`, so only those shapes are expected back.
fn from_database_value(column: &str, value: DatabaseValue) -> Result<QueryValue, QueryError> {
    Ok(match value {
        DatabaseValue::Null => QueryValue::Null,
        DatabaseValue::Bool(v) => QueryValue::Bool(v),
        DatabaseValue::Int32(v) => QueryValue::Int(i64::from(v)),
        DatabaseValue::Int64(v) => QueryValue::Int(v),
        DatabaseValue::Real64(v) => QueryValue::Real(v),
        DatabaseValue::String(v) => QueryValue::String(v),
        DatabaseValue::DateTime(v) => QueryValue::DateTime(v),
        #[allow(unreachable_patterns)]
        other => return Err(unsupported(column, &other)),
    })
}

fn unsupported(column: &str, value: &impl std::fmt::Debug) -> QueryError {
    log::error!("Unsupported value type in column '{column}': {value:?}");
    QueryError::UnsupportedValue {
        column: column.to_string(),
        value: format!("{value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn row_keeps_column_order_and_maps_values() {
        let row = Row {
            columns: vec![
                ("b".to_string(), DatabaseValue::Int32(3)),
                ("a".to_string(), DatabaseValue::Real64(1.5)),
                ("c".to_string(), DatabaseValue::Null),
                ("d".to_string(), DatabaseValue::String("Drama".to_string())),
                ("e".to_string(), DatabaseValue::Int64(16_044)),
                ("f".to_string(), DatabaseValue::Bool(true)),
            ],
        };

        let row = to_query_row(row).unwrap();

        assert_eq!(row.column_names().collect::<Vec<_>>(), ["b", "a", "c", "d", "e", "f"]);
        assert_eq!(row.get("b"), Some(&QueryValue::Int(3)));
        assert_eq!(row.get("a"), Some(&QueryValue::Real(1.5)));
        assert_eq!(row.get("c"), Some(&QueryValue::Null));
        assert_eq!(row.get("d"), Some(&QueryValue::String("Drama".to_string())));
        assert_eq!(row.get("e"), Some(&QueryValue::Int(16_044)));
        assert_eq!(row.get("f"), Some(&QueryValue::Bool(true)));
    }

    #[test]
    fn datetime_passes_through() {
        let at = NaiveDate::from_ymd_opt(2005, 5, 24)
            .unwrap()
            .and_hms_opt(22, 53, 30)
            .unwrap();

        let value = from_database_value("rental_date", DatabaseValue::DateTime(at)).unwrap();

        assert_eq!(value, QueryValue::DateTime(at));
    }

    #[test]
    fn unsupported_value_names_the_column() {
        let err = unsupported("payment_id", &[0_u8, 1]);

        assert!(matches!(
            &err,
            QueryError::UnsupportedValue { column, value }
                if column == "payment_id" && value == "[0, 1]"
        ));
        assert_eq!(err.to_string(), "Unsupported value in column 'payment_id': [0, 1]");
    }
}
