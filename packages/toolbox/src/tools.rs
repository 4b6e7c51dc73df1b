//! The seven analytical tools.
//!
//! Each tool normalizes its arguments, runs exactly one named query and
//! hands the rows to a chart assembler. None of them reads or writes
//! anything besides that query.

use sakila_charts::{create_area_map, create_group_chart, create_series_chart};
use sakila_charts_models::{ChartPayload, ChartType, ColumnDescriptor, MapType};
use sakila_toolbox_models::{
    ActorWithMostFilmsParams, DailyRentalTrendsParams, FilmCategoryDistributionParams,
    FilmLengthDistributionParams, MonthlyRentalRevenueParams, RevenueByCountryParams,
    TopCustomersParams,
};

use crate::{ToolboxError, state::State};

fn col(key: &str, title: &str) -> ColumnDescriptor {
    ColumnDescriptor::new(key, title)
}

/// Actors ranked by number of film appearances.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn actor_with_most_films(
    state: &State,
    params: &ActorWithMostFilmsParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "actor_with_most_films",
            vec![
                ("start_year", params.start_year.into()),
                ("end_year", params.end_year.into()),
                ("min_length", params.min_length.into()),
                ("max_length", params.max_length.into()),
                ("category", params.category.clone().into()),
            ],
        )
        .await?;

    Ok(create_group_chart(
        "Actor with most films",
        [col("actor_name", "Actor Name"), col("films", "Number of Films")],
        &rows,
        "",
        ChartType::Bar,
    )
    .into())
}

/// Monthly revenue, one series per film category.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn monthly_rental_revenue(
    state: &State,
    params: &MonthlyRentalRevenueParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "monthly_rental_revenue",
            vec![
                ("start_date", params.start_date.into()),
                ("end_date", params.end_date.into()),
                ("store", params.store.clone().into()),
            ],
        )
        .await?;

    Ok(create_series_chart(
        "Monthly Rental Revenue",
        [
            col("p_date", "Month"),
            col("category_name", "Category"),
            col("total_revenue", "Revenue ($)"),
        ],
        &rows,
        ChartType::Bar,
    )
    .into())
}

/// Film counts per category.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn film_category_distribution(
    state: &State,
    params: &FilmCategoryDistributionParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "film_category_distribution",
            vec![
                ("start_year", params.start_year.into()),
                ("end_year", params.end_year.into()),
                ("min_rental_rate", params.min_rental_rate.into()),
                ("max_rental_rate", params.max_rental_rate.into()),
            ],
        )
        .await?;

    Ok(create_group_chart(
        "Film Category Distribution",
        [
            col("category_name", "Category"),
            col("film_count", "Number of Films"),
        ],
        &rows,
        "",
        ChartType::Pie,
    )
    .into())
}

/// Revenue per customer country on a world map.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn revenue_by_country(
    state: &State,
    params: &RevenueByCountryParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "revenue_by_country",
            vec![
                ("start_date", params.start_date.into()),
                ("end_date", params.end_date.into()),
                ("store", params.store.clone().into()),
            ],
        )
        .await?;

    Ok(create_area_map(
        "Revenue by Country",
        [
            col("country_name", "Country"),
            col("total_revenue", "Revenue ($)"),
        ],
        &rows,
        MapType::World,
    )
    .into())
}

/// Daily rentals, one series per film category.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn daily_rental_trends_by_category(
    state: &State,
    params: &DailyRentalTrendsParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "daily_rental_trends_by_category",
            vec![
                ("start_date", params.start_date.into()),
                ("end_date", params.end_date.into()),
                ("store", params.store.clone().into()),
                ("category", params.category.clone().into()),
            ],
        )
        .await?;

    Ok(create_series_chart(
        "Daily Rental Trends by Category",
        [
            col("rental_date", "Date"),
            col("category_name", "Category"),
            col("rental_count", "Rentals"),
        ],
        &rows,
        ChartType::Line,
    )
    .into())
}

/// Customers ranked by rental count.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn top_customers_by_rentals(
    state: &State,
    params: &TopCustomersParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "top_customers_by_rentals",
            vec![
                ("start_date", params.start_date.into()),
                ("end_date", params.end_date.into()),
                ("store", params.store.clone().into()),
                ("min_length", params.min_length.into()),
                ("max_length", params.max_length.into()),
                ("active_only", params.active_only.into()),
            ],
        )
        .await?;

    Ok(create_group_chart(
        "Top Customers by Rentals",
        [
            col("customer_name", "Customer Name"),
            col("rental_count", "Number of Rentals"),
        ],
        &rows,
        "",
        ChartType::Bar,
    )
    .into())
}

/// Average film length per category.
///
/// # Errors
///
/// Returns [`ToolboxError`] if the query fails.
pub async fn film_length_distribution_by_category(
    state: &State,
    params: &FilmLengthDistributionParams,
) -> Result<ChartPayload, ToolboxError> {
    let rows = state
        .run_query(
            "film_length_distribution_by_category",
            vec![
                ("start_year", params.start_year.into()),
                ("end_year", params.end_year.into()),
            ],
        )
        .await?;

    Ok(create_group_chart(
        "Film Length Distribution by Category",
        [
            col("category_name", "Category"),
            col("avg_length_minutes", "Average Length (minutes)"),
        ],
        &rows,
        "",
        ChartType::Hbar,
    )
    .into())
}
