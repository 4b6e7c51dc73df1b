#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart assemblers.
//!
//! Pure functions that turn `(title, column descriptors, rows)` into one of
//! the three [`ChartPayload`](sakila_charts_models::ChartPayload) shapes.
//! Column arity is fixed by the argument types: grouped charts and area
//! maps take two columns, series charts take three.

use sakila_charts_models::{
    AreaItem, AreaMapChart, ChartData, ChartKind, ChartRow, ChartType, ColumnDescriptor,
    GroupInfo, GroupedChart, MapType, Pivot, SeriesChart,
};
use sakila_query_models::{QueryRow, QueryValue};

/// Unit label used by every series chart.
pub const SERIES_UNIT: &str = "#";

/// Projects each row onto the column keys, in column order.
///
/// A key the row does not contain yields [`QueryValue::Null`].
#[must_use]
pub fn project_rows(cols: &[ColumnDescriptor], rows: &[QueryRow]) -> Vec<ChartRow> {
    rows.iter()
        .map(|row| {
            cols.iter()
                .map(|col| row.get(&col.key).cloned().unwrap_or(QueryValue::Null))
                .collect()
        })
        .collect()
}

/// Builds a categorical chart. `cols[0]` is the category axis, `cols[1]`
/// the value.
#[must_use]
pub fn create_group_chart(
    title: &str,
    cols: [ColumnDescriptor; 2],
    rows: &[QueryRow],
    unit: &str,
    chart_type: ChartType,
) -> GroupedChart {
    let row_lists = project_rows(&cols, rows);
    let [key, val] = &cols;

    GroupedChart {
        info: GroupInfo {
            kind: ChartKind::Group,
            chart_type,
            title: title.to_string(),
            unit: unit.to_string(),
            key_name: key.key.clone(),
            val_name: val.key.clone(),
            on_click: Vec::new(),
        },
        data: ChartData {
            cols: cols.to_vec(),
            rows: row_lists,
        },
    }
}

/// Builds a multi-series chart from `[x, series, value]` columns.
///
/// The renderer groups rows by the series column and plots one series per
/// distinct value.
#[must_use]
pub fn create_series_chart(
    title: &str,
    cols: [ColumnDescriptor; 3],
    rows: &[QueryRow],
    chart_type: ChartType,
) -> SeriesChart {
    let row_lists = project_rows(&cols, rows);
    let [x, series, y] = &cols;

    SeriesChart {
        kind: ChartKind::Series,
        chart_type,
        title: title.to_string(),
        unit: SERIES_UNIT.to_string(),
        x_col_title: x.title.clone(),
        y_col_title: y.title.clone(),
        series_col: series.key.clone(),
        x_col: x.key.clone(),
        val_cols: vec![y.key.clone()],
        pivot: Pivot {
            key_name: series.key.clone(),
            val_name: y.key.clone(),
        },
        cols: cols.to_vec(),
        rows: row_lists,
        on_click: Vec::new(),
    }
}

/// Turns projected `[name, value]` rows into area map items.
#[must_use]
pub fn to_area(rows: Vec<ChartRow>) -> Vec<AreaItem> {
    rows.into_iter()
        .map(|row| {
            let mut values = row.into_iter();
            AreaItem {
                name: values.next().unwrap_or(QueryValue::Null),
                value: values.next().unwrap_or(QueryValue::Null),
            }
        })
        .collect()
}

/// Builds an area map from `[region, value]` columns.
///
/// The renderer titles area maps itself, so `_title` is accepted for a
/// uniform assembler signature but not emitted.
#[must_use]
pub fn create_area_map(
    _title: &str,
    cols: [ColumnDescriptor; 2],
    rows: &[QueryRow],
    map_type: MapType,
) -> AreaMapChart {
    AreaMapChart {
        kind: ChartKind::AreaMap,
        map_id: map_type,
        items: to_area(project_rows(&cols, rows)),
    }
}

#[cfg(test)]
mod tests {
    use sakila_charts_models::ChartPayload;

    use super::*;

    fn row(values: &[(&str, QueryValue)]) -> QueryRow {
        values.iter().cloned().collect()
    }

    fn category_rows() -> Vec<QueryRow> {
        vec![
            row(&[
                ("category_name", "Action".into()),
                ("film_count", 10.into()),
            ]),
            row(&[
                ("category_name", "Comedy".into()),
                ("film_count", 7.into()),
            ]),
        ]
    }

    fn category_cols() -> [ColumnDescriptor; 2] {
        [
            ColumnDescriptor::new("category_name", "Category"),
            ColumnDescriptor::new("film_count", "Number of Films"),
        ]
    }

    #[test]
    fn projection_keeps_row_count_and_column_order() {
        let cols = [
            ColumnDescriptor::new("film_count", "Films"),
            ColumnDescriptor::new("category_name", "Category"),
        ];
        let projected = project_rows(&cols, &category_rows());

        assert_eq!(projected.len(), 2);
        assert!(projected.iter().all(|r| r.len() == cols.len()));
        assert_eq!(projected[0], vec![QueryValue::Int(10), "Action".into()]);
    }

    #[test]
    fn projection_marks_missing_keys_as_null() {
        let rows = vec![row(&[("category_name", "Horror".into())])];
        let projected = project_rows(&category_cols(), &rows);

        assert_eq!(projected, vec![vec!["Horror".into(), QueryValue::Null]]);
    }

    #[test]
    fn group_chart_shape() {
        let chart = create_group_chart(
            "Film Category Distribution",
            category_cols(),
            &category_rows(),
            "",
            ChartType::Pie,
        );

        assert_eq!(
            serde_json::to_value(ChartPayload::from(chart)).unwrap(),
            serde_json::json!({
                "info": {
                    "type": "group",
                    "chartType": "pie",
                    "title": "Film Category Distribution",
                    "unit": "",
                    "keyName": "category_name",
                    "valName": "film_count",
                    "onClick": []
                },
                "data": {
                    "cols": [["category_name", "Category"], ["film_count", "Number of Films"]],
                    "rows": [["Action", 10], ["Comedy", 7]]
                }
            })
        );
    }

    #[test]
    fn series_chart_pivots_on_series_column() {
        let cols = [
            ColumnDescriptor::new("rental_date", "Date"),
            ColumnDescriptor::new("category_name", "Category"),
            ColumnDescriptor::new("rental_count", "Rentals"),
        ];
        let rows = vec![row(&[
            ("rental_date", "2005-05-24".into()),
            ("category_name", "Action".into()),
            ("rental_count", 3.into()),
        ])];

        let chart = create_series_chart("Daily", cols, &rows, ChartType::Line);

        assert_eq!(chart.kind, ChartKind::Series);
        assert_eq!(chart.pivot.key_name, chart.series_col);
        assert_eq!(chart.pivot.val_name, chart.val_cols[0]);
        assert_eq!(chart.x_col, "rental_date");
        assert_eq!(chart.x_col_title, "Date");
        assert_eq!(chart.y_col_title, "Rentals");
        assert_eq!(chart.unit, SERIES_UNIT);
        assert_eq!(
            chart.rows,
            vec![vec!["2005-05-24".into(), "Action".into(), QueryValue::Int(3)]]
        );
    }

    #[test]
    fn series_chart_with_no_rows_keeps_descriptive_fields() {
        let cols = [
            ColumnDescriptor::new("p_date", "Month"),
            ColumnDescriptor::new("category_name", "Category"),
            ColumnDescriptor::new("total_revenue", "Revenue ($)"),
        ];
        let chart = create_series_chart("Monthly Rental Revenue", cols, &[], ChartType::Bar);

        assert!(chart.rows.is_empty());
        assert_eq!(chart.title, "Monthly Rental Revenue");
        assert_eq!(chart.pivot.key_name, "category_name");
        assert_eq!(chart.pivot.val_name, "total_revenue");
        assert_eq!(chart.cols.len(), 3);
    }

    #[test]
    fn area_map_items_follow_rows() {
        let cols = [
            ColumnDescriptor::new("country_name", "Country"),
            ColumnDescriptor::new("total_revenue", "Revenue ($)"),
        ];
        let rows = vec![
            row(&[
                ("country_name", "USA".into()),
                ("total_revenue", 120.5.into()),
            ]),
            row(&[("total_revenue", 3.0.into())]),
        ];

        let chart = create_area_map("Revenue by Country", cols, &rows, MapType::World);

        assert_eq!(chart.items.len(), rows.len());
        assert_eq!(
            serde_json::to_value(&chart).unwrap(),
            serde_json::json!({
                "type": "AreaMap",
                "mapId": "world",
                "items": [
                    { "name": "USA", "value": 120.5 },
                    { "name": null, "value": 3.0 }
                ]
            })
        );
    }

    #[test]
    fn to_area_pads_short_rows() {
        let items = to_area(vec![vec![], vec!["Canada".into()]]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, QueryValue::Null);
        assert_eq!(items[1].name, QueryValue::from("Canada"));
        assert_eq!(items[1].value, QueryValue::Null);
    }
}
