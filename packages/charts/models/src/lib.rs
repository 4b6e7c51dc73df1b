#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart payload types.
//!
//! The renderer understands exactly three chart families, so
//! [`ChartPayload`] is a closed union over them: categorical grouping
//! ([`GroupedChart`]), pivoted multi-series ([`SeriesChart`]) and
//! choropleth ([`AreaMapChart`]). Field names serialize in camelCase to
//! match what the renderer reads.

use sakila_query_models::QueryValue;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One projected row: the row's values in column-descriptor order.
pub type ChartRow = Vec<QueryValue>;

/// A `(column_key, display_title)` pair.
///
/// Serializes as a two-element array, e.g. `["film_count", "Number of Films"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ColumnDescriptor {
    /// Row key to look up.
    pub key: String,
    /// Caller-facing label.
    pub title: String,
}

impl ColumnDescriptor {
    /// Creates a column descriptor.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

impl From<(String, String)> for ColumnDescriptor {
    fn from((key, title): (String, String)) -> Self {
        Self { key, title }
    }
}

impl From<ColumnDescriptor> for (String, String) {
    fn from(col: ColumnDescriptor) -> Self {
        (col.key, col.title)
    }
}

/// Discriminator values the renderer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
pub enum ChartKind {
    /// Categorical grouping; lives at `info.type`.
    #[serde(rename = "group")]
    #[strum(serialize = "group")]
    Group,
    /// Multi-series chart; lives at top-level `type`.
    Series,
    /// Choropleth map; lives at top-level `type`.
    AreaMap,
}

/// Rendering style for grouped and series charts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChartType {
    /// Vertical bars.
    #[default]
    Bar,
    /// Horizontal bars.
    Hbar,
    /// Line chart.
    Line,
    /// Pie chart.
    Pie,
}

/// Base map for an area map.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MapType {
    /// United States, by state.
    #[default]
    Usa,
    /// World, by country.
    World,
}

/// Column descriptors plus projected rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Column descriptors.
    pub cols: Vec<ColumnDescriptor>,
    /// Projected rows, one per input row.
    pub rows: Vec<ChartRow>,
}

/// Descriptive block of a grouped chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    /// Always [`ChartKind::Group`].
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Rendering style.
    pub chart_type: ChartType,
    /// Chart title.
    pub title: String,
    /// Unit label for values.
    pub unit: String,
    /// Category axis column key.
    pub key_name: String,
    /// Value column key.
    pub val_name: String,
    /// Click handlers. Reserved; always empty.
    pub on_click: Vec<serde_json::Value>,
}

/// Categorical chart (bar, hbar, pie).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedChart {
    /// Descriptive block.
    pub info: GroupInfo,
    /// Columns and rows.
    pub data: ChartData,
}

/// Tells the renderer to split rows into one series per distinct value of
/// `key_name`, plotting `val_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pivot {
    /// Series column key.
    pub key_name: String,
    /// Value column key.
    pub val_name: String,
}

/// Multi-series chart pivoted by a series column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChart {
    /// Always [`ChartKind::Series`].
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Rendering style.
    pub chart_type: ChartType,
    /// Chart title.
    pub title: String,
    /// Unit label for values.
    pub unit: String,
    /// X axis title.
    pub x_col_title: String,
    /// Y axis title.
    pub y_col_title: String,
    /// Series (pivot) column key.
    pub series_col: String,
    /// X axis column key.
    pub x_col: String,
    /// Value column keys.
    pub val_cols: Vec<String>,
    /// Pivot instruction.
    pub pivot: Pivot,
    /// Column descriptors.
    pub cols: Vec<ColumnDescriptor>,
    /// Projected rows.
    pub rows: Vec<ChartRow>,
    /// Click handlers. Reserved; always empty.
    pub on_click: Vec<serde_json::Value>,
}

/// One region on an area map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaItem {
    /// Region name.
    pub name: QueryValue,
    /// Region value.
    pub value: QueryValue,
}

/// Choropleth map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaMapChart {
    /// Always [`ChartKind::AreaMap`].
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Base map.
    pub map_id: MapType,
    /// One item per input row.
    pub items: Vec<AreaItem>,
}

/// Any chart a tool can return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPayload {
    /// Categorical chart.
    Grouped(GroupedChart),
    /// Multi-series chart.
    Series(SeriesChart),
    /// Area map.
    AreaMap(AreaMapChart),
}

impl ChartPayload {
    /// The discriminator of the wrapped chart.
    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        match self {
            Self::Grouped(chart) => chart.info.kind,
            Self::Series(chart) => chart.kind,
            Self::AreaMap(chart) => chart.kind,
        }
    }

    /// Number of data rows (area map items count as rows).
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Grouped(chart) => chart.data.rows.len(),
            Self::Series(chart) => chart.rows.len(),
            Self::AreaMap(chart) => chart.items.len(),
        }
    }
}

impl From<GroupedChart> for ChartPayload {
    fn from(chart: GroupedChart) -> Self {
        Self::Grouped(chart)
    }
}

impl From<SeriesChart> for ChartPayload {
    fn from(chart: SeriesChart) -> Self {
        Self::Series(chart)
    }
}

impl From<AreaMapChart> for ChartPayload {
    fn from(chart: AreaMapChart) -> Self {
        Self::AreaMap(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_descriptor_serializes_as_pair() {
        let col = ColumnDescriptor::new("film_count", "Number of Films");
        assert_eq!(
            serde_json::to_value(&col).unwrap(),
            serde_json::json!(["film_count", "Number of Films"])
        );

        let back: ColumnDescriptor =
            serde_json::from_value(serde_json::json!(["films", "Films"])).unwrap();
        assert_eq!(back, ColumnDescriptor::new("films", "Films"));
    }

    #[test]
    fn discriminators_render_as_renderer_expects() {
        assert_eq!(
            serde_json::to_value(ChartKind::Group).unwrap(),
            serde_json::json!("group")
        );
        assert_eq!(
            serde_json::to_value(ChartKind::AreaMap).unwrap(),
            serde_json::json!("AreaMap")
        );
        assert_eq!(ChartKind::Series.to_string(), "Series");
    }

    #[test]
    fn chart_and_map_types_are_lowercase() {
        assert_eq!(ChartType::Hbar.to_string(), "hbar");
        assert_eq!("pie".parse::<ChartType>().unwrap(), ChartType::Pie);
        assert_eq!(
            serde_json::to_value(MapType::World).unwrap(),
            serde_json::json!("world")
        );
    }

    #[test]
    fn area_map_payload_has_no_extra_fields() {
        let payload = ChartPayload::from(AreaMapChart {
            kind: ChartKind::AreaMap,
            map_id: MapType::Usa,
            items: vec![],
        });

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "type": "AreaMap", "mapId": "usa", "items": [] })
        );
        assert_eq!(payload.kind(), ChartKind::AreaMap);
    }
}
