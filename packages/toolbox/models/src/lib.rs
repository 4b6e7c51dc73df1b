#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tool parameter types and tool/enum definitions for the Sakila toolbox.
//!
//! Defines the typed arguments for each analytical tool, the enum
//! references those arguments may carry, and the JSON descriptions the
//! transport layer publishes so callers can discover tools, their
//! defaults, and which arguments are searchable enums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Namespace the toolbox registers under.
pub const NAMESPACE: &str = "gd-sakila";

/// Caller-facing toolbox title.
pub const TOOLBOX_TITLE: &str = "Sakila Explorer";

/// Enumerations a tool argument may reference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EnumName {
    /// Film category (dynamic).
    Category,
    /// Store (dynamic).
    Store,
    /// Yes/No (static).
    YesNo,
}

impl EnumName {
    /// Every enum, in definition order.
    pub const ALL: &[Self] = &[Self::Category, Self::Store, Self::YesNo];

    /// Whether members are discovered by searching the database.
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        !matches!(self, Self::YesNo)
    }

    /// The lookup query backing a dynamic enum.
    #[must_use]
    pub const fn query_name(self) -> Option<&'static str> {
        match self {
            Self::Category => Some("category_enum"),
            Self::Store => Some("store_enum"),
            Self::YesNo => None,
        }
    }
}

/// A reference to one member of a dynamic enum.
///
/// Accepted on the wire as an integer key, a numeric string, or an object
/// `{ "key": ..., "label": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DynEnumRepr")]
pub struct DynEnumRef {
    /// Integer identifier of the member.
    pub key: i64,
    /// Display label, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DynEnumRef {
    /// Creates a reference from a key alone.
    #[must_use]
    pub const fn new(key: i64) -> Self {
        Self { key, label: None }
    }

    /// Creates a reference with a display label.
    #[must_use]
    pub fn with_label(key: i64, label: impl Into<String>) -> Self {
        Self {
            key,
            label: Some(label.into()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Int(i64),
    Text(String),
}

impl KeyRepr {
    fn parse(self) -> Result<i64, String> {
        match self {
            Self::Int(key) => Ok(key),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("enum key '{text}' is not an integer")),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DynEnumRepr {
    Key(KeyRepr),
    Full {
        key: KeyRepr,
        #[serde(default)]
        label: Option<String>,
    },
}

impl TryFrom<DynEnumRepr> for DynEnumRef {
    type Error = String;

    fn try_from(repr: DynEnumRepr) -> Result<Self, Self::Error> {
        match repr {
            DynEnumRepr::Key(key) => Ok(Self::new(key.parse()?)),
            DynEnumRepr::Full { key, label } => Ok(Self {
                key: key.parse()?,
                label,
            }),
        }
    }
}

/// Yes or No options for filters.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum YesNo {
    /// Yes.
    #[default]
    #[serde(alias = "yes", alias = "YES")]
    Yes,
    /// No.
    #[serde(alias = "no", alias = "NO")]
    No,
}

impl YesNo {
    /// Both members, in definition order.
    pub const ALL: &[Self] = &[Self::Yes, Self::No];

    /// The literal bound into queries.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

/// Parameters for "Actor with most films".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorWithMostFilmsParams {
    /// Starting release year.
    pub start_year: i64,
    /// Ending release year.
    pub end_year: i64,
    /// Minimum film length in minutes.
    pub min_length: i64,
    /// Maximum film length in minutes.
    pub max_length: i64,
    /// Optional film category filter.
    #[serde(default)]
    pub category: Option<DynEnumRef>,
}

/// Parameters for "Monthly rental revenue".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRentalRevenueParams {
    /// Start date for analysis.
    pub start_date: NaiveDate,
    /// End date for analysis (inclusive).
    pub end_date: NaiveDate,
    /// Optional store filter.
    #[serde(default)]
    pub store: Option<DynEnumRef>,
}

/// Parameters for "Film category distribution".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmCategoryDistributionParams {
    /// Starting release year.
    pub start_year: i64,
    /// Ending release year.
    pub end_year: i64,
    /// Minimum rental rate.
    pub min_rental_rate: f64,
    /// Maximum rental rate.
    pub max_rental_rate: f64,
}

/// Parameters for "Revenue by country".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueByCountryParams {
    /// Start date for analysis.
    pub start_date: NaiveDate,
    /// End date for analysis (inclusive).
    pub end_date: NaiveDate,
    /// Optional store filter.
    #[serde(default)]
    pub store: Option<DynEnumRef>,
}

/// Parameters for "Daily rental trends by category".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRentalTrendsParams {
    /// Start date for analysis.
    pub start_date: NaiveDate,
    /// End date for analysis (inclusive).
    pub end_date: NaiveDate,
    /// Optional store filter.
    #[serde(default)]
    pub store: Option<DynEnumRef>,
    /// Optional film category filter.
    #[serde(default)]
    pub category: Option<DynEnumRef>,
}

/// Parameters for "Top customers by rentals".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopCustomersParams {
    /// Start date for analysis.
    pub start_date: NaiveDate,
    /// End date for analysis (inclusive).
    pub end_date: NaiveDate,
    /// Optional store filter.
    #[serde(default)]
    pub store: Option<DynEnumRef>,
    /// Minimum film length in minutes.
    pub min_length: i64,
    /// Maximum film length in minutes.
    pub max_length: i64,
    /// Only count active customers.
    #[serde(default)]
    pub active_only: YesNo,
}

/// Parameters for "Film length distribution by category".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmLengthDistributionParams {
    /// Starting release year.
    pub start_year: i64,
    /// Ending release year.
    pub end_year: i64,
}

/// Enumeration of all tools the toolbox exposes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    /// Actors ranked by film appearances.
    ActorWithMostFilms,
    /// Revenue per month, split by category.
    MonthlyRentalRevenue,
    /// Film counts per category.
    FilmCategoryDistribution,
    /// Revenue per customer country.
    RevenueByCountry,
    /// Rentals per day, split by category.
    DailyRentalTrendsByCategory,
    /// Customers ranked by rental count.
    TopCustomersByRentals,
    /// Average film length per category.
    FilmLengthDistributionByCategory,
}

impl ToolName {
    /// Every tool, in registration order.
    pub const ALL: &[Self] = &[
        Self::ActorWithMostFilms,
        Self::MonthlyRentalRevenue,
        Self::FilmCategoryDistribution,
        Self::RevenueByCountry,
        Self::DailyRentalTrendsByCategory,
        Self::TopCustomersByRentals,
        Self::FilmLengthDistributionByCategory,
    ];

    /// Caller-facing tool name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ActorWithMostFilms => "Actor with most films",
            Self::MonthlyRentalRevenue => "Monthly rental revenue",
            Self::FilmCategoryDistribution => "Film category distribution",
            Self::RevenueByCountry => "Revenue by country",
            Self::DailyRentalTrendsByCategory => "Daily rental trends by category",
            Self::TopCustomersByRentals => "Top customers by rentals",
            Self::FilmLengthDistributionByCategory => "Film length distribution by category",
        }
    }

    /// Example prompts that should route to this tool.
    #[must_use]
    pub const fn examples(self) -> &'static [&'static str] {
        match self {
            Self::ActorWithMostFilms => &[
                "Show me actors with most films",
                "Top actors by film count",
                "Which actors appeared in most movies",
            ],
            Self::MonthlyRentalRevenue => &[
                "Show monthly rental revenue trends",
                "Revenue by month",
                "Monthly income analysis",
            ],
            Self::FilmCategoryDistribution => &[
                "Show film categories breakdown",
                "Category distribution",
                "Films by genre",
            ],
            Self::RevenueByCountry => &[
                "Show revenue by country",
                "Country revenue analysis",
                "Geographic revenue distribution",
            ],
            Self::DailyRentalTrendsByCategory => &[
                "Show daily rental trends",
                "Rental patterns by category",
                "Daily category performance",
            ],
            Self::TopCustomersByRentals => &[
                "Show top customers",
                "Best customers by rental count",
                "Customer rental analysis",
            ],
            Self::FilmLengthDistributionByCategory => &[
                "Show film length by category",
                "Average movie duration by genre",
                "Category length analysis",
            ],
        }
    }

    /// Arguments that reference a dynamic enum, with the enum they reference.
    #[must_use]
    pub const fn dynamic_enum_arguments(self) -> &'static [(&'static str, EnumName)] {
        match self {
            Self::ActorWithMostFilms => &[("category", EnumName::Category)],
            Self::MonthlyRentalRevenue | Self::RevenueByCountry | Self::TopCustomersByRentals => {
                &[("store", EnumName::Store)]
            }
            Self::DailyRentalTrendsByCategory => &[
                ("store", EnumName::Store),
                ("category", EnumName::Category),
            ],
            Self::FilmCategoryDistribution | Self::FilmLengthDistributionByCategory => &[],
        }
    }

    /// Looks a tool up by identifier (`actor_with_most_films`) or by title
    /// (`Actor with most films`, case-insensitive).
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        name.parse::<Self>().ok().or_else(|| {
            Self::ALL
                .iter()
                .copied()
                .find(|tool| tool.title().eq_ignore_ascii_case(name.trim()))
        })
    }
}

fn integer_property(description: &str, default: i64) -> serde_json::Value {
    serde_json::json!({ "type": "integer", "description": description, "default": default })
}

fn date_property(description: &str) -> serde_json::Value {
    serde_json::json!({ "type": "string", "format": "date", "description": description })
}

fn dynamic_enum_property(name: EnumName, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": ["integer", "string", "object", "null"],
        "dynamicEnum": name.as_ref(),
        "description": description
    })
}

fn tool_definition(
    tool: ToolName,
    description: &str,
    properties: &serde_json::Value,
    required: &[&str],
) -> serde_json::Value {
    serde_json::json!({
        "name": tool.as_ref(),
        "title": tool.title(),
        "description": description,
        "examples": tool.examples(),
        "parameters": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}

/// Returns the descriptions of all available tools.
///
/// Schema `default` entries are applied by the transport when a caller
/// omits the argument.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn tool_definitions() -> Vec<serde_json::Value> {
    vec![
        tool_definition(
            ToolName::ActorWithMostFilms,
            "Finds actors who have appeared in the most films within the given release years and film lengths. Result: a bar chart of actors by number of film appearances.",
            &serde_json::json!({
                "start_year": integer_property("Starting release year for films", 2000),
                "end_year": integer_property("Ending release year for films", 2010),
                "min_length": integer_property("Minimum film length in minutes", 60),
                "max_length": integer_property("Maximum film length in minutes", 200),
                "category": dynamic_enum_property(EnumName::Category, "Optional film category filter (e.g. 'Action', 'Comedy')")
            }),
            &["start_year", "end_year", "min_length", "max_length"],
        ),
        tool_definition(
            ToolName::MonthlyRentalRevenue,
            "Shows monthly rental revenue over time, split by film category. Result: a bar chart with one series per category.",
            &serde_json::json!({
                "start_date": date_property("Start date for analysis"),
                "end_date": date_property("End date for analysis"),
                "store": dynamic_enum_property(EnumName::Store, "Optional store filter. Default is all stores")
            }),
            &["start_date", "end_date"],
        ),
        tool_definition(
            ToolName::FilmCategoryDistribution,
            "Shows the distribution of films across categories. Result: a pie chart of films by category.",
            &serde_json::json!({
                "start_year": integer_property("Starting release year", 2000),
                "end_year": integer_property("Ending release year", 2010),
                "min_rental_rate": { "type": "number", "description": "Minimum rental rate", "default": 0.0 },
                "max_rental_rate": { "type": "number", "description": "Maximum rental rate", "default": 10.0 }
            }),
            &["start_year", "end_year", "min_rental_rate", "max_rental_rate"],
        ),
        tool_definition(
            ToolName::RevenueByCountry,
            "Shows total revenue generated by customer country. Result: a world area map of revenue.",
            &serde_json::json!({
                "start_date": date_property("Start date for analysis"),
                "end_date": date_property("End date for analysis"),
                "store": dynamic_enum_property(EnumName::Store, "Optional store filter. Default is all stores")
            }),
            &["start_date", "end_date"],
        ),
        tool_definition(
            ToolName::DailyRentalTrendsByCategory,
            "Shows daily rental counts broken down by film category. Result: a line chart with one series per category.",
            &serde_json::json!({
                "start_date": date_property("Start date for analysis"),
                "end_date": date_property("End date for analysis"),
                "store": dynamic_enum_property(EnumName::Store, "Optional store filter. Default is all stores"),
                "category": dynamic_enum_property(EnumName::Category, "Optional film category filter (e.g. 'Action', 'Comedy')")
            }),
            &["start_date", "end_date"],
        ),
        tool_definition(
            ToolName::TopCustomersByRentals,
            "Shows customers with the highest rental counts. Result: a bar chart of customers by number of rentals.",
            &serde_json::json!({
                "start_date": date_property("Start date for analysis"),
                "end_date": date_property("End date for analysis"),
                "store": dynamic_enum_property(EnumName::Store, "Optional store filter. Default is all stores"),
                "min_length": integer_property("Minimum film length in minutes", 60),
                "max_length": integer_property("Maximum film length in minutes", 200),
                "active_only": {
                    "type": "string",
                    "enum": YesNo::ALL.iter().map(|v| v.literal()).collect::<Vec<_>>(),
                    "description": "Show only active customers",
                    "default": YesNo::default().literal()
                }
            }),
            &["start_date", "end_date", "min_length", "max_length"],
        ),
        tool_definition(
            ToolName::FilmLengthDistributionByCategory,
            "Shows average film length by category. Result: a horizontal bar chart of average length per category.",
            &serde_json::json!({
                "start_year": integer_property("Starting release year", 2000),
                "end_year": integer_property("Ending release year", 2010)
            }),
            &["start_year", "end_year"],
        ),
    ]
}

/// Returns the descriptions of all enums tool arguments can reference.
#[must_use]
pub fn enum_definitions() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({
            "name": EnumName::Category.as_ref(),
            "icon": "list",
            "description": "Category of films in the Sakila database.",
            "dynamic": true
        }),
        serde_json::json!({
            "name": EnumName::Store.as_ref(),
            "icon": "list",
            "description": "Store of films in the Sakila database.",
            "dynamic": true
        }),
        serde_json::json!({
            "name": EnumName::YesNo.as_ref(),
            "icon": "unit",
            "description": "Yes or No options for filters.",
            "dynamic": false,
            "values": YesNo::ALL.iter().map(|v| v.literal()).collect::<Vec<_>>()
        }),
    ]
}
