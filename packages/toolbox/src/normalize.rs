//! Tool argument normalization.
//!
//! Every tool argument becomes a [`ToolArg`] and is then reduced to the
//! primitive the query executor binds. An absent filter becomes the `0`
//! sentinel, which the queries read as "match all".

use chrono::NaiveDate;
use sakila_query_models::QueryValue;
use sakila_toolbox_models::{DynEnumRef, YesNo};

/// Value bound for an absent argument.
pub const ABSENT_SENTINEL: i64 = 0;

/// A tool argument before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArg {
    /// Reference to a dynamic enum member.
    DynamicEnum(DynEnumRef),
    /// Member of a static enum, as its literal.
    StaticEnum(&'static str),
    /// Plain scalar (integer, number, date, text).
    Scalar(QueryValue),
    /// Not supplied.
    Absent,
}

/// Reduces an argument to the primitive the executor expects.
#[must_use]
pub fn normalize(arg: ToolArg) -> QueryValue {
    match arg {
        ToolArg::DynamicEnum(value) => QueryValue::Int(value.key),
        ToolArg::StaticEnum(literal) => QueryValue::from(literal),
        ToolArg::Scalar(value) => value,
        ToolArg::Absent => QueryValue::Int(ABSENT_SENTINEL),
    }
}

impl From<DynEnumRef> for ToolArg {
    fn from(value: DynEnumRef) -> Self {
        Self::DynamicEnum(value)
    }
}

impl From<YesNo> for ToolArg {
    fn from(value: YesNo) -> Self {
        Self::StaticEnum(value.literal())
    }
}

impl From<i64> for ToolArg {
    fn from(value: i64) -> Self {
        Self::Scalar(QueryValue::Int(value))
    }
}

impl From<f64> for ToolArg {
    fn from(value: f64) -> Self {
        Self::Scalar(QueryValue::Real(value))
    }
}

impl From<NaiveDate> for ToolArg {
    fn from(value: NaiveDate) -> Self {
        Self::Scalar(QueryValue::Date(value))
    }
}

impl From<String> for ToolArg {
    fn from(value: String) -> Self {
        Self::Scalar(QueryValue::String(value))
    }
}

impl From<&str> for ToolArg {
    fn from(value: &str) -> Self {
        Self::Scalar(QueryValue::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for ToolArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_dynamic_enum_is_zero() {
        assert_eq!(
            normalize(ToolArg::from(None::<DynEnumRef>)),
            QueryValue::Int(0)
        );
        assert_eq!(normalize(ToolArg::Absent), QueryValue::Int(ABSENT_SENTINEL));
    }

    #[test]
    fn dynamic_enum_is_its_key() {
        let arg = ToolArg::from(Some(DynEnumRef::with_label(7, "Drama")));
        assert_eq!(normalize(arg), QueryValue::Int(7));
    }

    #[test]
    fn static_enum_is_its_literal() {
        for value in YesNo::ALL {
            assert_eq!(
                normalize(ToolArg::from(*value)),
                QueryValue::String(value.literal().to_string())
            );
        }
    }

    #[test]
    fn scalars_pass_through_unchanged() {
        let date = NaiveDate::from_ymd_opt(2005, 5, 24).unwrap();

        assert_eq!(normalize(ToolArg::from(2005)), QueryValue::Int(2005));
        assert_eq!(normalize(ToolArg::from(4.99)), QueryValue::Real(4.99));
        assert_eq!(normalize(ToolArg::from(date)), QueryValue::Date(date));
        assert_eq!(normalize(ToolArg::from("x")), QueryValue::from("x"));
    }

    #[test]
    fn absent_scalar_is_zero() {
        assert_eq!(normalize(ToolArg::from(None::<i64>)), QueryValue::Int(0));
    }
}
