use sea_orm::{ColumnTrait, sea_query::Order};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Separator between the field and the direction in `sortBy=<field>:<direction>`.
const SORT_SEPARATOR: char = ':';

/// Sort direction of a single `sortBy` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Convert to the `sea-query` ordering
    #[must_use]
    pub const fn to_order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(Self::Desc)
        } else {
            Err(SortByParseError::InvalidDirection(s.to_string()))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sort key, written on the wire as `"<field>:<direction>"`.
///
/// ```
/// use storefront_query::sort::{SortBy, SortDirection};
///
/// let sort: SortBy = "price:desc".parse().unwrap();
/// assert_eq!(sort.field, "price");
/// assert_eq!(sort.direction, SortDirection::Desc);
/// assert_eq!(sort.to_string(), "price:DESC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct SortBy {
    pub field: String,
    pub direction: SortDirection,
}

impl SortBy {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl FromStr for SortBy {
    type Err = SortByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s
            .rsplit_once(SORT_SEPARATOR)
            .ok_or_else(|| SortByParseError::MissingDirection(s.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(SortByParseError::EmptyField);
        }
        Ok(Self {
            field: field.to_string(),
            direction: direction.trim().parse()?,
        })
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SORT_SEPARATOR}{}", self.field, self.direction)
    }
}

/// Reasons a `sortBy` token is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortByParseError {
    MissingDirection(String),
    InvalidDirection(String),
    EmptyField,
}

impl fmt::Display for SortByParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDirection(raw) => {
                write!(f, "sort '{raw}' must look like <field>:<ASC|DESC>")
            }
            Self::InvalidDirection(raw) => {
                write!(f, "sort direction '{raw}' must be ASC or DESC")
            }
            Self::EmptyField => f.write_str("sort field must not be empty"),
        }
    }
}

impl std::error::Error for SortByParseError {}

/// Find column by name
fn find_column<C>(column_name: &str, columns: &[(&str, C)]) -> Option<C>
where
    C: ColumnTrait + Copy,
{
    columns
        .iter()
        .find(|&&(col_name, _)| col_name == column_name)
        .map(|&(_, col)| col)
}

/// Resolve the requested sort against a resource's sortable columns.
///
/// Falls back to `default` when nothing was requested or the field is not one
/// of `order_column_logic`, so an unknown field never reaches the query engine.
pub fn resolve_sort<C>(
    requested: Option<&SortBy>,
    order_column_logic: &[(&str, C)],
    default: (C, Order),
) -> (C, Order)
where
    C: ColumnTrait + Copy,
{
    requested
        .and_then(|sort| {
            find_column(&sort.field, order_column_logic)
                .map(|column| (column, sort.direction.to_order()))
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_by_valid() {
        let sort: SortBy = "createdAt:DESC".parse().unwrap();
        assert_eq!(sort, SortBy::desc("createdAt"));
    }

    #[test]
    fn test_parse_direction_is_case_insensitive() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("Desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
    }

    #[test]
    fn test_parse_sort_by_rejects_missing_direction() {
        assert_eq!(
            "price".parse::<SortBy>(),
            Err(SortByParseError::MissingDirection("price".to_string()))
        );
    }

    #[test]
    fn test_parse_sort_by_rejects_unknown_direction() {
        assert_eq!(
            "price:UP".parse::<SortBy>(),
            Err(SortByParseError::InvalidDirection("UP".to_string()))
        );
    }

    #[test]
    fn test_parse_sort_by_rejects_empty_field() {
        assert_eq!(":ASC".parse::<SortBy>(), Err(SortByParseError::EmptyField));
    }

    #[test]
    fn test_display_normalizes_direction() {
        let sort: SortBy = "name:asc".parse().unwrap();
        assert_eq!(sort.to_string(), "name:ASC");
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let json = serde_json::to_string(&SortBy::desc("price")).unwrap();
        assert_eq!(json, r#""price:DESC""#);

        let parsed: SortBy = serde_json::from_str(r#""name:ASC""#).unwrap();
        assert_eq!(parsed, SortBy::asc("name"));

        assert!(serde_json::from_str::<SortBy>(r#""name""#).is_err());
    }

    #[test]
    fn test_direction_to_order() {
        assert_eq!(SortDirection::Asc.to_order(), Order::Asc);
        assert_eq!(SortDirection::Desc.to_order(), Order::Desc);
    }
}
