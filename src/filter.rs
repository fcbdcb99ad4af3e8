use sea_orm::{
    Condition,
    sea_query::{Alias, Expr, IntoIden},
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{FilterMap, FilterValue};

/// Equality constraints accepted from a filter mapping.
///
/// Serializes as `{field: value}`; a field missing from the predicate places no
/// constraint on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterPredicate(BTreeMap<String, FilterValue>);

impl FilterPredicate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// The accepted entries as a filter mapping, for echoing back to clients
    #[must_use]
    pub fn to_filter_map(&self) -> FilterMap {
        self.0
            .iter()
            .map(|(field, value)| (field.clone(), Some(value.clone())))
            .collect()
    }

    /// Render as a `sea-orm` condition on columns of `table`: every field must
    /// match, a scalar by equality and a sequence by `IN`.
    ///
    /// Field names are quoted identifiers and values are bound parameters. Field
    /// names are not checked against the entity; an unknown column is reported by
    /// the database when the query runs.
    #[must_use]
    pub fn to_condition(&self, table: impl IntoIden) -> Condition {
        let table = table.into_iden();
        self.0
            .iter()
            .fold(Condition::all(), |condition, (field, value)| {
                let column = Expr::col((table.clone(), Alias::new(field.as_str())));
                condition.add(match value {
                    FilterValue::Scalar(value) => column.eq(value.as_str()),
                    FilterValue::Multi(values) => column.is_in(values.iter().map(String::as_str)),
                })
            })
    }
}

impl IntoIterator for FilterPredicate {
    type Item = (String, FilterValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build the filter predicate from raw filter input.
///
/// Keeps only entries with a present value (see [`FilterValue::is_present`]);
/// sequences are kept verbatim. Absent input yields an empty predicate.
///
/// An empty-string scalar is dropped rather than turned into an
/// "equals empty string" constraint, so a field cannot be filtered to `""`.
#[must_use]
pub fn filter_options(filter: Option<&FilterMap>) -> FilterPredicate {
    let Some(filter) = filter else {
        return FilterPredicate::default();
    };

    FilterPredicate(
        filter
            .iter()
            .filter_map(|(field, value)| {
                value
                    .as_ref()
                    .filter(|value| value.is_present())
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect(),
    )
}
