use sea_orm::{
    Condition,
    sea_query::{Alias, DynIden, Expr, Func, IntoIden, LikeExpr, SimpleExpr},
};
use serde::{Serialize, Serializer, ser::SerializeMap};

/// Fields a product search term is matched against
pub const PRODUCT_SEARCH_FIELDS: &[&str] = &["name", "articul", "barcode"];

const LIKE_ESCAPE: char = '\\';

/// Escape LIKE wildcards so the term matches literally
/// Escapes: % (match any) and _ (match single char)
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\") // Escape backslash first
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Matching mode of a string condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    Insensitive,
}

/// `{"contains": <term>, "mode": "insensitive"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringFilter {
    pub contains: String,
    pub mode: QueryMode,
}

/// One branch of the search disjunction: `{<field>: {"contains": ..., "mode": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContains {
    pub field: String,
    pub filter: StringFilter,
}

impl Serialize for FieldContains {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.filter)?;
        map.end()
    }
}

/// Case-insensitive substring match over a set of fields, any of which may match.
///
/// Empty when there is no search term; serializes as `{}` then, and as
/// `{"OR": [...]}` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPredicate {
    #[serde(rename = "OR", skip_serializing_if = "Vec::is_empty")]
    or: Vec<FieldContains>,
}

impl SearchPredicate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.or.is_empty()
    }

    /// The OR-ed branches
    #[must_use]
    pub fn branches(&self) -> &[FieldContains] {
        &self.or
    }

    /// The term every branch matches, if any
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.or.first().map(|branch| branch.filter.contains.as_str())
    }

    /// Render as `UPPER(col) LIKE '%TERM%' ESCAPE '\'` for each field of
    /// `table`, OR-ed together. `None` when the predicate is empty.
    #[must_use]
    pub fn to_condition(&self, table: impl IntoIden) -> Option<Condition> {
        if self.or.is_empty() {
            return None;
        }

        let table = table.into_iden();
        Some(self.or.iter().fold(Condition::any(), |condition, branch| {
            condition.add(build_like_condition(
                &table,
                &branch.field,
                &branch.filter.contains,
            ))
        }))
    }
}

/// Build condition for one field with LIKE queries (case-insensitive)
fn build_like_condition(table: &DynIden, key: &str, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_wildcards(term).to_uppercase());

    Expr::expr(Func::upper(Expr::col((table.clone(), Alias::new(key)))))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// OR-group of "contains, case-insensitive" conditions over `fields`.
///
/// The term is used as-is; callers trim it.
pub fn contains_any_insensitive<F>(fields: &[F], term: &str) -> SearchPredicate
where
    F: AsRef<str>,
{
    SearchPredicate {
        or: fields
            .iter()
            .map(|field| FieldContains {
                field: field.as_ref().to_string(),
                filter: StringFilter {
                    contains: term.to_string(),
                    mode: QueryMode::Insensitive,
                },
            })
            .collect(),
    }
}

/// Search predicate over an explicit field set.
///
/// Leading and trailing whitespace is trimmed; a blank term yields the empty
/// predicate. The whole trimmed term is the pattern, it is not split into words.
#[must_use]
pub fn search_options_for(fields: &[&str], search: Option<&str>) -> SearchPredicate {
    match search.map(str::trim) {
        Some(term) if !term.is_empty() => contains_any_insensitive(fields, term),
        _ => SearchPredicate::default(),
    }
}

/// Product search: the term against [`PRODUCT_SEARCH_FIELDS`].
#[must_use]
pub fn search_options(search: Option<&str>) -> SearchPredicate {
    search_options_for(PRODUCT_SEARCH_FIELDS, search)
}
