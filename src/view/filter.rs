//! Filter taxonomy derivation and filtering

use indexmap::IndexSet;

use crate::content::Record;

/// Sentinel filter value meaning "no filtering"
pub const ALL: &str = "All";

/// The filter a visitor selected
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parse a filter from a query-string value.
    ///
    /// A missing or empty value, or the sentinel itself, selects everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Filter::All,
            Some(v) if v.is_empty() || v == ALL => Filter::All,
            Some(v) => Filter::Category(v.to_string()),
        }
    }

    /// The value shown in the filter bar
    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => ALL,
            Filter::Category(c) => c,
        }
    }

    /// Exact, case-sensitive match against a record's category field
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => record.category() == Some(c.as_str()),
        }
    }
}

/// Derive the filter taxonomy of a record set.
///
/// Returns `"All"` followed by every distinct non-empty category in order
/// of first appearance.
pub fn derive_categories<'a, T, I>(records: I) -> Vec<String>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen: IndexSet<&str> = IndexSet::new();
    seen.insert(ALL);
    for record in records {
        if let Some(category) = record.category().filter(|c| !c.is_empty()) {
            seen.insert(category);
        }
    }
    seen.into_iter().map(str::to_string).collect()
}

/// Records matching `filter`, in input order
pub fn apply_filter<'a, T: Record>(records: &'a [T], filter: &Filter) -> Vec<&'a T> {
    records.iter().filter(|r| filter.matches(*r)).collect()
}
