//! Boolean search query model
//!
//! Serializes to the search service's query DSL:
//!
//! ```text
//! {"query":{"bool":{"must":[{"bool":{"should":[{"term":{"tier.tagFQN":"Tier.Tier1"}}]}}]}}}
//! ```

use crate::field::FilterField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the boolean query tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchQuery {
    /// Boolean combination of sub-queries
    Bool(BoolQuery),

    /// Exact match of one field against one value
    Term(BTreeMap<String, String>),
}

impl SearchQuery {
    /// Create term query `field == value`
    #[must_use]
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut term = BTreeMap::new();
        term.insert(field.into(), value.into());
        Self::Term(term)
    }

    /// Create conjunction
    #[inline]
    #[must_use]
    pub fn must(clauses: Vec<SearchQuery>) -> Self {
        Self::Bool(BoolQuery {
            must: clauses,
            should: Vec::new(),
        })
    }

    /// Create disjunction
    #[inline]
    #[must_use]
    pub fn should(clauses: Vec<SearchQuery>) -> Self {
        Self::Bool(BoolQuery {
            must: Vec::new(),
            should: clauses,
        })
    }
}

/// Clauses of a boolean query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolQuery {
    /// All must match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<SearchQuery>,

    /// At least one must match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<SearchQuery>,
}

/// Envelope handed to the search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Root query
    pub query: SearchQuery,
}

impl QueryFilter {
    /// Wrap a root query
    #[inline]
    #[must_use]
    pub fn new(query: SearchQuery) -> Self {
        Self { query }
    }

    /// Encode as JSON
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encode an optional filter; `None` means "match all" and encodes as absent
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn encode(filter: Option<&Self>) -> Result<Option<String>, serde_json::Error> {
        filter.map(Self::to_json).transpose()
    }
}

/// Build the quick filter query for a set of fields
///
/// Each field with a selection becomes a `should` over its selected options;
/// those disjunctions are combined under one `must`. Returns `None` when no
/// field has a selection.
pub fn build_query<'a>(fields: impl IntoIterator<Item = &'a FilterField>) -> Option<SearchQuery> {
    let must: Vec<SearchQuery> = fields
        .into_iter()
        .filter(|field| field.has_selection())
        .map(|field| {
            SearchQuery::should(
                field
                    .value
                    .iter()
                    .map(|option| SearchQuery::term(&field.key, &option.key))
                    .collect(),
            )
        })
        .collect();

    if must.is_empty() {
        None
    } else {
        Some(SearchQuery::must(must))
    }
}

/// Build the quick filter envelope, see [`build_query`]
pub fn build_query_filter<'a>(
    fields: impl IntoIterator<Item = &'a FilterField>,
) -> Option<QueryFilter> {
    build_query(fields).map(QueryFilter::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FilterOption;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn term_serializes_as_field_map() {
        let term = SearchQuery::term("tier", "Gold");
        assert_eq!(serde_json::to_value(term).unwrap(), json!({"term": {"tier": "Gold"}}));
    }

    #[test]
    fn build_query_none_without_selection() {
        let fields = vec![FilterField::new("tier", "Tier"), FilterField::new("owner", "Owner")];
        assert!(build_query(&fields).is_none());
        assert!(build_query(std::iter::empty::<&FilterField>()).is_none());
    }

    #[test]
    fn build_query_single_field() {
        let fields = vec![
            FilterField::new("tier", "Tier").with_value(vec![FilterOption::keyed("Gold")]),
        ];
        let query = build_query(&fields).unwrap();
        assert_eq!(
            serde_json::to_value(query).unwrap(),
            json!({"bool": {"must": [{"bool": {"should": [{"term": {"tier": "Gold"}}]}}]}})
        );
    }

    #[test]
    fn build_query_skips_empty_fields() {
        let fields = vec![
            FilterField::new("tier", "Tier"),
            FilterField::new("owner", "Owner").with_value(vec![
                FilterOption::keyed("alice"),
                FilterOption::keyed("bob"),
            ]),
        ];
        let query = build_query(&fields).unwrap();
        assert_eq!(
            query,
            SearchQuery::must(vec![SearchQuery::should(vec![
                SearchQuery::term("owner", "alice"),
                SearchQuery::term("owner", "bob"),
            ])])
        );
    }

    #[test]
    fn query_filter_envelope() {
        let fields = vec![
            FilterField::new("tier", "Tier").with_value(vec![FilterOption::keyed("Gold")]),
        ];
        let filter = build_query_filter(&fields).unwrap();
        assert_eq!(
            filter.to_json().unwrap(),
            r#"{"query":{"bool":{"must":[{"bool":{"should":[{"term":{"tier":"Gold"}}]}}]}}}"#
        );
    }

    #[test]
    fn encode_absent_filter() {
        assert_eq!(QueryFilter::encode(None).unwrap(), None);
    }

    #[test]
    fn query_filter_parses_back() {
        let raw = r#"{"query":{"bool":{"must":[{"bool":{"should":[{"term":{"tier":"Gold"}}]}}]}}}"#;
        let filter: QueryFilter = serde_json::from_str(raw).unwrap();
        assert_eq!(
            filter.query,
            SearchQuery::must(vec![SearchQuery::should(vec![SearchQuery::term("tier", "Gold")])])
        );
    }
}
