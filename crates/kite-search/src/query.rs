//! The query model (C5, §4.4): a fluent builder over the shape the
//! engine executes.

use kite_core::CaseFilter;

use crate::error::SearchError;

const MAX_LIMIT: usize = 1000;

/// How the query text should be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    #[default]
    FullText,
    Exact,
    Fuzzy,
    Regex,
}

/// Which field to sort results by. `Relevance` is the default and only
/// meaningful for ranked full-text queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Relevance,
    DecisionDate,
    CaseName,
    QualityScore,
    CourtLevel,
}

#[derive(Debug, Clone, Default)]
pub struct Sort {
    pub field: SortField,
    pub descending: bool,
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
    pub cursor: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            cursor: None,
        }
    }
}

/// A search request (§4.4).
#[derive(Debug, Clone)]
pub struct Query {
    pub query_type: QueryType,
    pub text: String,
    /// Textual fields to search; empty means "all textual fields".
    pub fields: Vec<String>,
    pub filter: CaseFilter,
    pub sort: Sort,
    pub pagination: Pagination,
    pub facets: Vec<String>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            query_type: QueryType::default(),
            text: String::new(),
            fields: Vec::new(),
            filter: CaseFilter::default(),
            sort: Sort::default(),
            pagination: Pagination::default(),
            facets: Vec::new(),
        }
    }
}

impl Query {
    #[must_use]
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Fails when the query carries no text and no id filter, or when
    /// pagination bounds are violated (§4.4).
    pub fn validate(&self) -> Result<(), SearchError> {
        let has_id_filter = self.filter.ids.as_ref().is_some_and(|ids| !ids.is_empty());
        if self.text.trim().is_empty() && !has_id_filter {
            return Err(SearchError::InvalidQuery(
                "query has no text and no id filter".to_string(),
            ));
        }
        if self.pagination.limit == 0 || self.pagination.limit > MAX_LIMIT {
            return Err(SearchError::InvalidQuery(format!(
                "pagination limit must be in 1..={MAX_LIMIT}"
            )));
        }
        Ok(())
    }
}

/// A fluent builder for [`Query`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self { query: Query::default() }
    }

    #[must_use]
    pub fn query_type(mut self, query_type: QueryType) -> Self {
        self.query.query_type = query_type;
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.query.text = text.into();
        self
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.query.fields.push(field.into());
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: CaseFilter) -> Self {
        self.query.filter = filter;
        self
    }

    #[must_use]
    pub fn sort(mut self, field: SortField, descending: bool) -> Self {
        self.query.sort = Sort { field, descending };
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.pagination.limit = limit;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.query.pagination.offset = offset;
        self
    }

    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.query.pagination.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn facet(mut self, field: impl Into<String>) -> Self {
        self.query.facets.push(field.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Query {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_equivalent_query_to_direct_construction() {
        let built = Query::builder().text("alpha").limit(50).build();
        let direct = Query {
            text: "alpha".to_string(),
            pagination: Pagination {
                limit: 50,
                ..Pagination::default()
            },
            ..Query::default()
        };
        assert_eq!(built.text, direct.text);
        assert_eq!(built.pagination.limit, direct.pagination.limit);
    }

    #[test]
    fn empty_text_without_id_filter_is_invalid() {
        let query = Query::builder().build();
        assert!(query.validate().is_err());
    }

    #[test]
    fn id_filter_alone_is_valid() {
        let mut filter = CaseFilter::new();
        filter.ids = Some(vec![uuid::Uuid::new_v4()]);
        let query = Query::builder().filter(filter).build();
        assert!(query.validate().is_ok());
    }

    #[test]
    fn limit_boundary_1000_accepted_1001_rejected() {
        let ok = Query::builder().text("x").limit(1000).build();
        assert!(ok.validate().is_ok());
        let bad = Query::builder().text("x").limit(1001).build();
        assert!(bad.validate().is_err());
    }
}
