use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::{Filter, LogicalOp};
use crate::operator::ComparisonOp;
use crate::sort::{Sort, SortOrder};

/// Immutable query value: build one with [`QueryBuilder`], hand it to the
/// client, reuse it as often as needed.
///
/// `filter = None` matches every document in the collection. `offset`
/// skips that many matches before the first returned result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Query {
    pub fn builder(collection: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(collection)
    }
}

/// Fluent builder bound to one collection.
///
/// Successive [`filter`](Self::filter) calls accumulate as a conjunction:
/// the second call turns the filter into `And[first, second]`, and so on,
/// order preserved. [`build`](Self::build) does not consume the state, so
/// one builder can produce a query, be extended, and produce another.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    collection: String,
    filter: Option<Filter>,
    sort: Vec<Sort>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl QueryBuilder {
    pub fn new(collection: impl Into<String>) -> Self {
        QueryBuilder {
            collection: collection.into(),
            filter: None,
            sort: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Append a comparison: `field op value`.
    pub fn filter(
        mut self,
        field: impl Into<String>,
        op: ComparisonOp,
        value: impl Into<Value>,
    ) -> Self {
        self.combine(LogicalOp::And, Filter::condition(field, op, value));
        self
    }

    /// Conjoin a caller-built sub-filter with the accumulated one.
    pub fn and(mut self, filter: Filter) -> Self {
        self.combine(LogicalOp::And, filter);
        self
    }

    /// Disjoin a caller-built sub-filter with the accumulated one.
    pub fn or(mut self, filter: Filter) -> Self {
        self.combine(LogicalOp::Or, filter);
        self
    }

    /// Replace the accumulated filter with the negation of `filter`, or of
    /// the accumulated filter itself when `filter` is `None`. A no-op when
    /// there is nothing to negate. Negation is structural: applying it
    /// twice double-negates rather than canceling.
    pub fn not(mut self, filter: impl Into<Option<Filter>>) -> Self {
        let target = filter.into().or_else(|| self.filter.take());
        if let Some(target) = target {
            self.filter = Some(Filter::not(target));
        }
        self
    }

    /// Append a sort key; call order defines priority.
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(Sort {
            field: field.into(),
            order,
        });
        self
    }

    /// Cap the number of returned documents. Later calls overwrite.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Skip the first `n` matches. Later calls overwrite.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn build(&self) -> Query {
        Query {
            collection: self.collection.clone(),
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }

    fn combine(&mut self, op: LogicalOp, next: Filter) {
        self.filter = Some(match self.filter.take() {
            // First predicate becomes the filter directly, no single-child group.
            None => next,
            Some(existing) => Filter::Group {
                op,
                filters: vec![existing, next],
            },
        });
    }
}
