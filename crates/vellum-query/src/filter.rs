use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::operator::ComparisonOp;
use crate::parse_filter::parse_filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

/// Predicate tree for a query's WHERE clause.
///
/// Child order inside a group carries no semantics but is preserved, so the
/// same tree always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Leaf test against one document field.
    Condition {
        field: String,
        op: ComparisonOp,
        value: Value,
    },
    /// Ordered conjunction or disjunction of child filters.
    Group {
        op: LogicalOp,
        filters: Vec<Filter>,
    },
    /// Negation of exactly one child. Structural: nesting two of these is
    /// a double negation, not a cancellation.
    Not(Box<Filter>),
}

impl Filter {
    pub fn condition(
        field: impl Into<String>,
        op: ComparisonOp,
        value: impl Into<Value>,
    ) -> Self {
        Filter::Condition {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::Group {
            op: LogicalOp::And,
            filters,
        }
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Group {
            op: LogicalOp::Or,
            filters,
        }
    }

    pub fn not(filter: Filter) -> Self {
        Filter::Not(Box::new(filter))
    }

    // ── Comparison shorthands ───────────────────────────────────

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Lte, value)
    }

    /// `field IN [values]`. The value must be an array.
    pub fn in_array(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::In, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Contains, value)
    }

    pub fn starts_with(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::StartsWith, value)
    }

    pub fn ends_with(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::EndsWith, value)
    }

    pub fn matches(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::condition(field, ComparisonOp::Matches, value)
    }
}

// Wire form is a tagged tree keyed on "op":
//   { "op": "eq", "field": "name", "value": "Acme" }
//   { "op": "and" | "or", "filters": [ ... ] }
//   { "op": "not", "filter": { ... } }
impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Filter::Condition { field, op, value } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("op", op)?;
                map.serialize_entry("field", field)?;
                map.serialize_entry("value", value)?;
                map.end()
            }
            Filter::Group { op, filters } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("op", op)?;
                map.serialize_entry("filters", filters)?;
                map.end()
            }
            Filter::Not(filter) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("op", "not")?;
                map.serialize_entry("filter", filter)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_filter(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_wire_shape() {
        let filter = Filter::eq("status", "active");
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "op": "eq", "field": "status", "value": "active" })
        );
    }

    #[test]
    fn group_wire_shape_preserves_order() {
        let filter = Filter::or(vec![
            Filter::gt("age", 18),
            Filter::eq("verified", true),
        ]);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "op": "or",
                "filters": [
                    { "op": "gt", "field": "age", "value": 18 },
                    { "op": "eq", "field": "verified", "value": true },
                ],
            })
        );
    }

    #[test]
    fn negation_wire_shape() {
        let filter = Filter::not(Filter::in_array("status", json!(["archived", "deleted"])));
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "op": "not",
                "filter": {
                    "op": "in",
                    "field": "status",
                    "value": ["archived", "deleted"],
                },
            })
        );
    }

    #[test]
    fn double_negation_stays_nested() {
        let filter = Filter::not(Filter::not(Filter::eq("a", 1)));
        match &filter {
            Filter::Not(inner) => assert!(matches!(**inner, Filter::Not(_))),
            _ => panic!("expected Not, got {filter:?}"),
        }
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "op": "not",
                "filter": {
                    "op": "not",
                    "filter": { "op": "eq", "field": "a", "value": 1 },
                },
            })
        );
    }
}
