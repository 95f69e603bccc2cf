use serde_json::Value;

use crate::filter::{Filter, LogicalOp};
use crate::operator::ComparisonOp;

/// Parse error for filter trees.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParseError(pub String);

impl std::fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "filter parse error: {}", self.0)
    }
}

impl std::error::Error for FilterParseError {}

/// Parse a JSON filter tree into a [`Filter`].
///
/// Accepted shapes, keyed on `op`:
/// - comparison leaf, any operator from [`ComparisonOp`]:
///   `{ "op": "eq", "field": "name", "value": "Acme" }`
/// - logical group: `{ "op": "and" | "or", "filters": [ ... ] }`
/// - negation of one child: `{ "op": "not", "filter": { ... } }`
pub fn parse_filter(value: &Value) -> Result<Filter, FilterParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| FilterParseError("filter must be a JSON object".into()))?;

    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| FilterParseError("missing string \"op\" member".into()))?;

    match op {
        "and" => parse_group(obj, LogicalOp::And),
        "or" => parse_group(obj, LogicalOp::Or),
        "not" => {
            let inner = obj
                .get("filter")
                .ok_or_else(|| FilterParseError("\"not\" requires a \"filter\" member".into()))?;
            Ok(Filter::not(parse_filter(inner)?))
        }
        other => parse_condition(obj, other),
    }
}

fn parse_group(
    obj: &serde_json::Map<String, Value>,
    op: LogicalOp,
) -> Result<Filter, FilterParseError> {
    let arr = obj
        .get("filters")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FilterParseError(format!("\"{}\" requires a \"filters\" array", op.as_str()))
        })?;

    if arr.is_empty() {
        return Err(FilterParseError(format!(
            "\"{}\" filters array must not be empty",
            op.as_str()
        )));
    }

    let mut filters = Vec::with_capacity(arr.len());
    for elem in arr {
        filters.push(parse_filter(elem)?);
    }

    Ok(Filter::Group { op, filters })
}

fn parse_condition(
    obj: &serde_json::Map<String, Value>,
    op_name: &str,
) -> Result<Filter, FilterParseError> {
    let op = ComparisonOp::parse(op_name)
        .ok_or_else(|| FilterParseError(format!("unknown operator: {op_name}")))?;

    let field = obj
        .get("field")
        .and_then(Value::as_str)
        .ok_or_else(|| FilterParseError(format!("\"{op_name}\" requires a string \"field\"")))?;

    let value = obj
        .get("value")
        .ok_or_else(|| FilterParseError(format!("\"{op_name}\" requires a \"value\" member")))?;

    if op == ComparisonOp::In && !value.is_array() {
        return Err(FilterParseError("\"in\" value must be an array".into()));
    }

    Ok(Filter::Condition {
        field: field.to_string(),
        op,
        value: value.clone(),
    })
}
