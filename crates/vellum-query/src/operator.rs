use serde::{Deserialize, Serialize};

/// Comparison applied to a single document field.
///
/// Operator semantics live in the backend; the client only carries them on
/// the wire. `In` expects an array value, every other operator treats the
/// value as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
}

impl ComparisonOp {
    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "eq",
            ComparisonOp::Ne => "ne",
            ComparisonOp::Gt => "gt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Lte => "lte",
            ComparisonOp::In => "in",
            ComparisonOp::Contains => "contains",
            ComparisonOp::StartsWith => "startsWith",
            ComparisonOp::EndsWith => "endsWith",
            ComparisonOp::Matches => "matches",
        }
    }

    /// Inverse of [`as_str`](Self::as_str); `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        let op = match s {
            "eq" => ComparisonOp::Eq,
            "ne" => ComparisonOp::Ne,
            "gt" => ComparisonOp::Gt,
            "gte" => ComparisonOp::Gte,
            "lt" => ComparisonOp::Lt,
            "lte" => ComparisonOp::Lte,
            "in" => ComparisonOp::In,
            "contains" => ComparisonOp::Contains,
            "startsWith" => ComparisonOp::StartsWith,
            "endsWith" => ComparisonOp::EndsWith,
            "matches" => ComparisonOp::Matches,
            _ => return None,
        };
        Some(op)
    }
}
