mod filter;
mod operator;
mod parse_filter;
mod query;
mod sort;

pub use filter::{Filter, LogicalOp};
pub use operator::ComparisonOp;
pub use parse_filter::{FilterParseError, parse_filter};
pub use query::{Query, QueryBuilder};
pub use sort::{Sort, SortOrder};
