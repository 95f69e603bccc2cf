use serde::{Deserialize, Serialize};

use crate::document::Document;

/// One staged mutation, fully resolved at staging time: an `Insert`
/// always carries the concrete id the document will be stored under,
/// never a placeholder for backend id generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Operation {
    Insert {
        collection: String,
        id: String,
        document: Document,
    },
    Update {
        collection: String,
        id: String,
        document: Document,
    },
    Delete {
        collection: String,
        id: String,
    },
}

impl Operation {
    pub fn collection(&self) -> &str {
        match self {
            Operation::Insert { collection, .. }
            | Operation::Update { collection, .. }
            | Operation::Delete { collection, .. } => collection,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Operation::Insert { id, .. }
            | Operation::Update { id, .. }
            | Operation::Delete { id, .. } => id,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Operation::Insert { .. } => "Insert",
            Operation::Update { .. } => "Update",
            Operation::Delete { .. } => "Delete",
        }
    }
}
