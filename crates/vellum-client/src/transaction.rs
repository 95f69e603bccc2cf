use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, error};
use uuid::Uuid;

use crate::client::{Client, ClientError};
use crate::document::Document;
use crate::operation::Operation;
use crate::transport::Transport;

/// Staged multi-operation transaction against one space/database pair.
///
/// Operations accumulate locally in staging order and are sent one at a
/// time on [`commit`](Self::commit). The backend offers no cross-call
/// atomicity, so this is not a real transaction: a failure partway leaves
/// the already-applied prefix in place and the rest staged (see `commit`).
///
/// One instance owns one queue; create one per editing session rather
/// than sharing. `commit` takes `&mut self`, so two commits on the same
/// instance can never be in flight at once.
pub struct Transaction<'a, T> {
    client: &'a Client<T>,
    operations: VecDeque<Operation>,
}

impl<'a, T: Transport> Transaction<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Transaction {
            client,
            operations: VecDeque::new(),
        }
    }

    /// Stage an insert. Reuses `document["id"]` when it is already a
    /// string, otherwise assigns a fresh uuid, so the pending list is
    /// fully resolved and independent of backend id generation.
    pub fn add(&mut self, collection: impl Into<String>, document: Document) -> &mut Self {
        let mut document = document;
        let id = match document.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        document.insert("id".to_string(), Value::String(id.clone()));
        self.operations.push_back(Operation::Insert {
            collection: collection.into(),
            id,
            document,
        });
        self
    }

    /// Stage an update, verbatim. Two staged updates to the same id both
    /// execute in order at commit; nothing is merged or reconciled here.
    pub fn update(
        &mut self,
        collection: impl Into<String>,
        id: impl Into<String>,
        document: Document,
    ) -> &mut Self {
        self.operations.push_back(Operation::Update {
            collection: collection.into(),
            id: id.into(),
            document,
        });
        self
    }

    /// Stage a delete.
    pub fn delete(&mut self, collection: impl Into<String>, id: impl Into<String>) -> &mut Self {
        self.operations.push_back(Operation::Delete {
            collection: collection.into(),
            id: id.into(),
        });
        self
    }

    /// Snapshot of the staged queue in commit order. Mutating the
    /// returned vector does not touch the queue.
    pub fn pending_operations(&self) -> Vec<Operation> {
        self.operations.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Discard every staged operation without contacting the backend.
    /// Operations applied by an earlier `commit` stay applied.
    pub fn rollback(&mut self) {
        self.operations.clear();
    }

    /// Send the staged operations front to back, one command per
    /// operation, each awaited before the next is issued.
    ///
    /// An operation leaves the queue only once its call succeeds. On the
    /// first failure the error is returned as-is: the failed operation
    /// and everything after it stay staged, and the applied prefix is
    /// neither unwound nor compensated. Callers can retry `commit`,
    /// inspect [`pending_operations`](Self::pending_operations), or
    /// [`rollback`](Self::rollback) to discard the remainder.
    pub async fn commit(&mut self) -> Result<(), ClientError> {
        if self.operations.is_empty() {
            return Ok(());
        }

        debug!(staged = self.operations.len(), "committing transaction");

        while let Some(op) = self.operations.pop_front() {
            if let Err(e) = self.apply(&op).await {
                error!(
                    kind = op.kind(),
                    collection = op.collection(),
                    id = op.id(),
                    "staged operation failed"
                );
                self.operations.push_front(op);
                return Err(e);
            }
        }

        Ok(())
    }

    async fn apply(&self, op: &Operation) -> Result<(), ClientError> {
        match op {
            Operation::Insert {
                collection,
                document,
                ..
            } => {
                self.client.insert_document(collection, document).await?;
            }
            Operation::Update {
                collection,
                id,
                document,
            } => {
                self.client
                    .update_document(collection, id, document)
                    .await?;
            }
            Operation::Delete { collection, id } => {
                self.client.delete_document(collection, id).await?;
            }
        }
        Ok(())
    }
}
