use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use vellum_query::{Query, Sort};

use crate::document::{CREATED_AT_FIELD, Document};
use crate::protocol::{
    self, DeleteArgs, GetArgs, InsertArgs, QueryArgs, QueryResponse, SqlArgs, UpdateArgs,
};
use crate::transport::{InvokeError, Transport};

#[derive(Debug)]
pub enum ClientError {
    /// Arguments failed to serialize before any call was issued.
    Serialization(String),
    /// The boundary or the backend rejected the call.
    Backend(String),
    /// The backend returned a shape this client cannot interpret.
    Malformed(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            ClientError::Backend(msg) => write!(f, "backend error: {msg}"),
            ClientError::Malformed(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<InvokeError> for ClientError {
    fn from(e: InvokeError) -> Self {
        ClientError::Backend(e.0)
    }
}

/// Logical storage target: a space / database pair. Resolved once when a
/// client is constructed, reused for every call it issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub space: String,
    pub db: String,
}

impl Target {
    pub fn new(space: impl Into<String>, db: impl Into<String>) -> Self {
        Target {
            space: space.into(),
            db: db.into(),
        }
    }

    /// Resolve from `VELLUM_SPACE` / `VELLUM_DB`, falling back to the
    /// stock workspace.
    pub fn from_env() -> Self {
        Target {
            space: std::env::var("VELLUM_SPACE").unwrap_or_else(|_| "un2".into()),
            db: std::env::var("VELLUM_DB").unwrap_or_else(|_| "_system".into()),
        }
    }
}

/// Query executor and single-document operations over one [`Transport`].
///
/// Documents come back in backend order; this client never re-sorts,
/// re-filters, or retries.
pub struct Client<T> {
    transport: T,
    target: Target,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, target: Target) -> Self {
        Client { transport, target }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    // ── Query execution ─────────────────────────────────────────

    /// Execute `query`, returning matching documents in backend order.
    /// An absent filter matches every document in the collection.
    pub async fn execute(&self, query: &Query) -> Result<Vec<Document>, ClientError> {
        self.run_query(query.clone()).await
    }

    /// Fetch the most recently created match: `created_at` descending is
    /// prepended to the query's sort keys, and unless the query sets its
    /// own limit, the limit becomes 1.
    pub async fn execute_latest(&self, query: &Query) -> Result<Vec<Document>, ClientError> {
        let mut query = query.clone();
        query.sort.insert(0, Sort::desc(CREATED_AT_FIELD));
        if query.limit.is_none() {
            query.limit = Some(1);
        }
        self.run_query(query).await
    }

    /// Execute a raw query in the backend's SQL dialect. A parallel code
    /// path with the same result contract as [`execute`](Self::execute),
    /// not a fallback.
    pub async fn execute_sql(&self, sql: &str) -> Result<Vec<Document>, ClientError> {
        debug!("executing raw sql query");
        let args = to_args(&SqlArgs {
            space: &self.target.space,
            db: &self.target.db,
            sql,
        })?;
        let response = self.transport.invoke(protocol::EXECUTE_SQL, args).await?;
        documents_from(response)
    }

    async fn run_query(&self, query: Query) -> Result<Vec<Document>, ClientError> {
        debug!(collection = %query.collection, "executing query");
        let args = to_args(&QueryArgs {
            space: &self.target.space,
            db: &self.target.db,
            query: &query,
        })?;
        let response = self.transport.invoke(protocol::EXECUTE_QUERY, args).await?;
        documents_from(response)
    }

    // ── Single-document operations ──────────────────────────────

    /// Insert `document` into `collection`, returning the persisted copy.
    pub async fn insert_document(
        &self,
        collection: &str,
        document: &Document,
    ) -> Result<Document, ClientError> {
        let args = to_args(&InsertArgs {
            space: &self.target.space,
            db: &self.target.db,
            collection,
            document,
        })?;
        let response = self
            .transport
            .invoke(protocol::INSERT_DOCUMENT, args)
            .await?;
        from_response(response)
    }

    /// Replace the document stored under `id`, returning the persisted copy.
    pub async fn update_document(
        &self,
        collection: &str,
        id: &str,
        document: &Document,
    ) -> Result<Document, ClientError> {
        let args = to_args(&UpdateArgs {
            space: &self.target.space,
            db: &self.target.db,
            collection,
            id,
            document,
        })?;
        let response = self
            .transport
            .invoke(protocol::UPDATE_DOCUMENT, args)
            .await?;
        from_response(response)
    }

    /// Delete the document stored under `id`; `false` means it was absent.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, ClientError> {
        let args = to_args(&DeleteArgs {
            space: &self.target.space,
            db: &self.target.db,
            collection,
            id,
        })?;
        let response = self
            .transport
            .invoke(protocol::DELETE_DOCUMENT, args)
            .await?;
        from_response(response)
    }

    /// Fetch one document by id.
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, ClientError> {
        let args = to_args(&GetArgs {
            space: &self.target.space,
            db: &self.target.db,
            collection,
            id,
        })?;
        let response = self.transport.invoke(protocol::GET_DOCUMENT, args).await?;
        from_response(response)
    }
}

fn to_args<A: Serialize>(args: &A) -> Result<Value, ClientError> {
    serde_json::to_value(args).map_err(|e| ClientError::Serialization(e.to_string()))
}

fn from_response<R: DeserializeOwned>(response: Value) -> Result<R, ClientError> {
    serde_json::from_value(response).map_err(|e| ClientError::Malformed(e.to_string()))
}

fn documents_from(response: Value) -> Result<Vec<Document>, ClientError> {
    let parsed: QueryResponse = from_response(response)?;
    Ok(parsed.documents)
}
