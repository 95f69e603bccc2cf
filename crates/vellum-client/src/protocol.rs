//! Wire contract for the backend command set.
//!
//! Argument structs serialize to exactly the JSON each command expects;
//! response structs ignore members this client does not consume (the
//! query response also carries applied `offset`/`limit`, for instance).

use serde::{Deserialize, Serialize};

use vellum_query::Query;

use crate::document::Document;

pub const EXECUTE_QUERY: &str = "jsondb_execute_query";
pub const EXECUTE_SQL: &str = "jsondb_execute_sql";
pub const INSERT_DOCUMENT: &str = "jsondb_insert_document";
pub const UPDATE_DOCUMENT: &str = "jsondb_update_document";
pub const DELETE_DOCUMENT: &str = "jsondb_delete_document";
pub const GET_DOCUMENT: &str = "jsondb_get_document";

#[derive(Debug, Serialize)]
pub struct QueryArgs<'a> {
    pub space: &'a str,
    pub db: &'a str,
    pub query: &'a Query,
}

#[derive(Debug, Serialize)]
pub struct SqlArgs<'a> {
    pub space: &'a str,
    pub db: &'a str,
    pub sql: &'a str,
}

#[derive(Debug, Serialize)]
pub struct InsertArgs<'a> {
    pub space: &'a str,
    pub db: &'a str,
    pub collection: &'a str,
    pub document: &'a Document,
}

#[derive(Debug, Serialize)]
pub struct UpdateArgs<'a> {
    pub space: &'a str,
    pub db: &'a str,
    pub collection: &'a str,
    pub id: &'a str,
    pub document: &'a Document,
}

#[derive(Debug, Serialize)]
pub struct DeleteArgs<'a> {
    pub space: &'a str,
    pub db: &'a str,
    pub collection: &'a str,
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GetArgs<'a> {
    pub space: &'a str,
    pub db: &'a str,
    pub collection: &'a str,
    pub id: &'a str,
}

/// Result of `jsondb_execute_query` / `jsondb_execute_sql`.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub documents: Vec<Document>,
    pub total_count: u64,
}
