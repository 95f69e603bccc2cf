mod common;

use common::{StubTransport, client, doc};
use serde_json::json;

use vellum_client::{ClientError, protocol};
use vellum_query::{ComparisonOp, Query, SortOrder};

// ── Query execution ─────────────────────────────────────────────

#[tokio::test]
async fn execute_issues_one_call_with_full_query_shape() {
    let stub = StubTransport::new();
    stub.push_ok(json!({
        "documents": [
            { "id": "a-2", "name": "Globex" },
            { "id": "a-1", "name": "Acme" },
        ],
        "total_count": 2,
    }));
    let client = client(&stub);

    let query = Query::builder("accounts")
        .filter("status", ComparisonOp::Eq, "active")
        .order_by("name", SortOrder::Asc)
        .limit(10)
        .offset(20)
        .build();
    let documents = client.execute(&query).await.unwrap();

    // backend order comes back untouched
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0], doc(json!({ "id": "a-2", "name": "Globex" })));
    assert_eq!(documents[1], doc(json!({ "id": "a-1", "name": "Acme" })));

    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    let (command, args) = &calls[0];
    assert_eq!(command, protocol::EXECUTE_QUERY);
    assert_eq!(
        *args,
        json!({
            "space": "un2",
            "db": "_system",
            "query": {
                "collection": "accounts",
                "filter": { "op": "eq", "field": "status", "value": "active" },
                "sort": [{ "field": "name", "order": "asc" }],
                "limit": 10,
                "offset": 20,
            },
        })
    );
}

#[tokio::test]
async fn filterless_query_serializes_without_filter_member() {
    let stub = StubTransport::new();
    let client = client(&stub);

    client
        .execute(&Query::builder("accounts").build())
        .await
        .unwrap();

    let calls = stub.calls();
    assert_eq!(calls[0].1["query"], json!({ "collection": "accounts" }));
}

#[tokio::test]
async fn latest_prepends_created_at_and_forces_limit_one() {
    let stub = StubTransport::new();
    let client = client(&stub);

    let query = Query::builder("accounts")
        .filter("owner", ComparisonOp::Eq, "alice")
        .order_by("name", SortOrder::Asc)
        .build();
    client.execute_latest(&query).await.unwrap();

    let calls = stub.calls();
    let sent = &calls[0].1["query"];
    assert_eq!(
        sent["sort"],
        json!([
            { "field": "created_at", "order": "desc" },
            { "field": "name", "order": "asc" },
        ])
    );
    assert_eq!(sent["limit"], json!(1));
}

#[tokio::test]
async fn latest_keeps_an_explicit_limit() {
    let stub = StubTransport::new();
    let client = client(&stub);

    let query = Query::builder("accounts").limit(5).build();
    client.execute_latest(&query).await.unwrap();

    let calls = stub.calls();
    let sent = &calls[0].1["query"];
    assert_eq!(sent["limit"], json!(5));
    assert_eq!(sent["sort"], json!([{ "field": "created_at", "order": "desc" }]));
}

#[tokio::test]
async fn latest_does_not_mutate_the_callers_query() {
    let stub = StubTransport::new();
    let client = client(&stub);

    let query = Query::builder("accounts").build();
    client.execute_latest(&query).await.unwrap();

    assert!(query.sort.is_empty());
    assert_eq!(query.limit, None);
}

// ── Faults ──────────────────────────────────────────────────────

#[tokio::test]
async fn backend_fault_propagates_without_retry() {
    let stub = StubTransport::new();
    stub.push_err("unknown collection: nope");
    let client = client(&stub);

    let err = client
        .execute(&Query::builder("nope").build())
        .await
        .unwrap_err();

    match err {
        ClientError::Backend(msg) => assert_eq!(msg, "unknown collection: nope"),
        other => panic!("expected Backend, got {other:?}"),
    }
    assert_eq!(stub.calls().len(), 1);
}

#[tokio::test]
async fn uninterpretable_response_is_a_fault_not_an_empty_result() {
    let stub = StubTransport::new();
    stub.push_ok(json!({ "rows": [] }));
    let client = client(&stub);

    let err = client
        .execute(&Query::builder("accounts").build())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Malformed(_)));
}

// ── Raw-dialect path ────────────────────────────────────────────

#[tokio::test]
async fn execute_sql_sends_the_raw_statement() {
    let stub = StubTransport::new();
    stub.push_ok(json!({
        "documents": [{ "id": "a-1", "name": "Acme" }],
        "total_count": 1,
    }));
    let client = client(&stub);

    let documents = client
        .execute_sql("SELECT * FROM accounts WHERE status = 'active'")
        .await
        .unwrap();

    assert_eq!(documents.len(), 1);
    let calls = stub.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, protocol::EXECUTE_SQL);
    assert_eq!(
        calls[0].1,
        json!({
            "space": "un2",
            "db": "_system",
            "sql": "SELECT * FROM accounts WHERE status = 'active'",
        })
    );
}

// ── Single-document reads ───────────────────────────────────────

#[tokio::test]
async fn get_document_found_and_absent() {
    let stub = StubTransport::new();
    stub.push_ok(json!({ "id": "a-1", "name": "Acme" }));
    let client = client(&stub);

    let found = client.get_document("accounts", "a-1").await.unwrap();
    assert_eq!(found, Some(doc(json!({ "id": "a-1", "name": "Acme" }))));

    // script is dry: the stub answers null, the wire form of "absent"
    let absent = client.get_document("accounts", "a-404").await.unwrap();
    assert_eq!(absent, None);

    let calls = stub.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, protocol::GET_DOCUMENT);
    assert_eq!(
        calls[0].1,
        json!({ "space": "un2", "db": "_system", "collection": "accounts", "id": "a-1" })
    );
}
