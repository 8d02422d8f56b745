use httpmock::prelude::*;
use pharmacy::{
    backend::{ApiError, CatalogBackend, HttpBackend, OrderBackend},
    catalog::Medicine,
    orders::OrderLineItem,
};
use serde_json::json;

#[tokio::test]
async fn lists_medicines() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/medicines");
            then.status(200).json_body(json!([
                { "_id": "1", "name": "Paracetamol" },
                { "_id": "2", "name": "Ibuprofen" }
            ]));
        })
        .await;

    let backend = HttpBackend::new(server.base_url());
    let medicines = backend.list_medicines().await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        medicines,
        vec![
            Medicine::new("1", "Paracetamol"),
            Medicine::new("2", "Ibuprofen")
        ]
    );
}

#[tokio::test]
async fn creates_medicine_with_name_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/medicines")
                .json_body(json!({ "name": "Cetirizine" }));
            then.status(201)
                .json_body(json!({ "_id": "9", "name": "Cetirizine" }));
        })
        .await;

    let backend = HttpBackend::new(server.base_url());
    let created = backend.create_medicine("Cetirizine").await.unwrap();

    mock.assert_async().await;
    assert_eq!(created, Medicine::new("9", "Cetirizine"));
}

#[tokio::test]
async fn updates_medicine_by_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/medicines/9")
                .json_body(json!({ "name": "Cetirizine 10mg" }));
            then.status(200)
                .json_body(json!({ "_id": "9", "name": "Cetirizine 10mg" }));
        })
        .await;

    let backend = HttpBackend::new(format!("{}/", server.base_url()));
    let updated = backend.update_medicine("9", "Cetirizine 10mg").await.unwrap();

    mock.assert_async().await;
    assert_eq!(updated.name, "Cetirizine 10mg");
}

#[tokio::test]
async fn delete_accepts_empty_success_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/medicines/9");
            then.status(204);
        })
        .await;

    let backend = HttpBackend::new(server.base_url());
    backend.delete_medicine("9").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn persists_order_lines_in_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/orders").json_body(json!({
                "medicines": [
                    { "name": "Paracetamol", "quantity": 2 },
                    { "name": "Ibuprofen", "quantity": 1 }
                ]
            }));
            then.status(201).body("{}");
        })
        .await;

    let backend = HttpBackend::new(server.base_url());
    backend
        .persist_order(&[
            OrderLineItem::new("Paracetamol", 2),
            OrderLineItem::new("Ibuprofen", 1),
        ])
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_a_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/orders");
            then.status(500).body("database down");
        })
        .await;

    let backend = HttpBackend::new(server.base_url());
    let err = backend
        .persist_order(&[OrderLineItem::new("Paracetamol", 2)])
        .await
        .unwrap_err();

    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/medicines");
            then.status(200).body("not json");
        })
        .await;

    let backend = HttpBackend::new(server.base_url());
    let err = backend.list_medicines().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}
