//! Storage failures surface as 500 with the driver error hidden.

mod common;

use axum::http::StatusCode;
use common::{empty_request, json_request, send, setup_offline_app, student_payload};
use serde_json::json;

fn assert_hidden_storage_error(response: &common::TestResponse) {
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"error": "Database error occurred"}));
}

#[tokio::test]
async fn test_get_student_storage_failure() {
    let response = send(setup_offline_app(), empty_request("GET", "/students/1")).await;
    assert_hidden_storage_error(&response);
}

#[tokio::test]
async fn test_list_students_storage_failure() {
    let response = send(setup_offline_app(), empty_request("GET", "/students/")).await;
    assert_hidden_storage_error(&response);
    assert!(response.headers.get("x-total-count").is_none());
}

#[tokio::test]
async fn test_create_student_storage_failure() {
    let response = send(
        setup_offline_app(),
        json_request("POST", "/students/", &student_payload("Ivan", "Petrov", "B")),
    )
    .await;
    assert_hidden_storage_error(&response);
}

#[tokio::test]
async fn test_update_and_delete_storage_failure() {
    let response = send(
        setup_offline_app(),
        json_request("PUT", "/students/1", &student_payload("Ivan", "Petrov", "B")),
    )
    .await;
    assert_hidden_storage_error(&response);

    let response = send(setup_offline_app(), empty_request("DELETE", "/students/1")).await;
    assert_hidden_storage_error(&response);
}
