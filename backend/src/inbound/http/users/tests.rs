//! Tests for users API handlers.

use super::*;
use crate::domain::Error;
use crate::inbound::http::test_utils::{TestPorts, call_json};
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

fn user(id: i64, name: &str, age: i64) -> User {
    User::try_from_parts(id, name, age).expect("valid user")
}

#[rstest]
#[actix_web::test]
async fn create_user_returns_created_body() {
    let mut ports = TestPorts::new();
    ports
        .users_command
        .expect_create_user()
        .withf(|profile| profile.name.as_ref() == "Ada" && profile.age.get() == 21)
        .times(1)
        .return_once(|_| Ok(user(1, "Ada", 21)));

    let (status, payload) = call_json(
        ports,
        TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": "Ada", "age": 21})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payload, json!({"id": 1, "name": "Ada", "age": 21}));
}

#[rstest]
#[actix_web::test]
async fn every_invalid_field_is_reported() {
    let (status, payload) = call_json(
        TestPorts::new(),
        TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": "  ", "age": -4})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(payload["code"], "validation_failed");
    assert_eq!(payload["message"], "Validation Error");
    assert!(payload.get("errors").is_none(), "field errors live under details");
    let fields: Vec<&str> = payload["details"]["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["name", "age"]);
}

#[rstest]
#[case::missing_fields(json!({}))]
#[case::wrong_type(json!({"name": "Ada", "age": "old"}))]
#[actix_web::test]
async fn malformed_bodies_are_unprocessable(#[case] body: Value) {
    let (status, payload) = call_json(
        TestPorts::new(),
        TestRequest::post().uri("/api/v1/users").set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(payload["code"], "validation_failed");
}

#[rstest]
#[actix_web::test]
async fn list_users_returns_every_user() {
    let mut ports = TestPorts::new();
    ports
        .users_query
        .expect_list_users()
        .return_once(|| Ok(vec![user(1, "Ada", 21), user(2, "Bea", 33)]));

    let (status, payload) = call_json(ports, TestRequest::get().uri("/api/v1/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payload,
        json!([
            {"id": 1, "name": "Ada", "age": 21},
            {"id": 2, "name": "Bea", "age": 33}
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_user_is_not_found() {
    let mut ports = TestPorts::new();
    ports
        .users_query
        .expect_get_user()
        .with(eq(UserId::new(42)))
        .return_once(|id| Err(Error::not_found(format!("user {id} not found"))));

    let (status, payload) = call_json(ports, TestRequest::get().uri("/api/v1/users/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "user 42 not found");
}

#[rstest]
#[actix_web::test]
async fn non_numeric_id_is_bad_request() {
    let (status, payload) =
        call_json(TestPorts::new(), TestRequest::get().uri("/api/v1/users/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn update_user_returns_no_content() {
    let mut ports = TestPorts::new();
    ports
        .users_command
        .expect_update_user()
        .withf(|id, profile| *id == UserId::new(3) && profile.name.as_ref() == "Cy")
        .return_once(|_, _| Ok(user(3, "Cy", 50)));

    let (status, payload) = call_json(
        ports,
        TestRequest::put()
            .uri("/api/v1/users/3")
            .set_json(json!({"name": "Cy", "age": 50})),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(payload, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn delete_user_maps_store_outage_to_unavailable() {
    let mut ports = TestPorts::new();
    ports
        .users_command
        .expect_delete_user()
        .return_once(|_| Err(Error::service_unavailable("user repository unavailable")));

    let (status, payload) =
        call_json(ports, TestRequest::delete().uri("/api/v1/users/3")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(payload["code"], "service_unavailable");
}
