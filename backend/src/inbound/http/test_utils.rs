//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use serde_json::Value;

use crate::domain::ports::{
    MockSocialGraphCommand, MockSocialGraphQuery, MockUsersCommand, MockUsersQuery,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mocked driving ports; set expectations before handing them to
/// [`call_json`].
pub struct TestPorts {
    pub users_command: MockUsersCommand,
    pub users_query: MockUsersQuery,
    pub social_command: MockSocialGraphCommand,
    pub social_query: MockSocialGraphQuery,
}

impl TestPorts {
    pub fn new() -> Self {
        Self {
            users_command: MockUsersCommand::new(),
            users_query: MockUsersQuery::new(),
            social_command: MockSocialGraphCommand::new(),
            social_query: MockSocialGraphQuery::new(),
        }
    }

    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            users_command: Arc::new(self.users_command),
            users_query: Arc::new(self.users_query),
            social_command: Arc::new(self.social_command),
            social_query: Arc::new(self.social_query),
        })
    }
}

/// Send `request` through the API routes backed by `ports`, returning the
/// status and the JSON body (`Value::Null` when the body is empty).
pub async fn call_json(ports: TestPorts, request: TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}
