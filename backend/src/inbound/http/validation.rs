//! Shared validation helpers for inbound HTTP adapters.
//!
//! Body validation collects every field failure before responding, so a
//! request with a blank name and a negative age reports both. Extractor
//! failures are routed through the same domain error type as handler errors.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserId};

/// Message used for every body validation failure.
pub(crate) const VALIDATION_MESSAGE: &str = "Validation Error";

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct FieldError {
    field: String,
    message: String,
}

/// Accumulates field-level failures for a single request body.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.as_str().to_owned(),
            message: message.into(),
        });
    }

    /// Record `field` as missing and return `None`.
    pub(crate) fn require<T>(&mut self, field: FieldName, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, format!("{} is required", field.as_str()));
        }
        value
    }

    /// Keep the `Ok` value, recording the error message under `field`.
    pub(crate) fn check<T, E: std::fmt::Display>(
        &mut self,
        field: FieldName,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err.to_string());
                None
            }
        }
    }

    /// Turn the collected failures into a `validation_failed` error.
    pub(crate) fn into_error(self) -> Error {
        Error::validation_failed(VALIDATION_MESSAGE).with_details(json!({ "errors": self.errors }))
    }
}

/// Build a single-field `validation_failed` error.
pub(crate) fn field_error(field: FieldName, message: impl Into<String>) -> Error {
    let mut errors = FieldErrors::new();
    errors.push(field, message);
    errors.into_error()
}

/// Parse a follower identifier supplied as a query parameter or header.
pub(crate) fn parse_follower_id(field: FieldName, raw: &str) -> Result<UserId, Error> {
    raw.trim()
        .parse::<i64>()
        .map(UserId::new)
        .map_err(|_| {
            Error::invalid_request(format!("'{}' must be an integer", field.as_str()))
                .with_details(json!({ "field": field.as_str(), "value": raw }))
        })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    let message = match &err {
        JsonPayloadError::Deserialize(inner) => inner.to_string(),
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        other => other.to_string(),
    };
    field_error(FieldName::new("body"), message).into()
}

fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed path parameter");
    Error::invalid_request("user id must be an integer").into()
}

fn query_error_handler(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed query string");
    Error::invalid_request(err.to_string()).into()
}

/// JSON extractor configuration mapping body errors to `validation_failed`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration mapping bad identifiers to `invalid_request`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

/// Query extractor configuration mapping bad query strings to `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
