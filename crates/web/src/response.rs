use std::fmt::Debug;

use axum::{
    body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JSON body shared by every API response: `{"_status": 200, "data": ...}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EncapsulatedResponse<T> {
    #[serde(rename = "_status", with = "http_serde::status_code")]
    status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EncapsulatedResponseError<E> {
    #[serde(rename = "_status", with = "http_serde::status_code")]
    status_code: StatusCode,

    error: Option<E>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EncapsulatedJson<T>(pub EncapsulatedResponse<T>);

impl EncapsulatedJson<()> {
    /// Body-less `200 OK` acknowledgement.
    #[inline]
    #[must_use]
    pub const fn acknowledged() -> Self {
        Self(EncapsulatedResponse { status_code: StatusCode::OK, data: None })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EncapsulatedJsonError<E>(pub EncapsulatedResponseError<E>);

impl<E> EncapsulatedJsonError<E> {
    #[inline]
    #[must_use]
    pub const fn err(error: E) -> Self {
        Self(EncapsulatedResponseError {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error: Some(error),
        })
    }

    #[inline]
    #[must_use]
    pub const fn status_code(mut self, status_code: StatusCode) -> Self {
        self.0.status_code = status_code;
        self
    }
}

impl<T> IntoResponse for EncapsulatedJson<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        json_body_response(self.0.status_code, &self.0)
    }
}

impl<E> IntoResponse for EncapsulatedJsonError<E>
where
    E: Debug + Serialize,
{
    fn into_response(self) -> Response {
        json_body_response(self.0.status_code, &self.0)
    }
}

fn json_body_response<B: Serialize>(status_code: StatusCode, body: &B) -> Response {
    let body = body::Body::from(serde_json::to_vec(body).expect("body is serializable"));

    Response::builder()
        .status(status_code)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(body)
        .expect("Build `Axum` response successfully; qed")
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Error {
    #[serde(rename = "type")]
    pub type_: ErrorType,

    pub message: String,

    #[serde(flatten, skip_serializing_if = "IndexMap::is_empty")]
    pub additional_fields: IndexMap<String, serde_json::Value>,
}

impl Error {
    #[inline]
    #[must_use]
    pub fn new(type_: ErrorType, message: impl Into<String>) -> Self {
        Self { type_, message: message.into(), additional_fields: IndexMap::default() }
    }
}

#[macro_export]
macro_rules! json_response {
    (status: $status:expr,error: $error:expr) => {
        $crate::response::EncapsulatedJsonError::<_>::err($error)
            .status_code($status)
            .into_response()
    };

    (reason: $reason:expr,status: $status:expr,error: $error:expr) => {{
        if $status == ::axum::http::StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(status_code = $status.as_u16(), "Internal Server Error: {:?}", $reason);
        } else {
            tracing::warn!(status_code = $status.as_u16(), "Response Error: {:?}", $reason);
        }

        $crate::json_response! { status: $status, error: $error }
    }};
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    Internal,
    NotFound,
    BadRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgement_body() {
        let body = serde_json::to_value(&EncapsulatedJson::<()>::acknowledged().0).unwrap();
        assert_eq!(body, serde_json::json!({ "_status": 200 }));
    }

    #[test]
    fn test_error_body() {
        let error = EncapsulatedJsonError::err(Error::new(ErrorType::BadRequest, "empty body"))
            .status_code(StatusCode::BAD_REQUEST);
        let body = serde_json::to_value(&error.0).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "_status": 400,
                "error": { "type": "BAD_REQUEST", "message": "empty body" }
            })
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = EncapsulatedJson::<()>::acknowledged().into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = json_response! {
            status: StatusCode::NOT_FOUND,
            error: Error::new(ErrorType::NotFound, "No route for /missing")
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            mime::APPLICATION_JSON.as_ref()
        );
    }
}
