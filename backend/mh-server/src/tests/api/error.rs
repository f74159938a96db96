use crate::ApiError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_invalid_json_when_rendered_then_400_with_fixed_message() {
    let error = ApiError::InvalidJson {
        detail: "EOF while parsing an object at line 1 column 16".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid json");
    assert_eq!(json["code"], "INVALID_JSON");
    assert!(json.get("field").is_none());
}

#[tokio::test]
async fn given_validation_error_when_rendered_then_400_with_field() {
    let error = ApiError::validation("uso_disco", "uso_disco must be between 0 and 100");

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "uso_disco");
    assert_eq!(json["error"], "uso_disco must be between 0 and 100");
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_500_without_details() {
    let error = ApiError::Internal {
        message: "serializer exploded".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "internal error");
}

#[test]
fn given_validation_error_when_displayed_then_includes_message() {
    let error = ApiError::validation("uso_cpu", "out of range");

    assert!(error.to_string().contains("Validation failed: out of range"));
}
