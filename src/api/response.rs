use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

/// Envelope wrapped around every response body.
#[derive(Debug, Serialize)]
pub struct BodyResponse<T: Serialize> {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "serverTime")]
    pub server_time: i64,
}

impl<T: Serialize> BodyResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        let message = message.into();
        Self {
            code: status.canonical_reason().unwrap_or_default().to_string(),
            message: (!message.is_empty()).then_some(message),
            data,
            server_time: Utc::now().timestamp_millis(),
        }
    }
}

pub fn json_with_code<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status).json(BodyResponse::new(status, message, data))
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    json_with_code(StatusCode::OK, message, Some(data))
}

pub fn ok_message(message: impl Into<String>) -> HttpResponse {
    json_with_code::<()>(StatusCode::OK, message, None)
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    json_with_code(StatusCode::CREATED, message, Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn envelope_uses_reason_phrase_and_epoch_millis() {
        let before = Utc::now().timestamp_millis();
        let body = BodyResponse::new(StatusCode::CREATED, "done", Some(json!({"id": 1})));

        assert_eq!(body.code, "Created");
        assert_eq!(body.message.as_deref(), Some("done"));
        assert!(body.server_time >= before);
    }

    #[test]
    fn empty_message_and_data_are_omitted() {
        let body = BodyResponse::<()>::new(StatusCode::NOT_FOUND, "", None);
        let value: Value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["code"], "Not Found");
        assert!(value.get("message").is_none());
        assert!(value.get("data").is_none());
        assert!(value["serverTime"].is_i64());
    }

    #[test]
    fn helpers_set_status() {
        assert_eq!(ok("fine", 1).status(), StatusCode::OK);
        assert_eq!(created("made", 1).status(), StatusCode::CREATED);
        assert_eq!(ok_message("gone").status(), StatusCode::OK);
    }
}
