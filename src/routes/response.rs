use axum::Json;
use serde::Serialize;

/// `{ success, message?, ...data }`. The data fields are flattened in next to
/// `success`, so `Envelope<BlogsData>` renders as `{ "success": true, "blogs": [...] }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

/// Nothing beyond `success`/`message`.
#[derive(Debug, Serialize)]
pub struct Empty {}

pub type Reply<T = Empty> = Result<Json<Envelope<T>>, crate::error::BlogError>;

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: None,
        data: Some(data),
    })
}

pub fn ok_with_message<T: Serialize>(message: &str, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        message: Some(message.to_string()),
        data: Some(data),
    })
}

pub fn done(message: &str) -> Json<Envelope<Empty>> {
    Json(Envelope {
        success: true,
        message: Some(message.to_string()),
        data: None,
    })
}

pub fn failure(message: String) -> Json<Envelope<Empty>> {
    Json(Envelope {
        success: false,
        message: Some(message),
        data: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct ContentData {
        content: String,
    }

    #[test]
    fn flattens_data_next_to_success() {
        let Json(envelope) = ok(ContentData {
            content: "hello".into(),
        });

        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            serde_json::json!({ "success": true, "content": "hello" })
        );
    }

    #[test]
    fn failure_has_message_only() {
        let Json(envelope) = failure("nope".into());

        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            serde_json::json!({ "success": false, "message": "nope" })
        );
    }
}
