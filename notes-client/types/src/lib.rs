//! Wire types for the notes collection and analysis endpoints.

use serde::{Deserialize, Serialize};

// =====================================================
// Notes Resource
// =====================================================

/// A named piece of text. `name` is the addressing key on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl Note {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Body of `POST /notes`
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub name: String,
    pub content: String,
}

/// Body of `PUT /notes/{name}`
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: String,
}

/// Acknowledgement or failure body returned by the notes server.
///
/// Success responses carry `message`, failures carry `error`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            message: Some(msg.into()),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Analysis Resource
// =====================================================

/// Body of `POST /invoke`
#[derive(Debug, Serialize, Deserialize)]
pub struct InvokeRequest {
    #[serde(rename = "inputText")]
    pub input_text: String,
}

/// Response of `POST /invoke`. The model result is usually a string but
/// may be any JSON value.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invoke_request_uses_camel_case_field() {
        let body = serde_json::to_value(InvokeRequest {
            input_text: "hello".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "inputText": "hello" }));
    }

    #[test]
    fn invoke_response_accepts_structured_result() {
        let resp: InvokeResponse =
            serde_json::from_value(json!({ "result": { "points": ["a", "b"] } })).unwrap();
        assert!(resp.result.is_object());
    }

    #[test]
    fn api_message_skips_missing_fields() {
        let body = serde_json::to_value(ApiMessage::err("duplicate entry")).unwrap();
        assert_eq!(body, json!({ "error": "duplicate entry" }));
    }

    #[test]
    fn note_tolerates_missing_content() {
        let note: Note = serde_json::from_value(json!({ "name": "todo" })).unwrap();
        assert_eq!(note, Note::new("todo", ""));
    }
}
