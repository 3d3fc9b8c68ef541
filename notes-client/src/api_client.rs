//! Typed HTTP client for the notes collection and analysis endpoints.

use async_trait::async_trait;
use notes_client_types::{
    ApiMessage, CreateNoteRequest, InvokeRequest, InvokeResponse, Note, UpdateNoteRequest,
};
use reqwest::{Client, Response};

use crate::config::Config;
use crate::error::{ClientError, ClientResult};

/// Remote side of the notes client. One method per remote call.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// `GET /notes`, in server order.
    async fn list_notes(&self) -> ClientResult<Vec<Note>>;
    /// `POST /notes`
    async fn create_note(&self, name: &str, content: &str) -> ClientResult<()>;
    /// `PUT /notes/{name}`, replacing content only.
    async fn update_note(&self, name: &str, content: &str) -> ClientResult<()>;
    /// `DELETE /notes/{name}`
    async fn delete_note(&self, name: &str) -> ClientResult<()>;
    /// `POST /invoke` and return the raw `result` value.
    async fn invoke(&self, input_text: &str) -> ClientResult<serde_json::Value>;
}

pub struct NotesApiClient {
    api_url: String,
    analysis_url: String,
    client: Client,
}

// ── Client impl ─────────────────────────────────────

impl NotesApiClient {
    pub fn new(config: &Config) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            analysis_url: config.analysis_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn note_url(&self, name: &str) -> String {
        format!("{}/notes/{}", self.api_url, urlencoding::encode(name))
    }
}

#[async_trait]
impl NotesBackend for NotesApiClient {
    async fn list_notes(&self) -> ClientResult<Vec<Note>> {
        let resp = self
            .client
            .get(format!("{}/notes", self.api_url))
            .send()
            .await?;

        let resp = ensure_success(resp).await?;
        resp.json::<Vec<Note>>()
            .await
            .map_err(|e| ClientError::Decode(format!("notes list: {}", e)))
    }

    async fn create_note(&self, name: &str, content: &str) -> ClientResult<()> {
        let body = CreateNoteRequest {
            name: name.to_string(),
            content: content.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/notes", self.api_url))
            .json(&body)
            .send()
            .await?;

        ensure_success(resp).await?;
        Ok(())
    }

    async fn update_note(&self, name: &str, content: &str) -> ClientResult<()> {
        let body = UpdateNoteRequest {
            content: content.to_string(),
        };

        let resp = self
            .client
            .put(self.note_url(name))
            .json(&body)
            .send()
            .await?;

        ensure_success(resp).await?;
        Ok(())
    }

    async fn delete_note(&self, name: &str) -> ClientResult<()> {
        let resp = self.client.delete(self.note_url(name)).send().await?;

        ensure_success(resp).await?;
        Ok(())
    }

    async fn invoke(&self, input_text: &str) -> ClientResult<serde_json::Value> {
        let body = InvokeRequest {
            input_text: input_text.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/invoke", self.analysis_url))
            .json(&body)
            .send()
            .await?;

        let resp = ensure_success(resp).await?;
        let parsed: InvokeResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("invoke response: {}", e)))?;
        Ok(parsed.result)
    }
}

/// Turn a non-2xx response into `ClientError::Status`, preferring the
/// server's `{"error": ...}` message over the raw body.
async fn ensure_success(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .ok()
        .and_then(|m| m.error)
        .unwrap_or_else(|| body.trim().to_string());

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
