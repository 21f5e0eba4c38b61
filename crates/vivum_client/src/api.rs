use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use vivum_logging::vivum_debug;

use crate::chat::ChatAnswer;
use crate::request::SearchRequest;
use crate::types::{ApiError, ConversationId, JobId, StatusReport};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend surface the poller and chat layer consume. Test doubles
/// implement this instead of standing up a real server.
#[async_trait::async_trait]
pub trait VivumApi: Send + Sync {
    /// Creates an article-fetch job and returns its opaque id.
    async fn create_job(&self, request: &SearchRequest) -> Result<JobId, ApiError>;

    /// Reads the current status string for a job.
    async fn job_status(&self, job_id: &JobId) -> Result<StatusReport, ApiError>;

    /// Asks a question against a conversation over the fetched set.
    async fn send_query(
        &self,
        conversation: &ConversationId,
        question: &str,
    ) -> Result<ChatAnswer, ApiError>;
}

#[derive(Debug, Deserialize)]
struct JobCreated {
    topic_id: JobId,
}

/// Reqwest-backed implementation of [`VivumApi`].
#[derive(Debug, Clone)]
pub struct HttpVivumApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVivumApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl VivumApi for HttpVivumApi {
    async fn create_job(&self, request: &SearchRequest) -> Result<JobId, ApiError> {
        let response = self
            .client
            .post(self.url("/api/articles/fetch"))
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let created: JobCreated = Self::decode(response).await?;
        vivum_debug!("created fetch job {}", created.topic_id);
        Ok(created.topic_id)
    }

    async fn job_status(&self, job_id: &JobId) -> Result<StatusReport, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/articles/status/{job_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::decode(response).await
    }

    async fn send_query(
        &self,
        conversation: &ConversationId,
        question: &str,
    ) -> Result<ChatAnswer, ApiError> {
        let body = serde_json::json!({
            "conversation_id": conversation,
            "question": question,
        });
        let response = self
            .client
            .post(self.url("/api/chat/query"))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::decode(response).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}
