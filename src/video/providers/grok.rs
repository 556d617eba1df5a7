//! Grok Imagine Video (xAI) image-to-video provider.

use crate::error::{classify_response, Error, Result};
use crate::video::provider::VideoProvider;
use crate::video::types::{GeneratedVideo, VideoGenerationRequest, VideoMetadata};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const SUBMIT_URL: &str = "https://api.x.ai/v1/videos/generations";
const RESULT_URL: &str = "https://api.x.ai/v1/videos";

/// Grok video model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrokVideoModel {
    /// Grok Imagine Video - xAI's video generation model.
    #[default]
    GrokImagineVideo,
}

impl GrokVideoModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrokImagineVideo => "grok-imagine-video",
        }
    }
}

/// Builder for GrokVideoProvider.
#[derive(Debug, Clone)]
pub struct GrokVideoProviderBuilder {
    api_key: Option<String>,
    model: GrokVideoModel,
    poll_interval: Duration,
    timeout: Duration,
}

impl Default for GrokVideoProviderBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GrokVideoModel::default(),
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(300),
        }
    }
}

impl GrokVideoProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Grok video model variant.
    pub fn model(mut self, model: GrokVideoModel) -> Self {
        self.model = model;
        self
    }

    /// Sets the polling interval while the job is pending.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the maximum time to wait for the job.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the provider. Fails if no API key was given.
    pub fn build(self) -> Result<GrokVideoProvider> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Auth("no xAI API key provided".into()))?;

        Ok(GrokVideoProvider {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
            poll_interval: self.poll_interval,
            timeout: self.timeout,
        })
    }
}

/// Grok Imagine Video generation provider.
pub struct GrokVideoProvider {
    client: reqwest::Client,
    api_key: String,
    model: GrokVideoModel,
    poll_interval: Duration,
    timeout: Duration,
}

impl GrokVideoProvider {
    /// Creates a new `GrokVideoProviderBuilder`.
    pub fn builder() -> GrokVideoProviderBuilder {
        GrokVideoProviderBuilder::new()
    }

    /// Submit a video generation request, returning the job id.
    async fn submit(&self, request: &VideoGenerationRequest) -> Result<String> {
        let body = GrokVideoRequest::from_request(request, &self.model);

        let response = self
            .client
            .post(SUBMIT_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(classify_response(status.as_u16(), &text, &headers));
        }

        let submit_response: GrokVideoSubmitResponse = response.json().await?;
        Ok(submit_response.request_id)
    }

    /// Poll until the job leaves the pending state.
    async fn poll_until_ready(&self, request_id: &str) -> Result<GrokVideoResultResponse> {
        let url = format!("{RESULT_URL}/{request_id}");
        let start = Instant::now();

        loop {
            if start.elapsed() > self.timeout {
                return Err(Error::Timeout(self.timeout));
            }

            let response = self
                .client
                .get(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .send()
                .await?;

            let status = response.status();

            // 202 means still processing
            if status.as_u16() == 202 {
                tracing::debug!(
                    request_id = %request_id,
                    elapsed_secs = start.elapsed().as_secs(),
                    "polling Grok video generation"
                );
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            if !status.is_success() {
                let headers = response.headers().clone();
                let text = response.text().await.unwrap_or_default();
                return Err(classify_response(status.as_u16(), &text, &headers));
            }

            let result: GrokVideoResultResponse = response.json().await?;
            if result.is_pending() {
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }
            return Ok(result);
        }
    }
}

#[async_trait]
impl VideoProvider for GrokVideoProvider {
    async fn generate(&self, request: &VideoGenerationRequest) -> Result<GeneratedVideo> {
        let start = Instant::now();

        let request_id = self.submit(request).await?;
        tracing::debug!(request_id = %request_id, "submitted video generation request");

        let result = self.poll_until_ready(&request_id).await?;
        let url = result.into_video_url()?;
        tracing::debug!(url = ?url, "video generation complete");

        Ok(GeneratedVideo {
            data: None,
            url,
            metadata: VideoMetadata {
                model: Some(self.model.as_str().to_string()),
                duration_ms: Some(start.elapsed().as_millis() as u64),
            },
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            let body = if text.trim().is_empty() {
                "Failed to download video".to_string()
            } else {
                format!("Failed to download video: {text}")
            };
            return Err(Error::api(status.as_u16(), &headers, &body));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn name(&self) -> &str {
        "Grok Imagine Video (xAI)"
    }
}

// Request/Response types
#[derive(Debug, Serialize)]
struct GrokVideoRequest {
    model: String,
    prompt: String,
    duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
    image: GrokVideoImage,
}

#[derive(Debug, Serialize)]
struct GrokVideoImage {
    url: String,
}

impl GrokVideoRequest {
    fn from_request(req: &VideoGenerationRequest, model: &GrokVideoModel) -> Self {
        Self {
            model: model.as_str().to_string(),
            prompt: req.prompt.clone(),
            duration: req.duration_secs,
            aspect_ratio: req.aspect_ratio.map(|ar| ar.as_str().to_string()),
            image: GrokVideoImage {
                url: req.source_data_uri(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GrokVideoSubmitResponse {
    request_id: String,
}

#[derive(Debug, Deserialize)]
struct GrokVideoResultResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    video: Option<GrokVideoResult>,
}

impl GrokVideoResultResponse {
    fn is_pending(&self) -> bool {
        self.video.is_none()
            && matches!(self.status.as_deref(), Some("pending") | Some("processing"))
    }

    /// The finished video's URL. A job that ended without a video carries its status into the error.
    fn into_video_url(self) -> Result<Option<String>> {
        match (self.video, self.status) {
            (Some(video), _) => Ok(video.url),
            (None, Some(status)) => Err(Error::UnexpectedResponse(format!(
                "video job ended with status {status}"
            ))),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GrokVideoResult {
    #[serde(default)]
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::AspectRatio;

    #[test]
    fn test_grok_video_model_as_str() {
        assert_eq!(
            GrokVideoModel::GrokImagineVideo.as_str(),
            "grok-imagine-video"
        );
    }

    #[test]
    fn test_builder_custom_timeouts() {
        let provider = GrokVideoProviderBuilder::new()
            .api_key("xai-test")
            .poll_interval(Duration::from_secs(5))
            .timeout(Duration::from_secs(600))
            .build()
            .unwrap();
        assert_eq!(provider.poll_interval, Duration::from_secs(5));
        assert_eq!(provider.timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_builder_requires_key() {
        assert!(matches!(
            GrokVideoProviderBuilder::new().build(),
            Err(Error::Auth(_))
        ));
    }

    #[test]
    fn test_request_construction() {
        let req = VideoGenerationRequest::new("Animate this", vec![1, 2, 3], 10)
            .with_aspect_ratio(AspectRatio::Portrait);
        let grok_req = GrokVideoRequest::from_request(&req, &GrokVideoModel::GrokImagineVideo);

        assert_eq!(grok_req.prompt, "Animate this");
        assert_eq!(grok_req.model, "grok-imagine-video");
        assert_eq!(grok_req.duration, 10);
        assert_eq!(grok_req.aspect_ratio.as_deref(), Some("9:16"));
        assert_eq!(grok_req.image.url, "data:image/png;base64,AQID");
    }

    #[test]
    fn test_submit_response_deserialization() {
        let json = r#"{"request_id": "vid-123"}"#;
        let resp: GrokVideoSubmitResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.request_id, "vid-123");
    }

    #[test]
    fn test_result_response_deserialization() {
        let json = r#"{"status": "done", "video": {"url": "https://example.com/video.mp4"}}"#;
        let resp: GrokVideoResultResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.is_pending());
        assert_eq!(
            resp.video.unwrap().url.as_deref(),
            Some("https://example.com/video.mp4")
        );

        let resp: GrokVideoResultResponse = serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert!(resp.is_pending());

        let resp: GrokVideoResultResponse = serde_json::from_str(r#"{"video": {}}"#).unwrap();
        assert!(!resp.is_pending());
        assert!(resp.video.unwrap().url.is_none());
    }

    #[test]
    fn test_terminal_status_without_video_is_an_error() {
        for status in ["failed", "expired"] {
            let json = format!(r#"{{"status": "{status}"}}"#);
            let resp: GrokVideoResultResponse = serde_json::from_str(&json).unwrap();
            assert!(!resp.is_pending());
            match resp.into_video_url() {
                Err(Error::UnexpectedResponse(msg)) => {
                    assert_eq!(msg, format!("video job ended with status {status}"));
                }
                other => panic!("expected UnexpectedResponse, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_finished_job_yields_url() {
        let json = r#"{"status": "done", "video": {"url": "https://example.com/v.mp4"}}"#;
        let resp: GrokVideoResultResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.into_video_url().unwrap().as_deref(),
            Some("https://example.com/v.mp4")
        );

        let resp: GrokVideoResultResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_video_url().unwrap().is_none());
    }
}
