//! Grok Imagine (xAI) image generation provider.

use crate::error::{classify_response, Error, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{GeneratedImage, GenerationMetadata, GenerationRequest};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Instant;

const GENERATIONS_URL: &str = "https://api.x.ai/v1/images/generations";

/// Grok Imagine model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrokModel {
    /// Grok Imagine - xAI's image generation model.
    #[default]
    GrokImagine,
}

impl GrokModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GrokImagine => "grok-imagine-image",
        }
    }
}

/// Builder for GrokProvider.
#[derive(Debug, Clone, Default)]
pub struct GrokProviderBuilder {
    api_key: Option<String>,
    model: GrokModel,
}

impl GrokProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the Grok model variant.
    pub fn model(mut self, model: GrokModel) -> Self {
        self.model = model;
        self
    }

    /// Builds the provider. Fails if no API key was given.
    pub fn build(self) -> Result<GrokProvider> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Auth("no xAI API key provided".into()))?;

        Ok(GrokProvider {
            client: reqwest::Client::new(),
            api_key,
            model: self.model,
        })
    }
}

/// Grok Imagine image generation provider.
pub struct GrokProvider {
    client: reqwest::Client,
    api_key: String,
    model: GrokModel,
}

impl GrokProvider {
    /// Creates a new `GrokProviderBuilder`.
    pub fn builder() -> GrokProviderBuilder {
        GrokProviderBuilder::new()
    }

    /// Turns one `data[]` entry into image bytes, downloading when only a URL came back.
    async fn resolve_image_data(&self, image_data: GrokImageData) -> Result<Vec<u8>> {
        if let Some(b64) = image_data.b64_json {
            return base64::engine::general_purpose::STANDARD
                .decode(b64.trim())
                .map_err(|e| Error::Decode(e.to_string()));
        }

        if let Some(url) = image_data.url {
            tracing::debug!(url = %url, "downloading image from URL");
            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let headers = response.headers().clone();
                let text = response.text().await.unwrap_or_default();
                return Err(Error::api(status.as_u16(), &headers, &text));
            }
            return Ok(response.bytes().await?.to_vec());
        }

        Err(Error::UnexpectedResponse(
            "Grok response contained no image data".into(),
        ))
    }
}

#[async_trait]
impl ImageProvider for GrokProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        let start = Instant::now();
        let body = GrokRequest::from_generation_request(request, &self.model);

        tracing::debug!(model = %body.model, n = body.n, "submitting image generation");

        let response = self
            .client
            .post(GENERATIONS_URL)
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

        let grok_response: GrokResponse = response.json().await?;
        if grok_response.data.is_empty() {
            return Err(Error::UnexpectedResponse(
                "No images in Grok response. The model may not have generated output for this prompt.".into(),
            ));
        }

        let mut images = Vec::with_capacity(grok_response.data.len());
        for image_data in grok_response.data {
            let data = self.resolve_image_data(image_data).await?;
            images.push(GeneratedImage::from_bytes(
                data,
                GenerationMetadata {
                    model: Some(self.model.as_str().to_string()),
                    duration_ms: None,
                },
            ));
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        for image in &mut images {
            image.metadata.duration_ms = Some(duration_ms);
        }

        tracing::debug!(count = images.len(), duration_ms, "image generation complete");
        Ok(images)
    }

    fn name(&self) -> &str {
        "Grok Imagine (xAI)"
    }
}

#[derive(Debug, Serialize)]
struct GrokRequest {
    model: String,
    prompt: String,
    n: i32,
    response_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
}

impl GrokRequest {
    fn from_generation_request(req: &GenerationRequest, model: &GrokModel) -> Self {
        Self {
            model: model.as_str().to_string(),
            prompt: req.prompt.clone(),
            n: req.count,
            response_format: "b64_json".to_string(),
            aspect_ratio: req.aspect_ratio.map(|ar| ar.as_str().to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GrokResponse {
    #[serde(default)]
    data: Vec<GrokImageData>,
}

#[derive(Debug, Deserialize)]
struct GrokImageData {
    /// Base64-encoded image (when response_format is b64_json)
    #[serde(default)]
    b64_json: Option<String>,
    /// Image URL (when response_format is url)
    #[serde(default)]
    url: Option<String>,
}
