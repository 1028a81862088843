use super::client::OpenAiHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use super::SERVICE;
use crate::ai::{decode_illustration, IllustrationService};
use crate::models::Illustration;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiIllustrationClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiIllustrationClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, Duration::from_secs(120), client),
            model,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl IllustrationService for OpenAiIllustrationClient {
    async fn illustrate(&self, prompt: &str) -> Result<Illustration> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            output_format: "jpeg".to_string(),
        };

        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        let data = response
            .data
            .first()
            .and_then(|image| image.b64_json.as_deref())
            .ok_or_else(|| Error::ai_provider(SERVICE, "No image data in response"))?;

        decode_illustration(SERVICE, data, None)
    }
}
