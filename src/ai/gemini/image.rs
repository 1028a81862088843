use super::client::GeminiHttpClient;
use super::types::{OutputOptions, PredictInstance, PredictParameters, PredictRequest, PredictResponse};
use crate::ai::{decode_illustration, IllustrationService, ILLUSTRATION_MIME_TYPE};
use crate::models::Illustration;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const SERVICE: &str = "Imagen";

/// Illustration client for Imagen models served through the Gemini API.
pub struct ImagenIllustrationClient {
    http: GeminiHttpClient,
}

impl ImagenIllustrationClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(ImagenIllustrationClient);

#[async_trait]
impl IllustrationService for ImagenIllustrationClient {
    async fn illustrate(&self, prompt: &str) -> Result<Illustration> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                output_options: OutputOptions {
                    mime_type: ILLUSTRATION_MIME_TYPE.to_string(),
                },
            },
        };

        let response: PredictResponse = self.http.predict(&request).await?;

        let prediction = response
            .predictions
            .first()
            .ok_or_else(|| Error::ai_provider(SERVICE, "No image generated for prompt"))?;
        let data = prediction
            .bytes_base64_encoded
            .as_deref()
            .ok_or_else(|| Error::ai_provider(SERVICE, "No image data in response"))?;

        tracing::debug!(
            "Imagen returned image with mime_type: {:?}",
            prediction.mime_type
        );

        decode_illustration(SERVICE, data, prediction.mime_type.as_deref())
    }
}
