use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use super::SERVICE;
use crate::ai::StoryPlanner;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PlanRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: PlanGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanGenerationConfig {
    response_mime_type: String,
}

/// Story planner backed by Gemini `generateContent` in JSON mode.
pub struct GeminiStoryPlanner {
    http: GeminiHttpClient,
}

impl GeminiStoryPlanner {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(60),
                client,
            ),
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            let text: String = c
                .content
                .parts
                .iter()
                .filter_map(|p| match p {
                    Part::Text { text } => Some(text.as_str()),
                    Part::InlineData { .. } => None,
                })
                .collect();
            (!text.is_empty()).then_some(text)
        })
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiStoryPlanner);

#[async_trait]
impl StoryPlanner for GeminiStoryPlanner {
    async fn plan_story(&self, topic: &str) -> Result<String> {
        let request = PlanRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: prompts::story_plan(topic),
                }],
            }],
            generation_config: PlanGenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        tracing::debug!("Requesting story plan from {}", self.http.model());
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Self::extract_text(&response)
            .ok_or_else(|| Error::ai_provider(SERVICE, "No text in story plan response"))
    }
}
