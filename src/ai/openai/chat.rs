use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use super::SERVICE;
use crate::ai::StoryPlanner;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Story planner backed by OpenAI chat completions.
///
/// JSON object mode cannot return a top-level array, so the plan comes back
/// as plain text and relies on the fence extractor downstream.
pub struct OpenAiStoryPlanner {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiStoryPlanner {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, Duration::from_secs(60), client),
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
impl StoryPlanner for OpenAiStoryPlanner {
    async fn plan_story(&self, topic: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompts::story_plan(topic)),
            }],
            max_completion_tokens: 4000,
        };

        let response = self.http.chat_completion(request).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| Error::ai_provider(SERVICE, "No response from chat API"))?;
        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!("Story plan was truncated at the token limit");
        }

        choice
            .message
            .content
            .clone()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| Error::ai_provider(SERVICE, "Empty story plan response"))
    }
}
