//! AI service integration for story planning and illustration
//!
//! Provides the collaborator traits used by the storyteller plus Gemini
//! (text + Imagen) and OpenAI implementations of them.

pub mod gemini;
pub mod mime;
pub mod mock;
pub mod openai;

pub use gemini::{GeminiStoryPlanner, ImagenIllustrationClient};
pub use mock::{MockIllustrationClient, MockStoryPlanner};
pub use openai::{OpenAiIllustrationClient, OpenAiStoryPlanner};

use crate::models::Illustration;
use crate::Result;
use async_trait::async_trait;

/// Output encoding requested from every image service.
pub const ILLUSTRATION_MIME_TYPE: &str = "image/jpeg";

/// Drafts a story plan for a topic.
#[async_trait]
pub trait StoryPlanner: Send + Sync {
    /// Issue one planning request and return the raw completion text.
    async fn plan_story(&self, topic: &str) -> Result<String>;
}

/// Renders one image for an illustration prompt.
#[async_trait]
pub trait IllustrationService: Send + Sync {
    async fn illustrate(&self, prompt: &str) -> Result<Illustration>;
}

/// Decode a base64 image payload, trusting `reported_mime` when present.
pub(crate) fn decode_illustration(
    service: &str,
    data: &str,
    reported_mime: Option<&str>,
) -> Result<Illustration> {
    use base64::Engine as _;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| {
            crate::Error::ai_provider(service, format!("Failed to decode base64 image: {}", e))
        })?;

    let mime_type = match reported_mime.filter(|m| m.starts_with("image/")) {
        Some(mime) => mime.to_string(),
        None => mime::detect_image_mime(&bytes).to_string(),
    };

    Ok(Illustration::new(bytes, mime_type))
}
