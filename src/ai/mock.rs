use super::{IllustrationService, StoryPlanner, ILLUSTRATION_MIME_TYPE};
use crate::models::Illustration;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Smallest JPEG-looking payload returned when no image is configured.
const DEFAULT_IMAGE: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xD9];

#[derive(Clone)]
pub struct MockStoryPlanner {
    responses: Arc<Mutex<Vec<String>>>,
    error: Arc<Mutex<Option<String>>>,
    topics: Arc<Mutex<Vec<String>>>,
}

impl MockStoryPlanner {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            topics: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_plan_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Fail every call with a collaborator error carrying `message`.
    pub fn with_error(self, message: String) -> Self {
        *self.error.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.topics.lock().unwrap().len()
    }

    pub fn get_topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

impl Default for MockStoryPlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryPlanner for MockStoryPlanner {
    async fn plan_story(&self, topic: &str) -> Result<String> {
        let count = {
            let mut topics = self.topics.lock().unwrap();
            topics.push(topic.to_string());
            topics.len()
        };

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(Error::ai_provider("Gemini", message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(serde_json::json!([
                { "sentence": format!("Tiny cats explain {}.", topic), "image_prompt": "a tiny cat" }
            ])
            .to_string())
        } else {
            let index = (count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[derive(Clone)]
pub struct MockIllustrationClient {
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockIllustrationClient {
    pub fn new() -> Self {
        Self {
            images: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, prompt: String, image: Vec<u8>) -> Self {
        self.images.lock().unwrap().insert(prompt, image);
        self
    }

    /// Make requests for `prompt` fail.
    pub fn with_failure(self, prompt: String) -> Self {
        self.failing.lock().unwrap().insert(prompt);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts in the order they were requested.
    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockIllustrationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IllustrationService for MockIllustrationClient {
    async fn illustrate(&self, prompt: &str) -> Result<Illustration> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self.failing.lock().unwrap().contains(prompt) {
            return Err(Error::ai_provider(
                "Imagen",
                format!("Image generation failed for '{}'", prompt),
            ));
        }

        let bytes = self
            .images
            .lock()
            .unwrap()
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| DEFAULT_IMAGE.to_vec());
        Ok(Illustration::new(bytes, ILLUSTRATION_MIME_TYPE))
    }
}
