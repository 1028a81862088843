pub mod chat;
pub mod client;
pub mod image;
pub mod types;

pub use chat::OpenAiStoryPlanner;
pub use image::OpenAiIllustrationClient;

/// Service tag used in OpenAI error messages.
pub(crate) const SERVICE: &str = "OpenAI";
