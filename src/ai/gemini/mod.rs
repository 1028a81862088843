pub mod chat;
pub mod client;
pub mod image;
pub mod types;

pub use chat::GeminiStoryPlanner;
pub use image::ImagenIllustrationClient;

/// Service tag used in Gemini error messages.
pub(crate) const SERVICE: &str = "Gemini";

#[cfg(test)]
macro_rules! impl_with_gemini_base_url {
    ($client:ty) => {
        impl $client {
            fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}

#[cfg(test)]
pub(crate) use impl_with_gemini_base_url;
