//! Data models and structures
//!
//! Defines narration units, illustrations, slides, and the runtime
//! configuration for the text and image generation services.

use base64::Engine as _;
use serde_json::Value;
use std::str::FromStr;

/// One caption plus the instruction used to illustrate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationUnit {
    pub caption: String,
    pub illustration_prompt: String,
}

impl NarrationUnit {
    pub fn new(caption: impl Into<String>, illustration_prompt: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            illustration_prompt: illustration_prompt.into(),
        }
    }

    /// Read a unit out of one plan element.
    ///
    /// Returns `None` unless both `sentence` and `image_prompt` are
    /// non-empty strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let caption = non_empty_str(value.get("sentence")?)?;
        let illustration_prompt = non_empty_str(value.get("image_prompt")?)?;
        Some(Self::new(caption, illustration_prompt))
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// A decoded generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Illustration {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Illustration {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// `data:<mime>;base64,<bytes>` suitable for an image source.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// One rendered illustration with its formatted caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub caption: String,
    pub caption_html: String,
    pub illustration: Illustration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Gemini,
    OpenAi,
}

impl AiProvider {
    pub fn default_text_model(self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini-2.5-flash-preview-04-17",
            AiProvider::OpenAi => "gpt-4.1-mini",
        }
    }

    pub fn default_image_model(self) -> &'static str {
        match self {
            AiProvider::Gemini => "imagen-3.0-generate-002",
            AiProvider::OpenAi => "gpt-image-1",
        }
    }
}

impl FromStr for AiProvider {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(AiProvider::Gemini),
            "openai" => Ok(AiProvider::OpenAi),
            other => Err(crate::Error::Config(format!(
                "Unknown AI provider '{}'. Expected 'gemini' or 'openai'",
                other
            ))),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub text_provider: AiProvider,
    pub text_model: String,
    pub image_provider: AiProvider,
    pub image_model: String,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let text_provider = var("STORY_TEXT_PROVIDER")
            .map(|v| v.parse::<AiProvider>())
            .transpose()?
            .unwrap_or(AiProvider::Gemini);
        let image_provider = var("STORY_IMAGE_PROVIDER")
            .map(|v| v.parse::<AiProvider>())
            .transpose()?
            .unwrap_or(AiProvider::Gemini);

        let config = Self {
            text_provider,
            text_model: var("STORY_TEXT_MODEL")
                .unwrap_or_else(|| text_provider.default_text_model().to_string()),
            image_provider,
            image_model: var("STORY_IMAGE_MODEL")
                .unwrap_or_else(|| image_provider.default_image_model().to_string()),
            gemini_api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            openai_api_key: var("OPENAI_API_KEY"),
        };

        config.api_key_for(text_provider)?;
        config.api_key_for(image_provider)?;
        Ok(config)
    }

    pub fn api_key_for(&self, provider: AiProvider) -> crate::Result<String> {
        let (key, name) = match provider {
            AiProvider::Gemini => (&self.gemini_api_key, "GEMINI_API_KEY"),
            AiProvider::OpenAi => (&self.openai_api_key, "OPENAI_API_KEY"),
        };
        key.clone()
            .ok_or_else(|| crate::Error::Config(format!("{} not set", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_unit_from_value_reads_both_fields() {
        let unit = NarrationUnit::from_value(&json!({"sentence": "A", "image_prompt": "p1"}));
        assert_eq!(unit, Some(NarrationUnit::new("A", "p1")));
    }

    #[test]
    fn test_unit_from_value_rejects_missing_or_empty_fields() {
        assert!(NarrationUnit::from_value(&json!({"sentence": "A"})).is_none());
        assert!(NarrationUnit::from_value(&json!({"image_prompt": "p1"})).is_none());
        assert!(NarrationUnit::from_value(&json!({"sentence": "", "image_prompt": "p1"})).is_none());
        assert!(NarrationUnit::from_value(&json!({"sentence": "A", "image_prompt": 3})).is_none());
        assert!(NarrationUnit::from_value(&json!("just text")).is_none());
    }

    #[test]
    fn test_data_uri() {
        let illustration = Illustration::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg");
        assert_eq!(illustration.data_uri(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_config_defaults_to_gemini() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "g-key")])).unwrap();
        assert_eq!(config.text_provider, AiProvider::Gemini);
        assert_eq!(config.text_model, "gemini-2.5-flash-preview-04-17");
        assert_eq!(config.image_model, "imagen-3.0-generate-002");
        assert_eq!(config.api_key_for(AiProvider::Gemini).unwrap(), "g-key");
    }

    #[test]
    fn test_config_accepts_legacy_api_key() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_config_requires_key_for_selected_provider() {
        let err = Config::from_lookup(lookup(&[
            ("STORY_IMAGE_PROVIDER", "openai"),
            ("GEMINI_API_KEY", "g-key"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_config_rejects_unknown_provider() {
        let err = Config::from_lookup(lookup(&[("STORY_TEXT_PROVIDER", "llama")])).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_model_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("STORY_TEXT_PROVIDER", "OpenAI"),
            ("STORY_TEXT_MODEL", "gpt-4o"),
            ("OPENAI_API_KEY", "o-key"),
            ("GEMINI_API_KEY", "g-key"),
        ]))
        .unwrap();
        assert_eq!(config.text_provider, AiProvider::OpenAi);
        assert_eq!(config.text_model, "gpt-4o");
        assert_eq!(config.image_provider, AiProvider::Gemini);
    }
}
