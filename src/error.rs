//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror,
//! plus the coarse error kinds surfaced by the story orchestrator.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Shown when a failure carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred. The model might not have been able to generate content for this topic.";

static SERVICE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:GoogleGenerativeAI|Gemini|Imagen|OpenAI) Error\]\s*")
        .expect("service prefix pattern is valid")
});

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("[{service} Error] {message}")]
    AiProvider { service: String, message: String },

    #[error("Could not read the story plan: {0}")]
    MalformedPlan(String),

    #[error("Could not generate a story. Please try another topic.")]
    EmptyPlan,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories reported by a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedPlan,
    EmptyPlan,
    CollaboratorFailure,
    UnknownFailure,
}

impl Error {
    pub fn ai_provider(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AiProvider {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedPlan(_) => ErrorKind::MalformedPlan,
            Error::EmptyPlan => ErrorKind::EmptyPlan,
            Error::Http(_) | Error::AiProvider { .. } => ErrorKind::CollaboratorFailure,
            _ => ErrorKind::UnknownFailure,
        }
    }

    /// Readable message for the error area, without the service tag.
    pub fn user_message(&self) -> String {
        user_message(&self.to_string())
    }
}

/// Strip a known service prefix from `raw`, falling back to a generic
/// message when nothing usable remains.
pub fn user_message(raw: &str) -> String {
    let stripped = SERVICE_PREFIX.replacen(raw, 1, "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}
