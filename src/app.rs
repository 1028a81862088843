//! Wiring between configuration, the collaborators, and the front-end state.

use crate::ai::{
    GeminiStoryPlanner, IllustrationService, ImagenIllustrationClient, OpenAiIllustrationClient,
    OpenAiStoryPlanner, StoryPlanner,
};
use crate::models::{AiProvider, Config};
use crate::session::SessionState;
use crate::story::{StoryOutcome, Storyteller};
use crate::surface::{Dispatch, InputEvent, InteractionSurface};
use crate::Result;
use tracing::{debug, info};

/// One front-end: the visible session plus everything needed to fill it.
pub struct App {
    storyteller: Storyteller,
    surface: InteractionSurface,
    session: SessionState,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub planner: Box<dyn StoryPlanner>,
    pub illustrator: Box<dyn IllustrationService>,
    pub surface: InteractionSurface,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            storyteller: Storyteller::new(services.planner, services.illustrator),
            surface: services.surface,
            session: SessionState::new(),
        }
    }

    fn build_ai_client<T, FOpenAi, FGemini>(
        provider: AiProvider,
        model: &str,
        api_key: String,
        http_client: reqwest::Client,
        capability: &str,
        openai_builder: FOpenAi,
        gemini_builder: FGemini,
    ) -> T
    where
        FOpenAi: FnOnce(String, String, reqwest::Client) -> T,
        FGemini: FnOnce(String, String, reqwest::Client) -> T,
    {
        match provider {
            AiProvider::OpenAi => {
                info!("{} provider: OpenAI (model: {})", capability, model);
                openai_builder(api_key, model.to_string(), http_client)
            }
            AiProvider::Gemini => {
                info!("{} provider: Gemini (model: {})", capability, model);
                gemini_builder(api_key, model.to_string(), http_client)
            }
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::from_env()?)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let planner: Box<dyn StoryPlanner> = Self::build_ai_client(
            config.text_provider,
            &config.text_model,
            config.api_key_for(config.text_provider)?,
            http_client.clone(),
            "Story",
            |api_key, model, client| {
                Box::new(OpenAiStoryPlanner::new_with_client(api_key, model, client))
                    as Box<dyn StoryPlanner>
            },
            |api_key, model, client| {
                Box::new(GeminiStoryPlanner::new_with_client(api_key, model, client))
                    as Box<dyn StoryPlanner>
            },
        );

        let illustrator: Box<dyn IllustrationService> = Self::build_ai_client(
            config.image_provider,
            &config.image_model,
            config.api_key_for(config.image_provider)?,
            http_client,
            "Illustration",
            |api_key, model, client| {
                Box::new(OpenAiIllustrationClient::new_with_client(
                    api_key, model, client,
                )) as Box<dyn IllustrationService>
            },
            |api_key, model, client| {
                Box::new(ImagenIllustrationClient::new_with_client(
                    api_key, model, client,
                )) as Box<dyn IllustrationService>
            },
        );

        Ok(Self::with_services(AppServices {
            planner,
            illustrator,
            surface: InteractionSurface::with_default_examples()?,
        }))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn examples(&self) -> &[String] {
        self.surface.examples()
    }

    /// Feed one input event; runs a generation when it submits a topic.
    ///
    /// Returns `None` without touching the session while a generation is
    /// still in progress.
    pub async fn handle_event(&mut self, event: InputEvent) -> Option<Result<StoryOutcome>> {
        if self.busy() {
            return None;
        }
        match self.surface.dispatch(&mut self.session, event) {
            Dispatch::Submit { topic, .. } => Some(self.submit(&topic).await),
            Dispatch::Edited | Dispatch::Ignored => None,
        }
    }

    /// Type a full line into the input and press Enter.
    pub async fn submit_line(&mut self, line: &str) -> Option<Result<StoryOutcome>> {
        if self.busy() {
            return None;
        }
        match self.surface.type_line(&mut self.session, line) {
            Dispatch::Submit { topic, .. } => Some(self.submit(&topic).await),
            Dispatch::Edited | Dispatch::Ignored => None,
        }
    }

    fn busy(&self) -> bool {
        let busy = self.session.is_generating();
        if busy {
            debug!("Ignoring input: generation in progress ({:?})", self.session.phase);
        }
        busy
    }

    async fn submit(&mut self, topic: &str) -> Result<StoryOutcome> {
        self.storyteller.generate(&mut self.session, topic).await
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppServices};
    use crate::ai::{MockIllustrationClient, MockStoryPlanner};
    use crate::models::{AiProvider, Config};
    use crate::session::Phase;
    use crate::surface::{InputEvent, InteractionSurface, Key};

    fn build_test_app(planner: MockStoryPlanner, illustrator: MockIllustrationClient) -> App {
        App::with_services(AppServices {
            planner: Box::new(planner),
            illustrator: Box::new(illustrator),
            surface: InteractionSurface::new(vec![
                "Explain tides.".to_string(),
                "Explain rain.".to_string(),
            ]),
        })
    }

    #[tokio::test]
    async fn test_enter_key_runs_generation_for_typed_topic() {
        let planner = MockStoryPlanner::new();
        let recorder = planner.clone();
        let mut app = build_test_app(planner, MockIllustrationClient::new());

        for c in "tides".chars() {
            assert!(app.handle_event(InputEvent::KeyDown(Key::Char(c))).await.is_none());
        }
        let outcome = app
            .handle_event(InputEvent::KeyDown(Key::Enter))
            .await
            .expect("enter submits")
            .unwrap();

        assert_eq!(outcome.rendered_slides, 1);
        assert_eq!(recorder.get_topics(), vec!["tides".to_string()]);
        assert!(app.session().input.value.is_empty());
        assert!(!app.session().input.disabled);
    }

    #[tokio::test]
    async fn test_example_click_runs_generation_for_example() {
        let planner = MockStoryPlanner::new();
        let recorder = planner.clone();
        let mut app = build_test_app(planner, MockIllustrationClient::new());

        app.handle_event(InputEvent::ExampleClicked(1))
            .await
            .expect("click submits")
            .unwrap();

        assert_eq!(recorder.get_topics(), vec!["Explain rain.".to_string()]);
        assert_eq!(app.session().transcript[0].text, "Explain rain.");
    }

    #[tokio::test]
    async fn test_failed_generation_still_restores_input() {
        let planner = MockStoryPlanner::new().with_error("down".to_string());
        let mut app = build_test_app(planner, MockIllustrationClient::new());

        let result = app.submit_line("cats").await.expect("line submits");

        assert!(result.is_err());
        assert!(!app.session().input.disabled);
        assert!(app.session().input.focused);
        assert!(!app.session().error.hidden);
    }

    #[tokio::test]
    async fn test_input_is_ignored_while_generation_in_progress() {
        let planner = MockStoryPlanner::new();
        let recorder = planner.clone();
        let mut app = build_test_app(planner, MockIllustrationClient::new());
        app.session.phase = Phase::RenderingSlides { index: 0 };

        assert!(app.submit_line("tides").await.is_none());
        assert!(app
            .handle_event(InputEvent::ExampleClicked(0))
            .await
            .is_none());
        assert!(app.session().input.value.is_empty());
        assert_eq!(recorder.get_call_count(), 0);

        app.session.phase = Phase::Idle;
        assert!(app.submit_line("tides").await.is_some());
        assert_eq!(recorder.get_topics(), vec!["tides".to_string()]);
    }

    #[test]
    fn test_from_config_builds_both_providers() {
        for provider in [AiProvider::Gemini, AiProvider::OpenAi] {
            let config = Config {
                text_provider: provider,
                text_model: provider.default_text_model().to_string(),
                image_provider: provider,
                image_model: provider.default_image_model().to_string(),
                gemini_api_key: Some("g".to_string()),
                openai_api_key: Some("o".to_string()),
            };
            let app = App::from_config(&config).unwrap();
            assert!(!app.examples().is_empty());
        }
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = Config {
            text_provider: AiProvider::OpenAi,
            text_model: "gpt-4.1-mini".to_string(),
            image_provider: AiProvider::Gemini,
            image_model: "imagen-3.0-generate-002".to_string(),
            gemini_api_key: Some("g".to_string()),
            openai_api_key: None,
        };
        assert!(App::from_config(&config).is_err());
    }
}
