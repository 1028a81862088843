use pretty_assertions::assert_eq;
use tiny_cat_storyteller::{
    ai::{IllustrationService, MockIllustrationClient, MockStoryPlanner, StoryPlanner},
    app::{App, AppServices},
    extract::extract_json_payload,
    plan::StoryPlan,
    session::Phase,
    surface::{InputEvent, InteractionSurface, Key},
    view, ErrorKind,
};

const VOLCANO_PLAN: &str =
    r#"[{"sentence":"A","image_prompt":"p1"},{"sentence":"B","image_prompt":"p2"}]"#;

fn build_app(planner: &MockStoryPlanner, illustrator: &MockIllustrationClient) -> App {
    App::with_services(AppServices {
        planner: Box::new(planner.clone()),
        illustrator: Box::new(illustrator.clone()),
        surface: InteractionSurface::with_default_examples().unwrap(),
    })
}

#[tokio::test]
async fn test_volcano_story_end_to_end() {
    let planner = MockStoryPlanner::new().with_plan_response(VOLCANO_PLAN.to_string());
    let illustrator = MockIllustrationClient::new()
        .with_image_response("p1".to_string(), vec![0xFF, 0xD8, 0xFF, 0x01])
        .with_image_response("p2".to_string(), vec![0xFF, 0xD8, 0xFF, 0x02]);
    let mut app = build_app(&planner, &illustrator);

    let outcome = app.submit_line("volcanoes").await.unwrap().unwrap();

    assert_eq!(outcome.rendered_slides, 2);
    let session = app.session();
    assert_eq!(session.captions(), vec!["A", "B"]);
    assert!(session.error.hidden);
    assert!(!session.input.disabled);
    assert_eq!(session.phase, Phase::Idle);
    assert_eq!(planner.get_topics(), vec!["volcanoes".to_string()]);
    assert_eq!(illustrator.get_prompts(), vec!["p1", "p2"]);

    let html = view::render_html(session, app.examples());
    assert_eq!(html.matches("<div class=\"slide\">").count(), 2);
    assert!(html.contains("<div class=\"user-turn\"><p>volcanoes</p>"));
}

#[tokio::test]
async fn test_failure_midway_keeps_first_slide() {
    let planner = MockStoryPlanner::new().with_plan_response(
        r#"[{"sentence":"One","image_prompt":"p1"},{"sentence":"Two","image_prompt":"p2"},{"sentence":"Three","image_prompt":"p3"}]"#
            .to_string(),
    );
    let illustrator = MockIllustrationClient::new().with_failure("p2".to_string());
    let mut app = build_app(&planner, &illustrator);

    let err = app.submit_line("tides").await.unwrap().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CollaboratorFailure);
    assert_eq!(app.session().captions(), vec!["One"]);
    assert_eq!(illustrator.get_prompts(), vec!["p1", "p2"]);
    assert!(!app.session().error.hidden);
    assert!(!app.session().error.message.is_empty());
    assert!(!app.session().input.disabled);
}

#[tokio::test]
async fn test_resubmission_starts_from_a_clean_page() {
    let planner = MockStoryPlanner::new()
        .with_plan_response("not json".to_string())
        .with_plan_response(VOLCANO_PLAN.to_string());
    let illustrator = MockIllustrationClient::new();
    let mut app = build_app(&planner, &illustrator);

    let err = app.submit_line("first").await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedPlan);
    assert!(!app.session().error.hidden);

    app.handle_event(InputEvent::ExampleClicked(0))
        .await
        .unwrap()
        .unwrap();

    let session = app.session();
    assert!(session.error.hidden);
    assert_eq!(session.transcript.len(), 1);
    assert_eq!(session.transcript[0].text, app.examples()[0]);
    assert_eq!(session.captions(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_typing_then_enter_submits() {
    let planner = MockStoryPlanner::new();
    let mut app = build_app(&planner, &MockIllustrationClient::new());

    for c in "rain".chars() {
        assert!(app.handle_event(InputEvent::KeyDown(Key::Char(c))).await.is_none());
    }
    assert_eq!(app.session().input.value, "rain");

    app.handle_event(InputEvent::KeyDown(Key::Enter))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(planner.get_topics(), vec!["rain".to_string()]);
    assert!(app.session().input.value.is_empty());
}

#[tokio::test]
async fn test_collaborators_compose_without_orchestrator() {
    let planner = MockStoryPlanner::new()
        .with_plan_response(format!("```json\n{}\n```", VOLCANO_PLAN));
    let illustrator = MockIllustrationClient::new();

    let raw = planner.plan_story("volcanoes").await.unwrap();
    let plan = StoryPlan::parse(&extract_json_payload(&raw)).unwrap();
    assert_eq!(plan.len(), 2);

    for unit in plan.units().flatten() {
        let illustration = illustrator.illustrate(&unit.illustration_prompt).await.unwrap();
        assert!(illustration.data_uri().starts_with("data:image/jpeg;base64,"));
    }
    assert_eq!(illustrator.get_call_count(), 2);
}
