//! Story orchestration: topic in, slides out.
//!
//! One call to [`Storyteller::generate`] clears the session, asks the planner
//! for a story plan, then illustrates and renders each narration unit in plan
//! order. Illustration requests run strictly one after another. The first
//! failure stops the run and is shown in the error area; slides rendered
//! before it stay visible. The input is handed back to the user whichever way
//! the run ends.

use crate::ai::{IllustrationService, StoryPlanner};
use crate::extract::extract_json_payload;
use crate::markdown;
use crate::plan::StoryPlan;
use crate::render;
use crate::session::{Phase, SessionState};
use crate::Result;
use tracing::{debug, error, info, Instrument};
use uuid::Uuid;

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryOutcome {
    pub planned_units: usize,
    pub rendered_slides: usize,
    pub skipped_units: usize,
}

pub struct Storyteller {
    planner: Box<dyn StoryPlanner>,
    illustrator: Box<dyn IllustrationService>,
}

impl Storyteller {
    pub fn new(planner: Box<dyn StoryPlanner>, illustrator: Box<dyn IllustrationService>) -> Self {
        Self {
            planner,
            illustrator,
        }
    }

    /// Run one generation for `topic` against `session`.
    ///
    /// The error, if any, has already been written to the session's error
    /// area when this returns; it is also returned so callers can branch on
    /// [`crate::Error::kind`].
    pub async fn generate(&self, session: &mut SessionState, topic: &str) -> Result<StoryOutcome> {
        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("generation", session = %session_id);

        async {
            session.begin();
            info!("Generating story for topic: {}", topic);

            let result = self.tell(session, topic).await;

            match &result {
                Ok(outcome) => {
                    session.phase = Phase::Done;
                    info!(
                        "Story complete: {} slides ({} units skipped)",
                        outcome.rendered_slides, outcome.skipped_units
                    );
                }
                Err(e) => {
                    session.phase = Phase::Failed;
                    error!("Story generation failed ({:?}): {}", e.kind(), e);
                    session.show_error(&e.user_message());
                }
            }

            session.finish();
            result
        }
        .instrument(span)
        .await
    }

    async fn tell(&self, session: &mut SessionState, topic: &str) -> Result<StoryOutcome> {
        session.echo_topic(topic, markdown::render(topic));

        session.phase = Phase::PlanningStory;
        let raw = self.planner.plan_story(topic).await?;
        let plan = StoryPlan::parse(&extract_json_payload(&raw))?;
        info!("Story plan has {} parts", plan.len());

        session.show_slideshow();

        let mut outcome = StoryOutcome {
            planned_units: plan.len(),
            rendered_slides: 0,
            skipped_units: 0,
        };

        for (index, unit) in plan.units().enumerate() {
            session.phase = Phase::RenderingSlides { index };

            let Some(unit) = unit else {
                debug!("Skipping plan part {}: missing sentence or image prompt", index);
                outcome.skipped_units += 1;
                continue;
            };

            debug!("Illustrating part {}: {}", index, unit.illustration_prompt);
            let illustration = self.illustrator.illustrate(&unit.illustration_prompt).await?;
            render::add_slide(&mut session.slideshow, &unit.caption, illustration);
            outcome.rendered_slides += 1;
        }

        Ok(outcome)
    }
}
