//! Visible state of one front-end: the input control, the transcript, the
//! slideshow and the error area.
//!
//! Only the orchestrator and the slide renderer mutate a [`SessionState`];
//! everything else reads it.

use crate::models::Slide;
use chrono::{DateTime, Local};

/// Where the orchestrator currently is within one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    PlanningStory,
    RenderingSlides { index: usize },
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputControl {
    pub value: String,
    pub disabled: bool,
    pub focused: bool,
}

impl Default for InputControl {
    fn default() -> Self {
        Self {
            value: String::new(),
            disabled: false,
            focused: true,
        }
    }
}

/// Echo of what the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub text: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slideshow {
    pub hidden: bool,
    pub slides: Vec<Slide>,
}

impl Default for Slideshow {
    fn default() -> Self {
        Self {
            hidden: true,
            slides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorArea {
    pub hidden: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub input: InputControl,
    pub transcript: Vec<TranscriptEntry>,
    pub slideshow: Slideshow,
    pub error: ErrorArea,
    pub phase: Phase,
    pub started_at: Option<DateTime<Local>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            input: InputControl::default(),
            transcript: Vec::new(),
            slideshow: Slideshow::default(),
            error: ErrorArea {
                hidden: true,
                message: String::new(),
            },
            phase: Phase::Idle,
            started_at: None,
        }
    }

    /// Lock the input and wipe everything the previous generation left.
    pub fn begin(&mut self) {
        self.phase = Phase::Submitting;
        self.started_at = Some(Local::now());
        self.input.disabled = true;
        self.transcript.clear();
        self.slideshow.slides.clear();
        self.error.message.clear();
        self.error.hidden = true;
    }

    pub fn echo_topic(&mut self, text: &str, html: String) {
        self.transcript.push(TranscriptEntry {
            text: text.to_string(),
            html,
        });
        self.input.value.clear();
    }

    pub fn show_slideshow(&mut self) {
        self.slideshow.hidden = false;
    }

    pub fn show_error(&mut self, message: &str) {
        self.error.message = format!("Something went wrong: {}", message);
        self.error.hidden = false;
    }

    /// Hand the input back to the user.
    pub fn finish(&mut self) {
        self.input.disabled = false;
        self.input.focused = true;
        self.phase = Phase::Idle;
    }

    pub fn is_generating(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn captions(&self) -> Vec<&str> {
        self.slideshow
            .slides
            .iter()
            .map(|slide| slide.caption.as_str())
            .collect()
    }
}
