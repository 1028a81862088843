//! Interaction surface: keystrokes into the topic input and clicks on the
//! predefined examples.
//!
//! Dispatching an event never starts a generation itself; it tells the
//! caller which topic to hand to the storyteller.

use crate::session::SessionState;
use crate::Result;
use serde::Deserialize;

const EXAMPLES_JSON: &str = include_str!("../data/examples.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Click on the example at this zero-based position.
    ExampleClicked(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Start a generation for this topic.
    Submit {
        topic: String,
        default_prevented: bool,
    },
    Edited,
    Ignored,
}

#[derive(Debug, Deserialize)]
struct ExampleList(Vec<String>);

pub struct InteractionSurface {
    examples: Vec<String>,
}

impl InteractionSurface {
    pub fn new(examples: Vec<String>) -> Self {
        Self { examples }
    }

    /// Surface with the bundled example topics.
    pub fn with_default_examples() -> Result<Self> {
        let list: ExampleList = serde_json::from_str(EXAMPLES_JSON)?;
        Ok(Self::new(list.0))
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    pub fn dispatch(&self, session: &mut SessionState, event: InputEvent) -> Dispatch {
        match event {
            InputEvent::KeyDown(_) if session.input.disabled => Dispatch::Ignored,
            InputEvent::KeyDown(Key::Enter) => Dispatch::Submit {
                topic: session.input.value.clone(),
                default_prevented: true,
            },
            InputEvent::KeyDown(Key::Backspace) => {
                session.input.value.pop();
                Dispatch::Edited
            }
            InputEvent::KeyDown(Key::Char(c)) => {
                session.input.value.push(c);
                Dispatch::Edited
            }
            InputEvent::ExampleClicked(index) => match self.examples.get(index) {
                Some(example) => Dispatch::Submit {
                    topic: example.clone(),
                    default_prevented: false,
                },
                None => {
                    tracing::debug!("Ignoring click on missing example {}", index);
                    Dispatch::Ignored
                }
            },
        }
    }

    /// Type `line` into the input and press Enter.
    pub fn type_line(&self, session: &mut SessionState, line: &str) -> Dispatch {
        for c in line.chars() {
            if self.dispatch(session, InputEvent::KeyDown(Key::Char(c))) == Dispatch::Ignored {
                return Dispatch::Ignored;
            }
        }
        self.dispatch(session, InputEvent::KeyDown(Key::Enter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn surface() -> InteractionSurface {
        InteractionSurface::new(vec!["Explain tides.".to_string(), "Explain rain.".to_string()])
    }

    #[test]
    fn test_bundled_examples_load() {
        let surface = InteractionSurface::with_default_examples().unwrap();
        assert!(!surface.examples().is_empty());
        assert!(surface.examples().iter().all(|e| !e.trim().is_empty()));
    }

    #[test]
    fn test_enter_submits_current_value_without_newline() {
        let mut session = SessionState::new();
        let dispatch = surface().type_line(&mut session, "volcanoes");

        assert_eq!(
            dispatch,
            Dispatch::Submit {
                topic: "volcanoes".to_string(),
                default_prevented: true,
            }
        );
        assert_eq!(session.input.value, "volcanoes");
    }

    #[test]
    fn test_backspace_edits_value() {
        let mut session = SessionState::new();
        let surface = surface();
        surface.dispatch(&mut session, InputEvent::KeyDown(Key::Char('c')));
        surface.dispatch(&mut session, InputEvent::KeyDown(Key::Char('x')));
        surface.dispatch(&mut session, InputEvent::KeyDown(Key::Backspace));
        assert_eq!(session.input.value, "c");
    }

    #[test]
    fn test_disabled_input_ignores_keys() {
        let mut session = SessionState::new();
        session.input.disabled = true;

        assert_eq!(surface().type_line(&mut session, "cats"), Dispatch::Ignored);
        assert!(session.input.value.is_empty());
    }

    #[test]
    fn test_example_click_submits_example_text() {
        let mut session = SessionState::new();
        assert_eq!(
            surface().dispatch(&mut session, InputEvent::ExampleClicked(1)),
            Dispatch::Submit {
                topic: "Explain rain.".to_string(),
                default_prevented: false,
            }
        );
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let mut session = SessionState::new();
        assert_eq!(
            surface().dispatch(&mut session, InputEvent::ExampleClicked(9)),
            Dispatch::Ignored
        );
    }

    #[test]
    fn test_empty_enter_still_submits() {
        let mut session = SessionState::new();
        assert_eq!(
            surface().type_line(&mut session, ""),
            Dispatch::Submit {
                topic: String::new(),
                default_prevented: true,
            }
        );
    }
}
