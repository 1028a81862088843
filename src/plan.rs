//! Story plan parsing.
//!
//! Only the outer shape is checked here: the payload must be a non-empty JSON
//! array. Each element is inspected when the orchestrator reaches it, and
//! elements without both fields are skipped rather than rejected.

use crate::models::NarrationUnit;
use crate::{Error, Result};
use serde_json::Value;

/// Ordered narration parts exactly as the planner returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryPlan {
    parts: Vec<Value>,
}

impl StoryPlan {
    /// Parse an extracted payload into a plan.
    pub fn parse(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::MalformedPlan(e.to_string()))?;

        match value {
            Value::Array(parts) if !parts.is_empty() => Ok(Self { parts }),
            _ => Err(Error::EmptyPlan),
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Narration units in plan order; `None` marks a part missing a field.
    pub fn units(&self) -> impl Iterator<Item = Option<NarrationUnit>> + '_ {
        self.parts.iter().map(NarrationUnit::from_value)
    }
}
