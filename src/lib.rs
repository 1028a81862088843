//! Tiny cat storyteller - explains a topic as an illustrated story
//!
//! A text model drafts a plan of sentences paired with image prompts, an image
//! model illustrates each one, and the results are appended as slides to a
//! front-end session in plan order.

pub mod ai;
pub mod app;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod models;
pub mod plan;
pub mod prompts;
pub mod render;
pub mod session;
pub mod story;
pub mod surface;
pub mod view;

pub use error::{Error, ErrorKind, Result};
