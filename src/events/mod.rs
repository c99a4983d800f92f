//! Event handling for PredictX.
//!
//! This module provides input event handling for the terminal event loop.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
