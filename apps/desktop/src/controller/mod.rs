//! Controller layer: command parsing, failure reporting, and dispatch into the session queue.

pub mod commands;
pub mod events;
pub mod orchestration;
