//! Startup engine.
//!
//! The ordered initializer and its steps, the recovery gate, the render
//! trigger, and the orchestrator that runs them in sequence once.

pub mod initializer;
pub mod orchestrator;
pub mod recovery;
pub mod render;
pub mod steps;

pub use orchestrator::{BootReport, Bootstrap, Collaborators};
