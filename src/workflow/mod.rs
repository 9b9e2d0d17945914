//! Workflow Layer
//!
//! Multi-step user interactions modeled as explicit state machines.

mod edit;

pub use edit::{EditFlow, EditSession};
