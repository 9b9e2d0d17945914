//! WorthIt Client
//!
//! Layered architecture:
//! - domain: entities and pure business rules (valuation, diffing)
//! - client: REST access to the backend
//! - workflow: edit-session state machine
//! - commands: user-action handlers

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod workflow;
