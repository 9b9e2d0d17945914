//! Commands Layer
//!
//! User-action handlers that bridge the CLI to the domain and the client.
//! Every handler returns rendered text on success and a `DomainError` that
//! the entry point turns into a message; nothing panics, nothing retries.

mod auth_cmd;
mod item_cmd;


pub use auth_cmd::*;
pub use item_cmd::*;
