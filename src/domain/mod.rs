//! Domain Layer
//!
//! Entities and core business rules: valuation arithmetic, differential
//! patching and form validation. No I/O here; the client layer owns the
//! wire and the commands layer owns the user-facing surface.

mod error;
mod item;
mod patch;
mod valuation;

pub use error::{DomainError, DomainResult};
pub(crate) use patch::fmt_number;
pub use item::{parse_daily_price, parse_service_days, Item, ItemProperties, NewItem};
pub use patch::{ItemForm, ItemPatch};
pub use valuation::{compute_valuation, Valuation};
