//! Client Layer - Core Traits
//!
//! Abstract interfaces over the backend. The commands layer only ever sees
//! these, so tests can drive it with an in-memory fake instead of a server.

use async_trait::async_trait;

use crate::domain::{DomainResult, Item, ItemPatch, NewItem};

/// Item CRUD against the backend
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// List all items (public endpoint, credentialed when a session exists)
    async fn list(&self) -> DomainResult<Vec<Item>>;

    /// Fetch one item's current properties (admin endpoint)
    async fn fetch(&self, id: &str) -> DomainResult<Item>;

    /// Create a new item
    async fn create(&self, item: &NewItem) -> DomainResult<()>;

    /// Apply a sparse patch to an item
    async fn update(&self, id: &str, patch: &ItemPatch) -> DomainResult<()>;

    /// Delete an item
    async fn delete(&self, id: &str) -> DomainResult<()>;
}

/// Session lifecycle against the backend
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Authenticate and persist the session cookie
    async fn login(&self, username: &str, password: &str) -> DomainResult<()>;

    /// End the session and drop the stored cookie
    async fn logout(&self) -> DomainResult<()>;

    /// Probe the protected health endpoint. A failure of any kind just
    /// means "not logged in"; it is never escalated to an error.
    async fn session_valid(&self) -> bool;
}
