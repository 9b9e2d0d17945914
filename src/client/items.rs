//! Item endpoints: list, detail, create, patch, delete.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, Item, ItemPatch, NewItem};

use super::{error_from_response, network, ApiClient, ErrorBody, ItemStore};

/// Exact sentinel the backend sends when the public list needs a login.
/// Part of the wire contract; matched verbatim.
const PRIVATE_LIST_MESSAGE: &str = "本好物页面未公开展示，你需要登录来进行查看！";

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    item: Item,
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    properties: &'a NewItem,
}

#[async_trait]
impl ItemStore for ApiClient {
    async fn list(&self) -> DomainResult<Vec<Item>> {
        log::debug!("fetching item list");
        let response = self
            .credentialed(self.http.get(self.url("/api/public/items")))
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .json::<ErrorBody>()
                .await
                .unwrap_or_default();
            // the private-page sentinel is a distinct state, not a failure
            if body.message.as_deref() == Some(PRIVATE_LIST_MESSAGE) {
                return Err(DomainError::ListPrivate);
            }
            let detail = body
                .message
                .unwrap_or_else(|| format!("listing items ({})", status));
            return Err(DomainError::Backend(detail));
        }

        let body: ListResponse = response.json().await.map_err(network)?;
        Ok(body.items)
    }

    async fn fetch(&self, id: &str) -> DomainResult<Item> {
        log::debug!("fetching item {}", id);
        let response = self
            .credentialed(self.http.get(self.url(&format!("/api/admin/items/{}", id))))
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(error_from_response("fetching item", response).await);
        }

        let body: DetailResponse = response.json().await.map_err(network)?;
        Ok(body.item)
    }

    async fn create(&self, item: &NewItem) -> DomainResult<()> {
        log::debug!("creating item {:?}", item.name);
        let response = self
            .credentialed(self.http.post(self.url("/api/admin/items")))
            .json(&CreateBody { properties: item })
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(error_from_response("creating item", response).await);
        }
        Ok(())
    }

    async fn update(&self, id: &str, patch: &ItemPatch) -> DomainResult<()> {
        log::debug!("patching item {} with {} field(s)", id, patch.fields().len());
        let response = self
            .credentialed(
                self.http
                    .patch(self.url(&format!("/api/admin/items/{}", id))),
            )
            .json(patch)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(error_from_response("updating item", response).await);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        log::debug!("deleting item {}", id);
        let response = self
            .credentialed(
                self.http
                    .delete(self.url(&format!("/api/admin/items/{}", id))),
            )
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(error_from_response("deleting item", response).await);
        }
        Ok(())
    }
}
