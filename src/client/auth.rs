//! Session endpoints: login, logout and the health probe.

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{DomainError, DomainResult};

use super::{error_from_response, network, ApiClient, AuthStore, ErrorBody};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

#[async_trait]
impl AuthStore for ApiClient {
    async fn login(&self, username: &str, password: &str) -> DomainResult<()> {
        let body = json!({ "username": username, "password": password });
        let response = self
            .http
            .post(self.url("/api/public/login"))
            .json(&body)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(error_from_response("login", response).await);
        }

        // capture the cookie pairs before the body is consumed
        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(|pair| pair.trim().to_string())
            .collect();

        let body: LoginResponse = response.json().await.map_err(network)?;
        if !body.success {
            return Err(DomainError::Backend(
                body.message.unwrap_or_else(|| "login failed".to_string()),
            ));
        }

        self.session().save(&cookies)?;
        log::debug!("login succeeded, session cookie stored");
        Ok(())
    }

    async fn logout(&self) -> DomainResult<()> {
        let response = self
            .credentialed(self.http.post(self.url("/api/public/logout")))
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(DomainError::Backend(format!(
                "logout failed: {} - {}",
                status, message
            )));
        }

        self.session().clear();
        Ok(())
    }

    async fn session_valid(&self) -> bool {
        match self
            .credentialed(self.http.get(self.url("/api/admin/health")))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("health probe failed: {}", e);
                false
            }
        }
    }
}
