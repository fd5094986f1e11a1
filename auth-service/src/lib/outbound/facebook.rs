use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::account::errors::FacebookError;
use crate::account::models::FacebookProfile;
use crate::account::ports::FacebookClient;

const PROFILE_FIELDS: &str = "id,email,first_name,last_name";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Facebook Graph API client resolving user access tokens to profiles.
pub struct FacebookGraphClient {
    client: reqwest::Client,
    graph_url: String,
}

impl FacebookGraphClient {
    /// # Arguments
    /// * `graph_url` - Versioned Graph API base, e.g. `https://graph.facebook.com/v19.0`
    pub fn new(graph_url: impl Into<String>) -> Result<Self, FacebookError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FacebookError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            graph_url: graph_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphError,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

#[async_trait]
impl FacebookClient for FacebookGraphClient {
    async fn fetch_profile(&self, access_token: &str) -> Result<FacebookProfile, FacebookError> {
        let response = self
            .client
            .get(format!("{}/me", self.graph_url))
            .query(&[("fields", PROFILE_FIELDS), ("access_token", access_token)])
            .send()
            .await
            .map_err(|e| FacebookError::Upstream(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<FacebookProfile>()
                .await
                .map_err(|e| FacebookError::Upstream(e.without_url().to_string()));
        }

        let message = response
            .json::<GraphErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| status.to_string());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::info!(status = status.as_u16(), "Facebook rejected access token");
                Err(FacebookError::InvalidToken(message))
            }
            _ => {
                tracing::warn!(status = status.as_u16(), error = %message, "Facebook Graph API failure");
                Err(FacebookError::Upstream(message))
            }
        }
    }
}
