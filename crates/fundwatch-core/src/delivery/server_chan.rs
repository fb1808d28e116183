use std::sync::Arc;

use tracing::{debug, info};

use crate::http_client::{HttpClient, HttpRequest};
use crate::DeliveryError;

const DEFAULT_BASE_URL: &str = "https://sc.ftqq.com";

/// Longest title, in characters, the push service accepts.
pub const MAX_TITLE_CHARS: usize = 256;

/// ServerChan push-message webhook client.
#[derive(Clone)]
pub struct ServerChanClient {
    http_client: Arc<dyn HttpClient>,
    key: String,
    base_url: String,
}

impl ServerChanClient {
    pub fn new(http_client: Arc<dyn HttpClient>, key: impl Into<String>) -> Self {
        Self {
            http_client,
            key: key.into(),
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}.send", self.base_url, self.key)
    }

    /// Posts `title` as `text` and `body` as `desp`. Only HTTP 200 counts as delivered.
    pub async fn send(&self, title: &str, body: &str) -> Result<(), DeliveryError> {
        if title.is_empty() {
            return Err(DeliveryError::EmptyTitle);
        }
        if self.key.is_empty() {
            return Err(DeliveryError::MissingKey);
        }

        let request = HttpRequest::post(self.endpoint())
            .with_form(&[("text", truncate_title(title)), ("desp", body)]);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| DeliveryError::Transport(error.message().to_owned()))?;

        if response.status != 200 {
            return Err(DeliveryError::Status {
                status: response.status,
                body: response.body,
            });
        }

        debug!(body = %response.body, "serverchan response");
        info!(title, "serverchan message sent");
        Ok(())
    }
}

/// Cuts `title` to at most [`MAX_TITLE_CHARS`] characters on a char boundary.
pub fn truncate_title(title: &str) -> &str {
    match title.char_indices().nth(MAX_TITLE_CHARS) {
        Some((index, _)) => &title[..index],
        None => title,
    }
}
