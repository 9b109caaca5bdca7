//! Webflow Data API Publisher
//!
//! Creates one collection item per run. Live mode posts to
//! `collections/{id}/items/live`; draft mode posts to `collections/{id}/items`
//! with `isDraft: true`. No retries, no update-in-place.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

use crate::ai::provider::http_client;
use crate::ai::timeout::{TimeoutConfig, with_timeout};
use crate::config::{Config, PublishMode};
use crate::types::{AppError, GeneratedPost, PublishError, Result, TimeoutError};

const OPERATION: &str = "createItem";

/// Statuses that count as a created item
const SUCCESS_STATUSES: [u16; 3] = [200, 201, 202];

/// Outcome of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResult {
    /// Item id assigned by the CMS, when the response carried one
    pub item_id: Option<String>,
    pub title: String,
    pub mode: PublishMode,
}

/// Webflow publisher with secure token handling
pub struct WebflowPublisher {
    /// API token stored securely - never exposed in logs or debug output
    api_token: SecretString,
    api_base: Url,
    api_version: String,
    collection_id: String,
    mode: PublishMode,
    timeout: Duration,
    client: reqwest::Client,
}

impl std::fmt::Debug for WebflowPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebflowPublisher")
            .field("api_token", &"[REDACTED]")
            .field("api_base", &self.api_base.as_str())
            .field("api_version", &self.api_version)
            .field("collection_id", &self.collection_id)
            .field("mode", &self.mode)
            .finish()
    }
}

impl WebflowPublisher {
    pub fn new(config: &Config, api_token: SecretString, collection_id: String) -> Result<Self> {
        let timeouts = TimeoutConfig::from_config(config);
        let client = http_client(timeouts.publish, timeouts.connection)?;

        let api_base = Url::parse(&config.cms.api_base).map_err(|e| {
            AppError::Config(format!("Invalid cms api_base '{}': {}", config.cms.api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "cms api_base cannot be used as a base URL: {}",
                api_base
            )));
        }

        Ok(Self {
            api_token,
            api_base,
            api_version: config.cms.api_version.clone(),
            collection_id,
            mode: config.cms.publish_mode,
            timeout: timeouts.publish,
            client,
        })
    }

    /// Collection items endpoint for the configured mode
    pub fn items_url(&self) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("collections")
                .push(&self.collection_id)
                .extend(self.mode.items_path().split('/'));
        }
        url
    }

    /// Map a post onto the item payload
    pub fn build_payload(post: &GeneratedPost, mode: PublishMode) -> CreateItemRequest<'_> {
        CreateItemRequest {
            is_archived: false,
            is_draft: mode.is_draft(),
            field_data: FieldData {
                name: post.title(),
                post_body: post.html_content(),
                post_summary: post.summary(),
                category: post.category().as_str(),
                featured: post.featured(),
            },
        }
    }

    /// Create the CMS item for `post`
    pub async fn publish(&self, post: &GeneratedPost) -> std::result::Result<PublishResult, PublishError> {
        info!(
            "Publishing '{}' to collection {} ({})",
            post.title(),
            self.collection_id,
            self.mode
        );
        with_timeout(self.timeout, self.send(post), OPERATION).await
    }

    async fn send(&self, post: &GeneratedPost) -> std::result::Result<PublishResult, PublishError> {
        let url = self.items_url();
        let payload = Self::build_payload(post, self.mode);
        let start_time = Instant::now();

        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_token.expose_secret())
            .header("accept-version", &self.api_version)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        debug!(
            "Webflow responded {} in {}ms",
            status,
            start_time.elapsed().as_millis()
        );

        if !SUCCESS_STATUSES.contains(&status.as_u16()) {
            return Err(PublishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let item_id = serde_json::from_str::<ItemResponse>(&body)
            .ok()
            .and_then(|item| item.id);

        Ok(PublishResult {
            item_id,
            title: post.title().to_string(),
            mode: self.mode,
        })
    }

    fn request_error(&self, e: reqwest::Error) -> PublishError {
        if e.is_timeout() {
            PublishError::timeout(OPERATION, self.timeout)
        } else {
            PublishError::Request(e.to_string())
        }
    }
}

// Request/Response types

/// Item creation payload (Data API v2)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest<'a> {
    pub is_archived: bool,
    pub is_draft: bool,
    pub field_data: FieldData<'a>,
}

/// Blog collection fields
#[derive(Debug, Serialize)]
pub struct FieldData<'a> {
    pub name: &'a str,
    #[serde(rename = "post-body")]
    pub post_body: &'a str,
    #[serde(rename = "post-summary")]
    pub post_summary: &'a str,
    pub category: &'a str,
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
struct ItemResponse {
    id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, RawPost};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn post() -> GeneratedPost {
        GeneratedPost::from_raw(
            RawPost {
                title: "Saving, on-chain".to_string(),
                summary: "Why Piggybank matters.".to_string(),
                html_content: "<h3>Hi</h3><p>There</p>".to_string(),
                category: "Ecosystem".to_string(),
            },
            Category::Economy,
        )
        .unwrap()
    }

    fn publisher(api_base: &str, mode: PublishMode) -> WebflowPublisher {
        let mut config = Config::default();
        config.cms.api_base = api_base.to_string();
        config.cms.publish_mode = mode;
        WebflowPublisher::new(&config, SecretString::from("tok".to_string()), "col123".to_string())
            .unwrap()
    }

    #[test]
    fn test_payload_mapping() {
        let post = post();
        let payload = WebflowPublisher::build_payload(&post, PublishMode::Live);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "isArchived": false,
                "isDraft": false,
                "fieldData": {
                    "name": "Saving, on-chain",
                    "post-body": "<h3>Hi</h3><p>There</p>",
                    "post-summary": "Why Piggybank matters.",
                    "category": "Economy",
                    "featured": false
                }
            })
        );
    }

    #[test]
    fn test_draft_payload_flag() {
        let post = post();
        let payload = WebflowPublisher::build_payload(&post, PublishMode::Draft);
        assert!(payload.is_draft);
        assert!(!payload.is_archived);
    }

    #[test]
    fn test_items_url() {
        let live = publisher("https://api.webflow.com/v2", PublishMode::Live);
        assert_eq!(
            live.items_url().as_str(),
            "https://api.webflow.com/v2/collections/col123/items/live"
        );

        let draft = publisher("https://api.webflow.com/v2/", PublishMode::Draft);
        assert_eq!(
            draft.items_url().as_str(),
            "https://api.webflow.com/v2/collections/col123/items"
        );
    }

    #[tokio::test]
    async fn test_publish_live() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/col123/items/live"))
            .and(header("authorization", "Bearer tok"))
            .and(header("accept-version", "2.0.0"))
            .and(body_json(json!({
                "isArchived": false,
                "isDraft": false,
                "fieldData": {
                    "name": "Saving, on-chain",
                    "post-body": "<h3>Hi</h3><p>There</p>",
                    "post-summary": "Why Piggybank matters.",
                    "category": "Economy",
                    "featured": false
                }
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": "item-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = publisher(&server.uri(), PublishMode::Live)
            .publish(&post())
            .await
            .unwrap();

        assert_eq!(result.item_id.as_deref(), Some("item-1"));
        assert_eq!(result.mode, PublishMode::Live);
        assert_eq!(result.title, "Saving, on-chain");
    }

    #[tokio::test]
    async fn test_publish_draft_uses_items_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/col123/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let result = publisher(&server.uri(), PublishMode::Draft)
            .publish(&post())
            .await
            .unwrap();

        assert_eq!(result.item_id, None);
        assert_eq!(result.mode, PublishMode::Draft);
    }

    #[tokio::test]
    async fn test_publish_422_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string(
                r#"{"code":"validation_error","message":"Validation Error: slug is required"}"#,
            ))
            .mount(&server)
            .await;

        let err = publisher(&server.uri(), PublishMode::Live)
            .publish(&post())
            .await
            .unwrap_err();

        match err {
            PublishError::Status { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("slug is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_other_2xx_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let err = publisher(&server.uri(), PublishMode::Live)
            .publish(&post())
            .await
            .unwrap_err();

        match err {
            PublishError::Status { status, body } => {
                assert_eq!(status, 204);
                assert!(body.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.cms.api_base = server.uri();
        config.cms.timeout_secs = 1;
        let publisher =
            WebflowPublisher::new(&config, SecretString::from("t".to_string()), "c".to_string())
                .unwrap();

        let err = publisher.publish(&post()).await.unwrap_err();
        assert!(matches!(err, PublishError::Timeout { .. }));
    }

    #[test]
    fn test_debug_redacts_token() {
        let publisher = publisher("https://api.webflow.com/v2", PublishMode::Live);
        let debug = format!("{:?}", publisher);
        assert!(!debug.contains("\"tok\""));
        assert!(debug.contains("[REDACTED]"));
    }
}
