//! Generate → Publish Pipeline
//!
//! One post per run. Generation errors return before the CMS is contacted.

use tracing::info;

use crate::ai::ContentGenerator;
use crate::cms::{PublishResult, WebflowPublisher};
use crate::types::{GeneratedPost, Result};

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub post: GeneratedPost,
    pub result: PublishResult,
}

pub struct Pipeline {
    generator: ContentGenerator,
    publisher: WebflowPublisher,
}

impl Pipeline {
    pub fn new(generator: ContentGenerator, publisher: WebflowPublisher) -> Self {
        Self {
            generator,
            publisher,
        }
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        let post = self.generator.generate().await?;
        let result = self.publisher.publish(&post).await?;

        info!(
            "Run complete: '{}' ({}, {})",
            result.title,
            post.category(),
            result.mode
        );

        Ok(RunReport { post, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::testing::{FailingProvider, StaticProvider};
    use crate::ai::selection::FixedSelector;
    use crate::config::{Config, PublishMode};
    use crate::types::{AppError, Category, PublishError};
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FENCED_ECOSYSTEM: &str = "```json\n{\"title\":\"T\",\"summary\":\"S\",\"html_content\":\"<h3>H</h3><p>P</p>\",\"category\":\"Ecosystem\"}\n```";

    fn publisher(server: &MockServer) -> WebflowPublisher {
        let mut config = Config::default();
        config.cms.api_base = server.uri();
        WebflowPublisher::new(&config, SecretString::from("tok".to_string()), "col".to_string())
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_publishes_forced_category() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections/col/items/live"))
            .and(body_partial_json(json!({
                "fieldData": {"name": "T", "category": "Product", "featured": false}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let generator = ContentGenerator::new(
            Box::new(StaticProvider::new(FENCED_ECOSYSTEM)),
            Box::new(FixedSelector(Category::Product)),
        );
        let report = Pipeline::new(generator, publisher(&server))
            .run()
            .await
            .unwrap();

        assert_eq!(report.post.category(), Category::Product);
        assert_eq!(report.result.item_id.as_deref(), Some("abc"));
        assert_eq!(report.result.mode, PublishMode::Live);
    }

    #[tokio::test]
    async fn test_generation_failure_skips_publish() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let generator = ContentGenerator::new(
            Box::new(FailingProvider::status(500, "internal")),
            Box::new(FixedSelector(Category::Economy)),
        );
        let err = Pipeline::new(generator, publisher(&server))
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn test_invalid_output_skips_publish() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(202))
            .expect(0)
            .mount(&server)
            .await;

        let generator = ContentGenerator::new(
            Box::new(StaticProvider::new(r#"{"title":"T"}"#)),
            Box::new(FixedSelector(Category::Economy)),
        );
        let err = Pipeline::new(generator, publisher(&server))
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
    }

    #[tokio::test]
    async fn test_publish_rejection_is_publish_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Error"))
            .expect(1)
            .mount(&server)
            .await;

        let generator = ContentGenerator::new(
            Box::new(StaticProvider::new(FENCED_ECOSYSTEM)),
            Box::new(FixedSelector(Category::Ecosystem)),
        );
        let err = Pipeline::new(generator, publisher(&server))
            .run()
            .await
            .unwrap_err();

        match &err {
            AppError::Publish(PublishError::Status { status, body }) => {
                assert_eq!(*status, 422);
                assert_eq!(body, "Validation Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 5);
    }
}
