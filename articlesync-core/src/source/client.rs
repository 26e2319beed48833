//! HTTP client for the articles API.

use async_trait::async_trait;

use super::article::{article_fields, article_to_item, parse_articles};
use super::{CancelSignal, DataSourceReader};
use crate::models::DataSource;
use crate::sync::SyncError;

/// Articles endpoint used when none is configured.
pub const DEFAULT_ARTICLES_URL: &str = "https://brain-stg.rotobot.ai/v1/articles";

/// Reads the articles data source over HTTP.
///
/// Every fetch is a single `GET` of the whole article list.
#[derive(Clone)]
pub struct ArticlesClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl ArticlesClient {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token,
        }
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_body(&self) -> Result<String, SyncError> {
        let mut request = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Fetch(format!(
                "Failed to fetch data source: server returned status {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SyncError::Fetch(e.to_string()))
    }

    async fn load(&self, data_source_id: &str) -> Result<DataSource, SyncError> {
        let body = self.get_body().await?;
        let records = parse_articles(&body).map_err(|e| SyncError::Parse(e.to_string()))?;

        tracing::debug!(
            "Fetched {} article(s) from {} for data source '{}'",
            records.len(),
            self.endpoint,
            data_source_id
        );

        Ok(DataSource {
            id: data_source_id.to_string(),
            fields: article_fields(),
            items: records.iter().map(article_to_item).collect(),
        })
    }
}

impl std::fmt::Debug for ArticlesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticlesClient")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl DataSourceReader for ArticlesClient {
    async fn fetch(
        &self,
        data_source_id: &str,
        cancel: Option<&CancelSignal>,
    ) -> Result<DataSource, SyncError> {
        let Some(cancel) = cancel else {
            return self.load(data_source_id).await;
        };

        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        // Dropping the request future aborts the connection.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SyncError::Cancelled),
            result = self.load(data_source_id) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/articles", addr)
    }

    fn sample_articles() -> Value {
        json!([
            {
                "article_id": "1",
                "title": "T",
                "date_created": "2024-01-01",
                "header_image_url": "u",
                "full_text": "c"
            },
            {
                "article_id": "2",
                "title": "Second",
                "date_created": "2024-02-01",
                "header_image_url": null,
                "full_text": "<p>body</p>"
            }
        ])
    }

    #[tokio::test]
    async fn test_fetch_maps_articles() {
        let url = serve(Router::new().route(
            "/v1/articles",
            get(|| async { Json(sample_articles()) }),
        ))
        .await;

        let client = ArticlesClient::new(url, None);
        let source = client.fetch("articles", None).await.unwrap();

        assert_eq!(source.id, "articles");
        assert_eq!(source.fields.len(), 5);
        assert_eq!(source.items.len(), 2);
        assert_eq!(source.items[0]["article_id"].as_slug(), Some("1"));
        assert_eq!(source.items[1]["title"].value, "Second");
        assert_eq!(source.items[1]["image"].value, Value::Null);
    }

    #[tokio::test]
    async fn test_fetch_sends_accept_and_bearer_headers() {
        let url = serve(Router::new().route(
            "/v1/articles",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok());
                let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
                if auth == Some("Bearer secret-token") && accept == Some("application/json") {
                    (StatusCode::OK, "[]")
                } else {
                    (StatusCode::UNAUTHORIZED, "")
                }
            }),
        ))
        .await;

        let client = ArticlesClient::new(url.clone(), Some("secret-token".into()));
        assert!(client.fetch("articles", None).await.is_ok());

        let anonymous = ArticlesClient::new(url, None);
        let err = anonymous.fetch("articles", None).await.unwrap_err();
        assert!(matches!(err, SyncError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let url = serve(Router::new().route(
            "/v1/articles",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;

        let err = ArticlesClient::new(url, None)
            .fetch("articles", None)
            .await
            .unwrap_err();
        match err {
            SyncError::Fetch(message) => assert!(message.contains("500")),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let url = serve(Router::new().route(
            "/v1/articles",
            get(|| async { Json(json!({"articles": []})) }),
        ))
        .await;

        let err = ArticlesClient::new(url, None)
            .fetch("articles", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_fetch_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ArticlesClient::new(format!("http://{}/v1/articles", addr), None)
            .fetch("articles", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_request() {
        let url = serve(Router::new().route(
            "/v1/articles",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Json(sample_articles())
            }),
        ))
        .await;

        let client = ArticlesClient::new(url, None);
        let cancel = CancelSignal::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            client.fetch("articles", Some(&cancel)),
        )
        .await
        .expect("fetch was not aborted");
        assert!(matches!(result, Err(SyncError::Cancelled)));
    }

    #[tokio::test]
    async fn test_already_cancelled_makes_no_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let url = serve(Router::new().route(
            "/v1/articles",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!([]))
                }
            }),
        ))
        .await;

        let cancel = CancelSignal::new();
        cancel.cancel();

        let result = ArticlesClient::new(url, None)
            .fetch("articles", Some(&cancel))
            .await;
        assert!(matches!(result, Err(SyncError::Cancelled)));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = ArticlesClient::new(DEFAULT_ARTICLES_URL, Some("secret".into()));
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
