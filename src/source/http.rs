use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode, header::ACCEPT};

use crate::error::FetchError;

use super::adapter::ListingSource;

/// Default whole-request budget (connect + headers + body).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP listing source backed by a shared `reqwest::Client`.
///
/// The client is built once; every collection task shares its
/// connection pool through the `Arc` the runner holds.
pub struct HttpListingSource {
    client: Client,
    api_base: String,
    timeout: Duration,
}

impl HttpListingSource {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(err)
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for HttpListingSource {

    fn name(&self) -> &'static str {
        "magiceden"
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn fetch(&self, target: &str) -> Result<Vec<u8>, FetchError> {
        debug!("GET {target}");

        let response = self
            .client
            .get(target)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Upstream {
                status: status.as_u16(),
            });
        }

        // The client timeout also covers reading the body.
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LISTINGS_PATH: &str = "/collections/degods/listings";

    fn source_for(server: &MockServer, timeout: Duration) -> (HttpListingSource, String) {
        let source = HttpListingSource::new(server.uri(), timeout).unwrap();
        let target = format!("{}{}", server.uri(), LISTINGS_PATH);
        (source, target)
    }

    #[tokio::test]
    async fn returns_body_on_200_with_json_accept_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LISTINGS_PATH))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let (source, target) = source_for(&server, DEFAULT_TIMEOUT);
        let body = source.fetch(&target).await.unwrap();

        assert_eq!(body, b"[]");
    }

    #[tokio::test]
    async fn non_200_status_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LISTINGS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (source, target) = source_for(&server, DEFAULT_TIMEOUT);
        let err = source.fetch(&target).await.unwrap_err();

        assert!(matches!(err, FetchError::Upstream { status: 500 }));
    }

    #[tokio::test]
    async fn other_success_codes_are_still_upstream_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LISTINGS_PATH))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (source, target) = source_for(&server, DEFAULT_TIMEOUT);
        let err = source.fetch(&target).await.unwrap_err();

        assert!(matches!(err, FetchError::Upstream { status: 204 }));
    }

    #[tokio::test]
    async fn slow_response_is_timeout_not_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LISTINGS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let (source, target) = source_for(&server, Duration::from_millis(200));
        let err = source.fetch(&target).await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
        assert_eq!(err.kind(), "TimeoutError");
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Nothing listens on port 1.
        let source = HttpListingSource::new("http://127.0.0.1:1", DEFAULT_TIMEOUT).unwrap();
        let err = source
            .fetch("http://127.0.0.1:1/collections/degods/listings")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    }
}
