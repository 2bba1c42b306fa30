use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::ports::{RemoteFetchError, RemoteFetcher};
use crate::domain::value_objects::SourceUrl;

const USER_AGENT_VALUE: &str = concat!("gpt-backend/", env!("CARGO_PKG_VERSION"));

/// Remote fetcher over reqwest with a whole-request deadline and a body size cap
#[derive(Debug, Clone)]
pub struct HttpRemoteFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_bytes: u64,
}

impl HttpRemoteFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, reqwest::Error> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            // A redirect is a non-200 answer, not a hop to follow
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            timeout,
            max_bytes,
        })
    }

    fn map_error(&self, url: &SourceUrl, err: reqwest::Error) -> RemoteFetchError {
        if err.is_timeout() {
            RemoteFetchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            RemoteFetchError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    fn too_large(&self, url: &SourceUrl) -> RemoteFetchError {
        RemoteFetchError::TooLarge {
            url: url.to_string(),
            max_bytes: self.max_bytes,
        }
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch(&self, url: &SourceUrl) -> Result<Bytes, RemoteFetchError> {
        debug!(url = %url, "fetching remote file");

        let mut response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| self.map_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = status.as_u16(), "remote file not available");
            return Err(RemoteFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(self.too_large(url));
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_error(url, e))? {
            if (body.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, size_bytes = body.len(), "remote file fetched");
        Ok(body.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpRemoteFetcher {
        HttpRemoteFetcher::new(Duration::from_secs(5), 1024).unwrap()
    }

    fn url(server: &MockServer, p: &str) -> SourceUrl {
        SourceUrl::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
            .mount(&server)
            .await;

        let bytes = fetcher().fetch(&url(&server, "/logo.png")).await.unwrap();
        assert_eq!(&bytes[..], &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_fetch_non_200_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&url(&server, "/missing.png"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("/missing.png"));
    }

    #[tokio::test]
    async fn test_fetch_other_success_codes_are_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = fetcher().fetch(&url(&server, "/empty")).await.unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[tokio::test]
    async fn test_fetch_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/moved.png"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/final.png", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/final.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"IMG".to_vec()))
            .expect(0)
            .mount(&server)
            .await;

        let err = fetcher().fetch(&url(&server, "/moved.png")).await.unwrap_err();
        assert!(matches!(err, RemoteFetchError::Status { status: 302, .. }));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpRemoteFetcher::new(Duration::from_millis(200), 1024).unwrap();
        let err = fetcher.fetch(&url(&server, "/slow")).await.unwrap_err();
        assert!(matches!(err, RemoteFetchError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 2048]))
            .mount(&server)
            .await;

        let err = fetcher().fetch(&url(&server, "/big.bin")).await.unwrap_err();
        assert!(matches!(err, RemoteFetchError::TooLarge { max_bytes: 1024, .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Nothing listens on port 1
        let target = SourceUrl::parse("http://127.0.0.1:1/gone").unwrap();

        let err = fetcher().fetch(&target).await.unwrap_err();
        assert!(matches!(err, RemoteFetchError::Network { .. }));
        assert_eq!(err.status(), None);
    }
}
