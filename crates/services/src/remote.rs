use async_trait::async_trait;
use reqwest::Client;

use quiz_core::model::TopicSet;
use quiz_core::wire;

use crate::error::FetchError;
use crate::reachability::Reachability;

/// Longest body prefix retained when a response fails to decode.
pub const BODY_PREVIEW_CHARS: usize = 500;

/// Contract for fetching a topic document from a remote source.
#[async_trait]
pub trait TopicFetcher: Send + Sync {
    /// Fetch and decode the topic set at `url`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` per the failure taxonomy: reachability gate,
    /// URL validation, transport, HTTP status, empty body, decode.
    async fn fetch(&self, url: &str) -> Result<TopicSet, FetchError>;
}

/// HTTP fetcher gated on the reachability signal.
///
/// Does not touch any cache; persistence is the sync layer's concern.
#[derive(Clone)]
pub struct HttpTopicFetcher {
    client: Client,
    reachability: Reachability,
}

impl HttpTopicFetcher {
    #[must_use]
    pub fn new(reachability: Reachability) -> Self {
        Self {
            client: Client::new(),
            reachability,
        }
    }
}

#[async_trait]
impl TopicFetcher for HttpTopicFetcher {
    async fn fetch(&self, url: &str) -> Result<TopicSet, FetchError> {
        if !self.reachability.is_available() {
            return Err(FetchError::Unreachable);
        }

        let url = reqwest::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(FetchError::EmptyResponse);
        }

        wire::decode_topic_set(&body).map_err(|source| FetchError::Decode {
            body_prefix: body_preview(&body),
            source,
        })
    }
}

/// Bounded, lossy prefix of a response body for diagnostic logging.
#[must_use]
pub fn body_preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_network_fails_before_any_request() {
        let (_monitor, reachability) = Reachability::channel(false);
        let fetcher = HttpTopicFetcher::new(reachability);

        let err = fetcher.fetch("https://example.com/questions.json").await;
        assert!(matches!(err, Err(FetchError::Unreachable)));
    }

    #[tokio::test]
    async fn malformed_url_is_rejected_without_a_request() {
        let (_monitor, reachability) = Reachability::channel(true);
        let fetcher = HttpTopicFetcher::new(reachability);

        let err = fetcher.fetch("not a url").await;
        assert!(matches!(err, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn body_preview_is_bounded() {
        let body = vec![b'x'; 2_000];
        assert_eq!(body_preview(&body).len(), BODY_PREVIEW_CHARS);
    }

    #[test]
    fn body_preview_tolerates_invalid_utf8() {
        let preview = body_preview(&[0xff, 0xfe, b'o', b'k']);
        assert!(preview.ends_with("ok"));
    }
}
