//! REST implementation of the session source.

use std::time::Duration;

use async_trait::async_trait;
use benchview_core::{
    BenchviewResult, Error, RunnerPage, RunnerRecord, SessionPage, SessionRecord, UpstreamError,
};
use benchview_reader::SessionSource;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;

/// Client for the remote session API.
///
/// Maps every failure into the single upstream error kind the caches
/// expect: transport failures, non-success statuses with the response body
/// as diagnostic, and body decode failures. No retries; the request
/// timeout comes from the configuration.
#[derive(Clone)]
pub struct RestSessionClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestSessionClient {
    pub fn new(config: &ClientConfig) -> BenchviewResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, usize)],
    ) -> BenchviewResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "session api request");
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.map_err(transport)?;
        parse_response(response).await
    }
}

#[async_trait]
impl SessionSource for RestSessionClient {
    async fn fetch_sessions(&self, skip: usize, count: usize) -> BenchviewResult<SessionPage> {
        self.get_json("/sessions", &[("skip", skip), ("limit", count)])
            .await
    }

    async fn fetch_runner_sessions(
        &self,
        runner_id: &str,
        skip: usize,
        count: usize,
    ) -> BenchviewResult<SessionPage> {
        let runner_id = parse_numeric_id(runner_id)?;
        self.get_json(
            &format!("/runners/{}/sessions", runner_id),
            &[("skip", skip), ("limit", count)],
        )
        .await
    }

    async fn fetch_session_detail(&self, id: &str) -> BenchviewResult<SessionRecord> {
        let id = parse_numeric_id(id)?;
        self.get_json(&format!("/sessions/{}", id), &[]).await
    }

    async fn fetch_runners(&self, skip: usize, count: usize) -> BenchviewResult<Vec<RunnerRecord>> {
        let page: RunnerPage = self
            .get_json("/runners", &[("skip", skip), ("limit", count)])
            .await?;
        Ok(page.data)
    }
}

/// Identifiers are numeric on the wire; reject anything else before it
/// reaches a URL.
fn parse_numeric_id(id: &str) -> BenchviewResult<i64> {
    id.trim()
        .parse()
        .map_err(|_| Error::InvalidId { id: id.to_string() })
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> BenchviewResult<T> {
    let status = response.status();
    if status.is_success() {
        response.json::<T>().await.map_err(|err| {
            UpstreamError::Decode {
                message: err.to_string(),
            }
            .into()
        })
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

fn transport(err: reqwest::Error) -> Error {
    UpstreamError::Transport {
        message: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestSessionClient {
        RestSessionClient::new(&ClientConfig {
            api_base_url: "https://api.example.org/api/v1/".to_string(),
            request_timeout_ms: 5000,
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        assert_eq!(client().base_url(), "https://api.example.org/api/v1");
    }

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(parse_numeric_id("42").unwrap(), 42);
        assert_eq!(parse_numeric_id(" 7 ").unwrap(), 7);
        assert!(matches!(
            parse_numeric_id("latest"),
            Err(Error::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_numeric_runner_id_fails_without_network() {
        let err = client()
            .fetch_runner_sessions("not-a-runner", 0, 10)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidId {
                id: "not-a-runner".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_numeric_session_id_fails_without_network() {
        assert!(matches!(
            client().fetch_session_detail("abc").await,
            Err(Error::InvalidId { .. })
        ));
    }
}
