//! HTTP client for the Sanity query API.

use async_trait::async_trait;
use peakmoney_core::SanityConfig;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::SyncError;
use crate::groq::query_for;
use crate::source::{ContentQuery, ContentSource};

/// Query API response envelope.
#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Reads content from a Sanity dataset over HTTPS.
pub struct SanityClient {
    client: reqwest::Client,
    query_url: String,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            query_url: config.query_url(),
        })
    }

    /// Client against an explicit query endpoint, e.g. a local mock server.
    pub fn with_query_url(query_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            query_url: query_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

/// Query-string pairs: the query text, then each parameter as `$name=<json>`.
fn query_pairs(query: &ContentQuery) -> Result<Vec<(String, String)>, SyncError> {
    let groq = query_for(query)?;
    let mut pairs = vec![("query".to_string(), groq.query.to_string())];
    for (name, value) in groq.params {
        pairs.push((format!("${name}"), serde_json::to_string(&value)?));
    }
    Ok(pairs)
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch(&self, query: &ContentQuery) -> Result<Value, SyncError> {
        let pairs = query_pairs(query)?;

        debug!(url = %self.query_url, %query, "querying content store");
        let resp = self
            .client
            .get(&self.query_url)
            .query(&pairs)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: QueryResponse = resp.json().await?;
        Ok(envelope.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ContentKind;

    #[test]
    fn params_are_json_encoded() {
        let pairs = query_pairs(&ContentQuery::slug(ContentKind::NewsArticle, "boc-holds")).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[1], ("$slug".to_string(), "\"boc-holds\"".to_string()));
    }

    #[test]
    fn envelope_null_result() {
        let envelope: QueryResponse =
            serde_json::from_str(r#"{"ms": 3, "query": "*", "result": null}"#).unwrap();
        assert!(envelope.result.is_null());
    }

    #[test]
    fn client_uses_configured_endpoint() {
        let client = SanityClient::new(&SanityConfig::default()).unwrap();
        assert_eq!(
            client.query_url(),
            "https://37uuhcx4.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }

    #[test]
    fn explicit_endpoint_trims_trailing_slash() {
        let client = SanityClient::with_query_url("http://localhost:3333/".into());
        assert_eq!(client.query_url(), "http://localhost:3333");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_http_error() {
        let client = SanityClient::with_query_url("http://127.0.0.1:9".into());
        let err = client
            .fetch(&ContentQuery::all(ContentKind::SavingsAccount))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Http(_)));
    }
}
