//! MediaWiki `api.php` client for revision queries.
//!
//! One GET per run: no retries, no `rvcontinue` pagination.

use crate::domain::model::{Revision, RevisionQuery};
use crate::utils::error::{Result, TrendError};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (revision statistics tool)"
);

#[derive(Debug, Deserialize)]
struct ApiResponse {
    query: Option<QueryBody>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    pages: Option<Vec<PageBody>>,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    invalidreason: Option<String>,
    revisions: Option<Vec<RevisionBody>>,
}

#[derive(Debug, Deserialize)]
struct RevisionBody {
    timestamp: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WikiApiClient {
    endpoint: String,
    client: Client,
}

impl WikiApiClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// 重新建立帶逾時設定的 HTTP client
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(self)
    }

    pub fn query_params(query: &RevisionQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("prop", "revisions".to_string()),
            ("rvprop", query.rvprop.clone()),
            ("titles", query.title.clone()),
            ("formatversion", "2".to_string()),
        ];
        if let Some(limit) = query.limit {
            params.push(("rvlimit", limit.to_string()));
        }
        params
    }

    /// 完整請求 URL，供 dry run 與日誌使用
    pub fn request_url(&self, query: &RevisionQuery) -> Result<String> {
        let url = url::Url::parse_with_params(&self.endpoint, Self::query_params(query))
            .map_err(|e| TrendError::InvalidConfigValueError {
                field: "api_endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;
        Ok(url.to_string())
    }

    pub async fn fetch_revisions(&self, query: &RevisionQuery) -> Result<Vec<Revision>> {
        tracing::debug!(
            "Requesting revisions of '{}' from {}",
            query.title,
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&Self::query_params(query))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(TrendError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("Received {} bytes", body.len());

        parse_revisions(&body)
    }
}

/// 解析 `formatversion=2` 的回應，取出 `query.pages[0].revisions`
pub fn parse_revisions(body: &str) -> Result<Vec<Revision>> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| TrendError::parse(format!("response is not valid JSON: {}", e)))?;

    if let Some(error) = response.error {
        return Err(TrendError::Api {
            code: error.code,
            info: error.info,
        });
    }

    let query = response
        .query
        .ok_or_else(|| TrendError::parse("response has no 'query' object"))?;
    let pages = query
        .pages
        .ok_or_else(|| TrendError::parse("response has no 'query.pages' array"))?;
    let page = pages
        .into_iter()
        .next()
        .ok_or_else(|| TrendError::parse("'query.pages' is empty"))?;

    let title = page.title.unwrap_or_default();
    if page.missing {
        return Err(TrendError::ArticleNotFound { title });
    }
    if page.invalid {
        return Err(TrendError::Api {
            code: "invalidtitle".to_string(),
            info: page
                .invalidreason
                .unwrap_or_else(|| format!("invalid title '{}'", title)),
        });
    }

    let revisions = page
        .revisions
        .ok_or_else(|| TrendError::parse("'query.pages[0]' has no 'revisions' array"))?;

    revisions
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let timestamp = raw.timestamp.ok_or_else(|| {
                TrendError::parse(format!(
                    "revision {} has no 'timestamp' (request rvprop=timestamp)",
                    index
                ))
            })?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| {
                    TrendError::parse(format!(
                        "revision {} has invalid timestamp '{}': {}",
                        index, timestamp, e
                    ))
                })?
                .with_timezone(&Utc);
            Ok(Revision {
                timestamp,
                content: raw.content,
            })
        })
        .collect()
}
