use crate::adapters::payload::parse_teams;
use crate::domain::model::TeamRecord;
use crate::domain::ports::{ConfigProvider, RecordSource};
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/user/get-all-teams";

/// Pulls team records from the leaderboard backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpRecordSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let endpoint = config.source_endpoint().unwrap_or(DEFAULT_ENDPOINT);
        Self::new(endpoint)
            .with_timeout(config.request_timeout())
            .with_headers(config.headers().clone())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(&self) -> Result<Vec<TeamRecord>, FetchError> {
        let mut request = self.client.get(&self.endpoint);

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            // The backend answers an empty collection with 404 and a JSON
            // `message`; anything else is a wrong route.
            let body = response.bytes().await?;
            return match serde_json::from_slice::<serde_json::Value>(&body) {
                Ok(value) if value.get("message").is_some() => {
                    tracing::info!("Record source reports no teams yet");
                    Ok(Vec::new())
                }
                _ => Err(FetchError::Status {
                    status: status.as_u16(),
                }),
            };
        }

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_teams(&body)
    }

    fn describe(&self) -> String {
        format!("HTTP {}", self.endpoint)
    }
}
