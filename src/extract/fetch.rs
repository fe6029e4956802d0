use crate::config::FetchConfig;
use crate::error::AssistantError;
use reqwest::Client;
use std::time::Duration;

/// HTTP fetcher for recipe pages. One attempt, bounded timeout, browser
/// identity string; a non-success status is an error so the pipeline can
/// fall through.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, AssistantError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AssistantError::HttpStatus(response.status()));
        }
        Ok(response.text().await?)
    }
}
