//! Client for the speech-to-text collaborator service.

use crate::config::ProviderConfig;
use crate::error::AssistantError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;

const TRANSCRIPTION_MODEL: &str = "whisper-1";
const TARGET_LANGUAGE: &str = "de";

/// Sends audio blobs to the transcription endpoint. One attempt; callers
/// demote failures to a user-facing apology.
pub struct Transcriber {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Transcriber {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, AssistantError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                AssistantError::AiError(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        Ok(Transcriber {
            client: Client::new(),
            api_key,
            base_url: config.base_url.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Transcriber {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Transcribe an audio blob into text.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
    ) -> Result<String, AssistantError> {
        let form = Form::new()
            .text("model", TRANSCRIPTION_MODEL)
            .text("language", TARGET_LANGUAGE)
            .part("file", Part::bytes(audio).file_name(filename.to_string()));

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::HttpStatus(response.status()));
        }

        let body: Value = response.json().await?;
        body["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                AssistantError::AiError("transcription reply carried no text".to_string())
            })
    }
}
