//! Sarvam AI translation provider
//! POSTs one text per request and expects `{"translated_text": ...}` back

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{TranslateError, TranslateRequest, TranslateResponse, TranslationProvider};
use crate::config::{ProviderConfig, SpeakerGender, TranslationMode};

const SUBSCRIPTION_KEY_HEADER: &str = "api-subscription-key";

#[derive(Serialize)]
struct SarvamRequest<'a> {
    input: &'a str,
    source_language_code: &'a str,
    target_language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker_gender: Option<SpeakerGender>,
    mode: TranslationMode,
    model: &'a str,
    enable_preprocessing: bool,
}

#[derive(Deserialize)]
struct SarvamResponse {
    translated_text: String,
}

pub struct SarvamProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    mode: TranslationMode,
    enable_preprocessing: bool,
    speaker_gender: Option<SpeakerGender>,
    timeout: Duration,
}

impl SarvamProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            endpoint: config.api_base.clone(),
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
            mode: config.mode,
            enable_preprocessing: config.enable_preprocessing,
            speaker_gender: config.speaker_gender,
            timeout,
        })
    }

    fn classify(&self, error: reqwest::Error) -> TranslateError {
        if error.is_timeout() {
            TranslateError::Timeout(self.timeout)
        } else {
            TranslateError::Transport(error)
        }
    }
}

#[async_trait]
impl TranslationProvider for SarvamProvider {
    fn name(&self) -> &str {
        "Sarvam AI"
    }

    fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::CredentialMissing);
        }

        let body = SarvamRequest {
            input: &request.text,
            source_language_code: &request.source_lang,
            target_language_code: &request.target_lang,
            speaker_gender: self.speaker_gender,
            mode: self.mode,
            model: &self.model,
            enable_preprocessing: self.enable_preprocessing,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Provider responded");
        let payload = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(TranslateError::ProviderRequestFailed {
                status: status.as_u16(),
                body: payload,
            });
        }

        let parsed: SarvamResponse = serde_json::from_str(&payload)
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        Ok(TranslateResponse { translated_text: parsed.translated_text })
    }
}
