//! Translation module
//! Cache-backed, fail-open translation of single texts against a remote provider

pub mod cache;
pub mod sarvam;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::i18n::{self, Language};
use cache::TranslationCache;
use sarvam::SarvamProvider;

/// Translation request, with language codes already in the provider's scheme
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Translation response
#[derive(Debug, Clone)]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Everything that can go wrong while asking the provider.
/// None of these ever reach callers of [`Translator::translate`].
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation API key not configured")]
    CredentialMissing,
    #[error("provider returned HTTP {status}: {body}")]
    ProviderRequestFailed { status: u16, body: String },
    #[error("request to provider failed: {0}")]
    Transport(reqwest::Error),
    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// A remote translation backend
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether a credential is configured; without one no request is attempted
    fn has_credential(&self) -> bool;

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, TranslateError>;
}

/// Receives every failure the translator swallows
pub type FailureHook = Arc<dyn Fn(&TranslateError) + Send + Sync>;

const PROVIDER_CODES: &[(&str, &str)] = &[
    ("en", "en-IN"),
    ("hi", "hi-IN"),
    ("ta", "ta-IN"),
    ("bn", "bn-IN"),
    ("te", "te-IN"),
    ("mr", "mr-IN"),
    ("gu", "gu-IN"),
    ("kn", "kn-IN"),
    ("ml", "ml-IN"),
    ("pa", "pa-IN"),
];

fn mapped_code(code: &str) -> Option<&'static str> {
    PROVIDER_CODES.iter().find(|(c, _)| *c == code).map(|(_, p)| *p)
}

/// Provider code for a source language; unknown codes fall back to the default source
pub fn provider_source_code(code: &str) -> String {
    mapped_code(code)
        .or_else(|| mapped_code(i18n::default_language().code))
        .unwrap_or(code)
        .to_string()
}

/// Provider code for a target language; unknown codes pass through unchanged
pub fn provider_target_code(code: &str) -> String {
    mapped_code(code).unwrap_or(code).to_string()
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

/// Main translator: cache lookup, then the provider, then the original text
pub struct Translator {
    provider: Arc<dyn TranslationProvider>,
    cache: TranslationCache,
    failure_hook: Option<FailureHook>,
}

impl Translator {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self {
            provider,
            cache: TranslationCache::default(),
            failure_hook: None,
        }
    }

    /// Build the Sarvam-backed translator described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = SarvamProvider::new(&config.provider)?;
        Ok(Self::new(Arc::new(provider)).with_cache_capacity(config.cache_capacity))
    }

    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache = TranslationCache::new(capacity);
        self
    }

    pub fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.failure_hook = Some(hook);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn has_credential(&self) -> bool {
        self.provider.has_credential()
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Wipe every cached translation
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::debug!("Translation cache cleared");
    }

    /// Translate `text` from `source` into `target`. Always resolves to something displayable.
    pub async fn translate(&self, text: &str, target: &Language, source: &Language) -> String {
        if target == source || text.is_empty() {
            return text.to_string();
        }

        if let Some(hit) = self.cache.get(source.code, target.code, text) {
            tracing::debug!(source_lang = source.code, target_lang = target.code, "Cache hit");
            return hit;
        }

        match self.fetch(text, target, source).await {
            Ok(translated) => {
                self.cache.insert(source.code, target.code, text, translated.clone());
                translated
            }
            Err(error) => {
                self.report(&error, target, source);
                text.to_string()
            }
        }
    }

    /// Translate from the default source language
    pub async fn translate_from_default(&self, text: &str, target: &Language) -> String {
        self.translate(text, target, &i18n::default_language()).await
    }

    /// Translate each text independently; output order matches input order
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        target: &Language,
        source: &Language,
    ) -> Vec<String> {
        futures::future::join_all(texts.iter().map(|text| self.translate(text.as_ref(), target, source))).await
    }

    async fn fetch(&self, text: &str, target: &Language, source: &Language) -> Result<String, TranslateError> {
        if !self.provider.has_credential() {
            return Err(TranslateError::CredentialMissing);
        }

        let request = TranslateRequest {
            text: text.to_string(),
            source_lang: provider_source_code(source.code),
            target_lang: provider_target_code(target.code),
        };
        tracing::debug!(
            provider = self.provider.name(),
            source_lang = %request.source_lang,
            target_lang = %request.target_lang,
            chars = text.chars().count(),
            "Translating \"{}\"",
            preview(text)
        );

        let response = self.provider.translate(&request).await?;
        Ok(response.translated_text)
    }

    fn report(&self, error: &TranslateError, target: &Language, source: &Language) {
        match error {
            TranslateError::CredentialMissing => tracing::warn!(
                provider = self.provider.name(),
                "Translation API key not configured, showing original text"
            ),
            _ => tracing::error!(
                provider = self.provider.name(),
                source_lang = source.code,
                target_lang = target.code,
                "Translation failed, showing original text: {}",
                error
            ),
        }
        if let Some(hook) = &self.failure_hook {
            hook(error);
        }
    }
}
