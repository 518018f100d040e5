//! Shared fakes for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::store::{MemoryStore, PreferenceStore, StoreError};
use crate::translate::{TranslateError, TranslateRequest, TranslateResponse, TranslationProvider};

/// Scriptable provider. Unless a reply is registered, answers `"[<target>] <text>"`.
#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<HashMap<String, String>>,
    failing_calls: Mutex<Vec<usize>>,
    delays: Mutex<HashMap<String, Duration>>,
    no_credential: AtomicBool,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, String, String)>>,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_reply(self: Arc<Self>, text: &str, reply: &str) -> Arc<Self> {
        self.replies.lock().unwrap().insert(text.to_string(), reply.to_string());
        self
    }

    /// 1-based call numbers that answer with HTTP 500
    pub fn failing_on(self: Arc<Self>, calls: &[usize]) -> Arc<Self> {
        self.failing_calls.lock().unwrap().extend_from_slice(calls);
        self
    }

    /// Delay answers for one provider target code
    pub fn with_delay(self: Arc<Self>, target: &str, delay: Duration) -> Arc<Self> {
        self.delays.lock().unwrap().insert(target.to_string(), delay);
        self
    }

    pub fn without_credential(self: Arc<Self>) -> Arc<Self> {
        self.no_credential.store(true, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(text, source code, target code)` per call, in call order
    pub fn requests(&self) -> Vec<(String, String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn has_credential(&self) -> bool {
        !self.no_credential.load(Ordering::SeqCst)
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, TranslateError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push((
            request.text.clone(),
            request.source_lang.clone(),
            request.target_lang.clone(),
        ));

        let delay = self.delays.lock().unwrap().get(&request.target_lang).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_calls.lock().unwrap().contains(&call) {
            return Err(TranslateError::ProviderRequestFailed {
                status: 500,
                body: "scripted failure".to_string(),
            });
        }

        let translated_text = self
            .replies
            .lock()
            .unwrap()
            .get(&request.text)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", request.target_lang, request.text));
        Ok(TranslateResponse { translated_text })
    }
}

/// Memory store that counts writes
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for CountingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}
