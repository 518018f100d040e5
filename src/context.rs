//! Process-wide translation state
//! Owns the current language, its persistence, and the in-flight indicator

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::i18n::{self, Language};
use crate::store::PreferenceStore;
use crate::translate::Translator;

/// Key under which the chosen language code is persisted
pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";

/// Counts a translation as in flight until dropped, even if the future is cancelled
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct TranslationContext {
    translator: Arc<Translator>,
    store: Arc<dyn PreferenceStore>,
    current: watch::Sender<Language>,
    in_flight: AtomicUsize,
}

impl TranslationContext {
    /// Create the context, restoring the persisted language if it is still in the catalog
    pub fn new(translator: Arc<Translator>, store: Arc<dyn PreferenceStore>) -> Self {
        let initial = saved_language(store.as_ref());
        let (current, _) = watch::channel(initial);
        Self {
            translator,
            store,
            current,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn current_language(&self) -> Language {
        *self.current.borrow()
    }

    /// The only write path for the current language.
    /// Languages outside the catalog are ignored and never persisted.
    pub fn set_language(&self, language: Language) {
        let Some(language) = i18n::find_by_code(language.code) else {
            tracing::warn!(code = language.code, "Ignoring language outside the catalog");
            return;
        };
        tracing::info!(code = language.code, "Setting language to {}", language.name);
        self.current.send_if_modified(|current| {
            if *current == language {
                false
            } else {
                *current = language;
                true
            }
        });
        if let Err(e) = self.store.set(PREFERRED_LANGUAGE_KEY, language.code) {
            tracing::warn!("Failed to persist language preference: {}", e);
        }
    }

    /// Observe language changes; the receiver starts at the current language
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.current.subscribe()
    }

    /// Translate a source-language literal into the current language
    pub async fn translate(&self, text: &str) -> String {
        let target = self.current_language();
        self.translate_to(text, target).await
    }

    pub(crate) async fn translate_to(&self, text: &str, target: Language) -> String {
        let source = i18n::default_language();
        if target == source {
            return text.to_string();
        }
        let _in_flight = InFlight::enter(&self.in_flight);
        self.translator.translate(text, &target, &source).await
    }

    /// Zero-latency lookup of a common UI label in the current language
    pub fn translate_label<'a>(&self, key: &'a str) -> &'a str {
        i18n::get_label(key, self.current_language().code)
    }

    /// True while at least one translation is outstanding
    pub fn is_translating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }
}

fn saved_language(store: &dyn PreferenceStore) -> Language {
    match store.get(PREFERRED_LANGUAGE_KEY) {
        Some(code) => match i18n::find_by_code(&code) {
            Some(language) => {
                tracing::debug!("Loaded saved language: {}", language.name);
                language
            }
            None => {
                tracing::warn!(code = %code, "Ignoring unknown saved language");
                i18n::default_language()
            }
        },
        None => i18n::default_language(),
    }
}
