//! Translated-text binding
//! Displays one source literal in the current language, discarding stale results

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::context::TranslationContext;
use crate::i18n;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Idle,
    Resolving,
    Resolved,
}

/// What a view should draw for the binding right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Placeholder,
}

struct Display {
    text: String,
    shown: String,
    state: BindingState,
}

pub struct TranslatedText {
    ctx: Arc<TranslationContext>,
    display: Mutex<Display>,
    // Token of the most recent resolution; only that one may update the display
    generation: AtomicU64,
    mounted: AtomicBool,
    // Shared with the watcher, which must not keep the binding alive
    unmounted: Arc<Notify>,
    show_placeholder: bool,
}

impl TranslatedText {
    pub fn new(ctx: Arc<TranslationContext>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ctx,
            display: Mutex::new(Display {
                shown: text.clone(),
                text,
                state: BindingState::Idle,
            }),
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
            unmounted: Arc::new(Notify::new()),
            show_placeholder: true,
        }
    }

    /// Render the original text instead of a placeholder while resolving
    pub fn without_placeholder(mut self) -> Self {
        self.show_placeholder = false;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Display> {
        self.display.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The bound source-language literal
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn state(&self) -> BindingState {
        self.lock().state
    }

    pub fn display_text(&self) -> String {
        self.lock().shown.clone()
    }

    pub fn render(&self) -> Rendered {
        let display = self.lock();
        if display.state == BindingState::Resolving && self.show_placeholder {
            Rendered::Placeholder
        } else {
            Rendered::Text(display.shown.clone())
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Stop accepting results; late resolutions are dropped
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        self.unmounted.notify_one();
    }

    /// Resolve the bound text for the current language.
    /// Returns false when the result was discarded as stale.
    pub async fn refresh(&self) -> bool {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let language = self.ctx.current_language();
        let text = self.text();

        if language == i18n::default_language() {
            return self.apply(token, text);
        }

        {
            let mut display = self.lock();
            if !self.is_current(token) {
                return false;
            }
            display.shown = display.text.clone();
            display.state = BindingState::Resolving;
        }
        tracing::debug!(target_lang = language.code, token, "Resolving binding");

        let translated = self.ctx.translate_to(&text, language).await;
        self.apply(token, translated)
    }

    /// Rebind to a new literal and resolve it
    pub async fn set_text(&self, text: impl Into<String>) -> bool {
        {
            let mut display = self.lock();
            display.text = text.into();
            display.shown = display.text.clone();
        }
        self.refresh().await
    }

    /// Resolve now and again on every language change, until unmounted or dropped.
    /// Each resolution runs as its own task so a newer one never waits on an older one.
    pub fn watch(self: &Arc<Self>) -> JoinHandle<()> {
        let binding = Arc::downgrade(self);
        let unmounted = Arc::clone(&self.unmounted);
        let mut changes = self.ctx.subscribe();

        tokio::spawn(async move {
            if let Some(b) = binding.upgrade() {
                spawn_refresh(&b);
            }
            loop {
                tokio::select! {
                    changed = changes.changed() => {
                        if changed.is_err() || !refresh_live(&binding) {
                            break;
                        }
                    }
                    _ = unmounted.notified() => break,
                }
            }
            tracing::debug!("Binding watcher stopped");
        })
    }

    fn is_current(&self, token: u64) -> bool {
        self.is_mounted() && self.generation.load(Ordering::SeqCst) == token
    }

    fn apply(&self, token: u64, shown: String) -> bool {
        let mut display = self.lock();
        if !self.is_current(token) {
            tracing::debug!(token, "Discarding stale translation");
            return false;
        }
        display.shown = shown;
        display.state = BindingState::Resolved;
        true
    }
}

impl Drop for TranslatedText {
    fn drop(&mut self) {
        self.unmounted.notify_one();
    }
}

/// Refresh the binding if it is still alive and mounted
fn refresh_live(binding: &Weak<TranslatedText>) -> bool {
    match binding.upgrade() {
        Some(b) if b.is_mounted() => {
            spawn_refresh(&b);
            true
        }
        _ => false,
    }
}

fn spawn_refresh(binding: &Arc<TranslatedText>) {
    let binding = Arc::clone(binding);
    tokio::spawn(async move {
        binding.refresh().await;
    });
}
