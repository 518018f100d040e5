//! Language selector
//! A controlled view over the context's current language, in full and compact variants

use std::sync::Arc;
use thiserror::Error;

use crate::context::TranslationContext;
use crate::i18n::{self, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorVariant {
    /// Popover listing native and English names
    #[default]
    Full,
    /// Single select control keyed by language code
    Compact,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),
}

/// One row of the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub language: Language,
    pub selected: bool,
    pub label: String,
    pub detail: Option<String>,
}

pub struct LanguageSelector {
    ctx: Arc<TranslationContext>,
    variant: SelectorVariant,
    open: bool,
}

impl LanguageSelector {
    pub fn new(ctx: Arc<TranslationContext>, variant: SelectorVariant) -> Self {
        Self { ctx, variant, open: false }
    }

    pub fn variant(&self) -> SelectorVariant {
        self.variant
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Always read through to the context, never cached here
    pub fn current(&self) -> Language {
        self.ctx.current_language()
    }

    /// Text on the closed control
    pub fn trigger_label(&self) -> String {
        let current = self.current();
        match self.variant {
            SelectorVariant::Full => current.native_name.to_string(),
            SelectorVariant::Compact => format!("{} {}", current.flag, current.native_name),
        }
    }

    pub fn options(&self) -> Vec<SelectorOption> {
        let current = self.current();
        i18n::list_languages()
            .iter()
            .map(|language| {
                let (label, detail) = match self.variant {
                    SelectorVariant::Full => (language.native_name.to_string(), Some(language.name.to_string())),
                    SelectorVariant::Compact => (format!("{} {}", language.flag, language.native_name), None),
                };
                SelectorOption {
                    language: *language,
                    selected: *language == current,
                    label,
                    detail,
                }
            })
            .collect()
    }

    pub fn select(&mut self, language: Language) {
        self.ctx.set_language(language);
        self.open = false;
        tracing::debug!(code = language.code, "Language selected");
    }

    /// Select by code, as the compact control reports its value
    pub fn select_code(&mut self, code: &str) -> Result<Language, SelectorError> {
        let language = i18n::find_by_code(code).ok_or_else(|| SelectorError::UnknownLanguage(code.to_string()))?;
        self.select(language);
        Ok(language)
    }
}
