//! dpr-translate - translation layer for the DPR analysis dashboards
//!
//! Source literals are written in the default catalog language and translated on
//! demand through a remote provider. Every failure falls back to the original text.

pub mod binding;
pub mod config;
pub mod context;
pub mod i18n;
pub mod selector;
pub mod store;
pub mod translate;

#[cfg(test)]
mod test_support;

pub use binding::{BindingState, Rendered, TranslatedText};
pub use config::Config;
pub use context::TranslationContext;
pub use i18n::{find_by_code, list_languages, Language};
pub use selector::{LanguageSelector, SelectorVariant};
pub use store::{FileStore, MemoryStore, PreferenceStore};
pub use translate::{TranslateError, TranslationProvider, Translator};
