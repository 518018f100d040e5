//! In-memory translation cache
//! One flat map keyed by (source code, target code, text), with an optional entry bound

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Cache entries kept when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 10_000;

fn cache_key(source: &str, target: &str, text: &str) -> String {
    let mut key = String::with_capacity(source.len() + target.len() + text.len() + 2);
    key.push_str(source);
    key.push('\u{0}');
    key.push_str(target);
    key.push('\u{0}');
    key.push_str(text);
    key
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, String>,
    // Insertion order, oldest first; only tracked when bounded
    order: VecDeque<String>,
}

/// Translation cache shared by every caller of a translator
pub struct TranslationCache {
    inner: Mutex<CacheInner>,
    capacity: Option<usize>,
}

impl TranslationCache {
    /// `None` (or `Some(0)`) keeps every entry for the life of the process
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            capacity: capacity.filter(|c| *c > 0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn get(&self, source: &str, target: &str, text: &str) -> Option<String> {
        self.lock().entries.get(&cache_key(source, target, text)).cloned()
    }

    /// Store a translation. An existing entry for the same key is kept as is.
    pub fn insert(&self, source: &str, target: &str, text: &str, translated: String) {
        let key = cache_key(source, target, text);
        let mut inner = self.lock();
        if inner.entries.contains_key(&key) {
            return;
        }
        let Some(capacity) = self.capacity else {
            inner.entries.insert(key, translated);
            return;
        };
        inner.order.push_back(key.clone());
        inner.entries.insert(key, translated);

        while inner.entries.len() > capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn tracked_order(&self) -> usize {
        self.lock().order.len()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(Some(DEFAULT_CAPACITY))
    }
}
