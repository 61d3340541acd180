use crate::config::settings::Settings;
use std::sync::{Arc, PoisonError, RwLock};

/// Settings handle shared between the controller (single writer) and the
/// sampler (reader).
///
/// Updates swap the whole `Arc<Settings>`; a reader holding a snapshot keeps
/// seeing a consistent document even while an edit is applied.
#[derive(Debug, Clone)]
pub struct SharedSettings {
    inner: Arc<RwLock<Arc<Settings>>>,
}

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    pub fn snapshot(&self) -> Arc<Settings> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn replace(&self, settings: Settings) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(settings);
    }
}
