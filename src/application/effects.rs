/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::sync::Mutex;
use tracing::info;

/// Page-level side effects the client logic may trigger
pub trait UiEffects: Send + Sync {
    /// Hides the element with the given id
    fn hide_element(&self, id: &str);
    /// Performs a full navigation to `path`
    fn navigate(&self, path: &str);
}

/// A side effect captured by [`RecordingEffects`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// An element was hidden
    Hide(String),
    /// A navigation was requested
    Navigate(String),
}

/// Effects for headless use: they are only logged
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEffects;

impl UiEffects for TracingEffects {
    fn hide_element(&self, id: &str) {
        info!("hide element #{id}");
    }

    fn navigate(&self, path: &str) {
        info!("navigate to {path}");
    }
}

/// Effects that are stored in order so a host can replay them
#[derive(Debug, Default)]
pub struct RecordingEffects {
    effects: Mutex<Vec<UiEffect>>,
}

impl RecordingEffects {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every effect recorded so far
    pub fn effects(&self) -> Vec<UiEffect> {
        self.lock().clone()
    }

    /// Paths passed to `navigate`, in order
    pub fn navigations(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                UiEffect::Navigate(path) => Some(path.clone()),
                UiEffect::Hide(_) => None,
            })
            .collect()
    }

    /// Ids passed to `hide_element`, in order
    pub fn hidden(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                UiEffect::Hide(id) => Some(id.clone()),
                UiEffect::Navigate(_) => None,
            })
            .collect()
    }

    /// Drains the recorded effects
    pub fn take(&self) -> Vec<UiEffect> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<UiEffect>> {
        // a panic while holding the lock cannot leave the Vec half-written
        self.effects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl UiEffects for RecordingEffects {
    fn hide_element(&self, id: &str) {
        self.lock().push(UiEffect::Hide(id.to_string()));
    }

    fn navigate(&self, path: &str) {
        self.lock().push(UiEffect::Navigate(path.to_string()));
    }
}

impl<T: UiEffects + ?Sized> UiEffects for std::sync::Arc<T> {
    fn hide_element(&self, id: &str) {
        (**self).hide_element(id);
    }

    fn navigate(&self, path: &str) {
        (**self).navigate(path);
    }
}
