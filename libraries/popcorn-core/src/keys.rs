//! Keyboard shortcut subscriptions
//!
//! Front ends feed key presses into `KeyBindings::dispatch`; components
//! register handlers with `subscribe` and keep the returned `Subscription`
//! alive for as long as the handler should fire.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// A key name, compared case-insensitively (`"Escape"` == `"escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub const ESCAPE: &'static str = "escape";
    pub const ENTER: &'static str = "enter";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_lowercase())
    }

    pub fn escape() -> Self {
        Self::new(Self::ESCAPE)
    }

    pub fn enter() -> Self {
        Self::new(Self::ENTER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<u64, (Key, Handler)>,
}

/// Registry of key handlers.
///
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct KeyBindings {
    registry: Arc<Mutex<Registry>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `key` until the returned subscription is dropped.
    pub fn subscribe<F>(&self, key: Key, handler: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        tracing::trace!(key = %key, id, "Key handler registered");
        registry.handlers.insert(id, (key, Arc::new(handler)));

        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Run every live handler bound to `key`, in registration order.
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(&self, key: &Key) -> usize {
        // Handlers run outside the lock so they may subscribe or drop
        // subscriptions themselves.
        let matching: Vec<Handler> = self
            .lock()
            .handlers
            .values()
            .filter(|(bound, _)| bound == key)
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &matching {
            handler();
        }
        matching.len()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for KeyBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBindings")
            .field("subscriptions", &self.len())
            .finish()
    }
}

/// Unsubscribe handle; the handler is removed when this is dropped.
#[derive(Debug)]
#[must_use = "dropping a Subscription unregisters its handler immediately"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl Subscription {
    /// Unregister now (same as dropping)
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.handlers.remove(&self.id);
        }
    }
}
