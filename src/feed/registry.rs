// src/feed/registry.rs
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::feed::mix::FeedMix;
use crate::feed::types::{ContentProvider, ProviderId};

/// Provider identity → client. Built once, then treated as immutable.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    clients: HashMap<ProviderId, Arc<dyn ContentProvider>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<ProviderId>, client: Arc<dyn ContentProvider>) -> Self {
        self.insert(id, client);
        self
    }

    pub fn insert(&mut self, id: impl Into<ProviderId>, client: Arc<dyn ContentProvider>) {
        self.clients.insert(id.into(), client);
    }

    pub fn get(&self, id: &ProviderId) -> Option<&Arc<dyn ContentProvider>> {
        self.clients.get(id)
    }

    /// Registered identities, sorted.
    pub fn ids(&self) -> Vec<&ProviderId> {
        let mut ids: Vec<_> = self.clients.keys().collect();
        ids.sort();
        ids
    }

    /// Every identity in `mix` must have a client.
    pub fn ensure_covers(&self, mix: &FeedMix) -> Result<()> {
        let mut missing: Vec<&str> = mix
            .entries()
            .iter()
            .filter(|id| !self.clients.contains_key(*id))
            .map(ProviderId::as_str)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort_unstable();
        missing.dedup();
        bail!("no client registered for provider(s): {}", missing.join(", "))
    }
}

/* ----------------------------
Shared handle with whole-registry publish
---------------------------- */

/// Readers take one `Arc` snapshot per request; writers replace the whole
/// registry, so a walk never sees a half-updated mapping.
#[derive(Clone)]
pub struct ClientsHandle {
    inner: Arc<RwLock<Arc<ProviderRegistry>>>,
}

impl ClientsHandle {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    pub fn snapshot(&self) -> Arc<ProviderRegistry> {
        match self.inner.read() {
            Ok(g) => g.clone(),
            Err(poison) => poison.into_inner().clone(),
        }
    }

    pub fn publish(&self, registry: ProviderRegistry) {
        let fresh = Arc::new(registry);
        match self.inner.write() {
            Ok(mut g) => *g = fresh,
            Err(poison) => *poison.into_inner() = fresh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::ContentItem;

    struct Nothing;

    #[async_trait::async_trait]
    impl ContentProvider for Nothing {
        async fn fetch(&self, _caller: &str, _count: usize) -> Result<Vec<ContentItem>> {
            Ok(vec![])
        }
    }

    fn mix(ids: &[&str]) -> FeedMix {
        FeedMix::new(ids.iter().map(|s| ProviderId::from(*s)).collect()).unwrap()
    }

    #[test]
    fn covers_when_every_mix_entry_registered() {
        let reg = ProviderRegistry::new()
            .with("a", Arc::new(Nothing))
            .with("b", Arc::new(Nothing));
        assert!(reg.ensure_covers(&mix(&["a", "b", "a"])).is_ok());
    }

    #[test]
    fn missing_entries_are_named_once() {
        let reg = ProviderRegistry::new().with("a", Arc::new(Nothing));
        let err = reg
            .ensure_covers(&mix(&["a", "c", "b", "c"]))
            .unwrap_err()
            .to_string();
        assert!(err.ends_with("b, c"), "unexpected error: {err}");
    }

    #[test]
    fn publish_replaces_whole_registry_but_keeps_old_snapshots() {
        let handle = ClientsHandle::new(ProviderRegistry::new().with("a", Arc::new(Nothing)));
        let before = handle.snapshot();

        handle.publish(ProviderRegistry::new().with("b", Arc::new(Nothing)));

        let after = handle.snapshot();
        assert_eq!(before.ids(), vec![&ProviderId::from("a")]);
        assert_eq!(after.ids(), vec![&ProviderId::from("b")]);
    }
}
