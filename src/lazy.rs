//! Deferred ("lazy") loading keyed on visibility.
//!
//! [`DeferredLoader`] is an intersection observer: callers register keys with
//! [`DeferredLoader::observe`] and report what is currently visible with
//! [`DeferredLoader::intersect`]. Each observed key fires exactly once, the
//! first time it is reported visible, and is then unobserved.
//!
//! The loader knows nothing about queries or rendering; the results view
//! feeds it block indices and assigns image sources for whatever fires.

use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct DeferredLoader<K> {
    observed: BTreeSet<K>,
}

impl<K> Default for DeferredLoader<K> {
    fn default() -> Self {
        Self {
            observed: BTreeSet::new(),
        }
    }
}

impl<K: Ord> DeferredLoader<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, key: K) {
        self.observed.insert(key);
    }

    /// Number of keys still waiting to become visible.
    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Report the currently visible keys; returns the observed ones, in key
    /// order, and stops observing them.
    pub fn intersect<I>(&mut self, visible: I) -> Vec<K>
    where
        I: IntoIterator<Item = K>,
    {
        let mut fired: Vec<K> = visible
            .into_iter()
            .filter(|key| self.observed.remove(key))
            .collect();
        fired.sort();
        fired
    }

    /// Drop every observation (the observed page was torn down).
    pub fn clear(&mut self) {
        self.observed.clear();
    }
}
