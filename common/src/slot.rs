// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One independently updated piece of display state.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Slot<T> {
    /// Nothing has arrived yet.
    Pending,
    Ready(T),
    /// The first attempt failed and no value has ever arrived.
    Failed(String),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Pending
    }
}

impl<T> Slot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Pending => Slot::Pending,
            Slot::Ready(value) => Slot::Ready(value),
            Slot::Failed(reason) => Slot::Failed(reason.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Slot<U> {
        match self {
            Slot::Pending => Slot::Pending,
            Slot::Ready(value) => Slot::Ready(f(value)),
            Slot::Failed(reason) => Slot::Failed(reason),
        }
    }
}

/// Shared handle to a [`Slot`], written by one acquisition sequence and read by
/// the render loop. Clones refer to the same slot.
#[derive(Clone, Debug)]
pub struct SlotStore<T>(Arc<Mutex<Slot<T>>>);

impl<T> Default for SlotStore<T> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Slot::Pending)))
    }
}

impl<T: Clone> SlotStore<T> {
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // A panicking writer cannot leave a half-written slot behind, so the
        // poisoned value is still usable.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value`, replacing whatever the slot held before.
    pub fn publish(&self, value: T) {
        *self.lock() = Slot::Ready(value);
    }

    /// Records a failure. A slot that already holds a value keeps it.
    ///
    /// Returns `true` if the slot was marked as failed.
    pub fn fail(&self, reason: impl ToString) -> bool {
        let mut slot = self.lock();
        if slot.ready().is_some() {
            return false;
        }
        *slot = Slot::Failed(reason.to_string());
        true
    }

    /// Gets a copy of the current state.
    pub fn snapshot(&self) -> Slot<T> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pending() {
        let store = SlotStore::<f64>::default();
        assert_eq!(store.snapshot(), Slot::Pending);
    }

    #[test]
    fn last_publish_wins() {
        let store = SlotStore::default();
        store.publish(1.0);
        store.publish(2.5);
        assert_eq!(store.snapshot(), Slot::Ready(2.5));
    }

    #[test]
    fn failure_keeps_prior_value() {
        let store = SlotStore::default();
        assert!(store.fail("connection refused"));
        assert_eq!(store.snapshot(), Slot::<u8>::Failed("connection refused".into()));

        store.publish(7u8);
        assert!(!store.fail("timed out"));
        assert_eq!(store.snapshot(), Slot::Ready(7));
    }

    #[test]
    fn clones_share_state() {
        let store = SlotStore::default();
        let writer = store.clone();
        writer.publish("3:00:00".to_string());
        assert_eq!(store.snapshot().ready().map(String::as_str), Some("3:00:00"));
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_value(Slot::Ready(73.4)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "ready", "value": 73.4 }));

        let json = serde_json::to_value(Slot::<f64>::Pending).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "pending" }));
    }
}
