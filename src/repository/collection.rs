use super::{Clock, IdGenerator};
use crate::error::{Result, TranslateError};
use crate::store::LocalStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// An entity stored in a capped, most-recent-first collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Fields supplied by the caller on upsert.
    type Draft;

    const SAVE_FAILED: &'static str;
    const DELETE_FAILED: &'static str;

    fn id(&self) -> &str;
    fn timestamp(&self) -> DateTime<Utc>;
    /// Whether `draft` has this record's natural key.
    fn matches(&self, draft: &Self::Draft) -> bool;
    fn merge(&mut self, draft: Self::Draft, now: DateTime<Utc>);
    fn create(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;
}

/// One namespaced collection in the store. Every operation is a full
/// read-modify-write of the stored sequence.
pub struct Collection<T> {
    store: LocalStore,
    key: &'static str,
    cap: usize,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    pub fn new(
        store: LocalStore,
        key: &'static str,
        cap: usize,
        clock: Arc<dyn Clock>,
        ids: Arc<IdGenerator>,
    ) -> Self {
        Self {
            store,
            key,
            cap: cap.max(1),
            clock,
            ids,
            _record: PhantomData,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Caps below one are raised to one, so an upserted record is always kept.
    pub(crate) fn set_cap(&mut self, cap: usize) {
        self.cap = cap.max(1);
    }

    pub(crate) fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    fn load(&self) -> Vec<T> {
        self.store.read(self.key, Vec::new())
    }

    fn persist(&self, items: &[T], failure: &'static str) -> Result<()> {
        self.store.try_write(self.key, items).map_err(|e| {
            warn!("{} ({}): {}", failure, self.key, e);
            TranslateError::Persistence(failure.to_string())
        })
    }

    /// Insert or update by natural key. The touched record moves to the front
    /// and anything past the cap is dropped from the tail.
    pub fn upsert(&self, draft: T::Draft) -> Result<T> {
        let now = self.clock.now();
        let mut items = self.load();

        let record = match items.iter().position(|item| item.matches(&draft)) {
            Some(idx) => {
                let mut existing = items.remove(idx);
                existing.merge(draft, now);
                debug!("Updated {} entry {}", self.key, existing.id());
                existing
            }
            None => {
                let record = T::create(self.ids.next(now), draft, now);
                debug!("Added {} entry {}", self.key, record.id());
                record
            }
        };

        items.insert(0, record.clone());
        if items.len() > self.cap {
            debug!(
                "Evicting {} oldest {} entries",
                items.len() - self.cap,
                self.key
            );
            items.truncate(self.cap);
        }

        self.persist(&items, T::SAVE_FAILED)?;
        Ok(record)
    }

    /// All records, newest first. Equal timestamps keep their stored order.
    pub fn list(&self) -> Vec<T> {
        let mut items = self.load();
        items.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        items
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.load().into_iter().find(|item| item.id() == id)
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut items = self.load();
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        self.persist(&items, T::DELETE_FAILED)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.persist(&[], T::DELETE_FAILED)
    }
}
