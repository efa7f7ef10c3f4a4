//! Backing tables for per-client rate records.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::RateRecord;

/// Storage for [`RateRecord`]s keyed by client key.
///
/// One store backs exactly one limiter. Implementations must be cheap and
/// infallible; the limiter never surfaces storage errors.
pub trait RateStore: Send + Sync {
    /// Fetch the record for `key`, expired or not.
    fn get(&self, key: &str) -> Option<RateRecord>;

    /// Insert or replace the record for `key`.
    fn set(&self, key: &str, record: RateRecord);

    /// Remove the record for `key` if present.
    fn delete(&self, key: &str);

    /// Remove the record for `key` only if `is_expired` holds for it,
    /// checked and removed atomically. Returns whether it was removed.
    fn remove_if(&self, key: &str, is_expired: &dyn Fn(&RateRecord) -> bool) -> bool;

    /// Replace the record for `key` with `f(existing)` atomically.
    fn update(&self, key: &str, f: &mut dyn FnMut(Option<RateRecord>) -> RateRecord);

    /// Delete every record for which `is_expired` returns true.
    ///
    /// Returns how many records were removed.
    fn sweep(&self, is_expired: &dyn Fn(&RateRecord) -> bool) -> usize;

    /// Number of records currently held.
    fn len(&self) -> usize;

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store on a sharded concurrent map.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    records: DashMap<String, RateRecord>,
}

impl MemoryRateStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateStore for MemoryRateStore {
    fn get(&self, key: &str) -> Option<RateRecord> {
        self.records.get(key).map(|r| *r)
    }

    fn set(&self, key: &str, record: RateRecord) {
        self.records.insert(key.to_string(), record);
    }

    fn delete(&self, key: &str) {
        self.records.remove(key);
    }

    fn remove_if(&self, key: &str, is_expired: &dyn Fn(&RateRecord) -> bool) -> bool {
        self.records
            .remove_if(key, |_, record| is_expired(record))
            .is_some()
    }

    fn update(&self, key: &str, f: &mut dyn FnMut(Option<RateRecord>) -> RateRecord) {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let next = f(Some(*entry.get()));
                entry.insert(next);
            }
            Entry::Vacant(entry) => {
                entry.insert(f(None));
            }
        }
    }

    fn sweep(&self, is_expired: &dyn Fn(&RateRecord) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| !is_expired(record));
        before.saturating_sub(self.records.len())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
