use std::sync::Arc;

use models::{Entity, EntityId};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::id_policy::IdPolicy;

struct Rows<T> {
    items: Vec<T>,
    next_id: EntityId,
}

/// Generic in-memory collection of entities in insertion order.
///
/// Every read returns owned copies; every mutation is a single critical
/// section under the write lock, so callers never observe a half-applied
/// change and a failed mutation leaves the collection untouched.
#[derive(Clone)]
pub struct MemoryStore<T> {
    inner: Arc<RwLock<Rows<T>>>,
    ids: IdPolicy,
}

impl<T: Entity> MemoryStore<T> {
    /// Build a store holding `seed` as its initial contents.
    pub fn new(seed: Vec<T>, ids: IdPolicy) -> Arc<Self> {
        let next_id = IdPolicy::seed_counter(&seed);
        Arc::new(Self { inner: Arc::new(RwLock::new(Rows { items: seed, next_id })), ids })
    }

    /// Copy of every record.
    pub async fn list(&self) -> Vec<T> {
        let rows = self.inner.read().await;
        rows.items.clone()
    }

    /// Get a record by id.
    pub async fn get(&self, id: EntityId) -> Option<T> {
        let rows = self.inner.read().await;
        rows.items.iter().find(|r| r.id() == id).cloned()
    }

    /// Copies of the records matching `pred`, in insertion order.
    pub async fn filter<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.inner.read().await;
        rows.items.iter().filter(|r| pred(r)).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Append a record built by `build` from the id it will receive and the
    /// current contents. An `Err` from `build` aborts without consuming the id.
    pub async fn insert_with<F>(&self, build: F) -> Result<T, ServiceError>
    where
        F: FnOnce(EntityId, &[T]) -> Result<T, ServiceError>,
    {
        let mut rows = self.inner.write().await;
        let id = self.ids.peek(&rows.items, rows.next_id);
        let mut record = build(id, &rows.items)?;
        record.set_id(id);
        rows.next_id = rows.next_id.max(id + 1);
        rows.items.push(record.clone());
        Ok(record)
    }

    /// Replace the record `id` with the result of `f`. The stored id is
    /// restored whatever `f` returns.
    pub async fn update_with<F>(&self, id: EntityId, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&T) -> Result<T, ServiceError>,
    {
        let mut rows = self.inner.write().await;
        let idx = rows
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        let mut updated = f(&rows.items[idx])?;
        updated.set_id(id);
        rows.items[idx] = updated.clone();
        Ok(updated)
    }

    /// Remove the record `id`, keeping the order of the rest.
    pub async fn remove(&self, id: EntityId) -> Result<T, ServiceError> {
        let mut rows = self.inner.write().await;
        let idx = rows
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        Ok(rows.items.remove(idx))
    }
}
