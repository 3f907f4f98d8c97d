//! In-memory datastore for tests, demos, and development.
//!
//! Thread-safe via an async `RwLock` over a record map keyed by identity.
//! Identities are assigned monotonically starting at 1. Query results are
//! returned in ascending id order so list output is stable.

use crate::datastore::Datastore;
use crate::handler::ListQuery;
use crate::model::Model;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// Thread-safe in-memory datastore.
#[derive(Clone)]
pub struct InMemoryDatastore<M> {
    records: Arc<RwLock<HashMap<i64, M>>>,
    next_id: Arc<AtomicI64>,
}

impl<M: Model> InMemoryDatastore<M> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored records.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Drop all records. Identity assignment is not reset.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    fn matches(model: &M, query: &ListQuery) -> bool {
        query.filters.iter().all(|(field, expected)| {
            M::field(field)
                .map(|desc| (desc.get)(model) == *expected)
                .unwrap_or(false)
        })
    }
}

impl<M: Model> Default for InMemoryDatastore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Datastore<M> for InMemoryDatastore<M> {
    type Error = Infallible;

    async fn get_by_id(&self, id: i64) -> Result<Option<M>, Self::Error> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn query(&self, query: &ListQuery) -> Result<Vec<M>, Self::Error> {
        let records = self.records.read().await;
        let mut ids: Vec<i64> = records
            .iter()
            .filter(|(_, m)| Self::matches(m, query))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids
            .into_iter()
            .filter_map(|id| records.get(&id).cloned())
            .collect())
    }

    async fn put(&self, models: Vec<M>) -> Result<Vec<M>, Self::Error> {
        let mut records = self.records.write().await;
        let mut stored = Vec::with_capacity(models.len());
        for mut model in models {
            let id = match model.id() {
                Some(id) => id,
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    model.set_id(id);
                    id
                }
            };
            records.insert(id, model.clone());
            stored.push(model);
        }
        Ok(stored)
    }

    async fn delete(&self, models: Vec<M>) -> Result<(), Self::Error> {
        let mut records = self.records.write().await;
        for model in models {
            if let Some(id) = model.id() {
                records.remove(&id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDescriptor, FieldError, FieldKind, FieldType, FieldValue};

    #[derive(Debug, Clone, Default)]
    struct Item {
        id: Option<i64>,
        rank: Option<i64>,
    }

    static ITEM_FIELDS: &[FieldDescriptor<Item>] = &[FieldDescriptor {
        name: "rank",
        kind: FieldKind::Persistent(FieldType::Integer),
        get: |m| m.rank.map(FieldValue::Integer).unwrap_or(FieldValue::Null),
        set: |m, v| match v {
            FieldValue::Integer(i) => {
                m.rank = Some(i);
                Ok(())
            }
            FieldValue::Null => {
                m.rank = None;
                Ok(())
            }
            other => Err(FieldError::WrongType {
                expected: "int",
                actual: other.type_name(),
            }),
        },
    }];

    impl Model for Item {
        fn model_name() -> &'static str {
            "Item"
        }

        fn fields() -> &'static [FieldDescriptor<Self>] {
            ITEM_FIELDS
        }

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn set_id(&mut self, id: i64) {
            self.id = Some(id);
        }
    }

    fn item(rank: i64) -> Item {
        Item {
            id: None,
            rank: Some(rank),
        }
    }

    #[tokio::test]
    async fn put_assigns_monotonic_ids_from_one() {
        let store = InMemoryDatastore::new();
        let stored = store.put(vec![item(10), item(20)]).await.unwrap();
        assert_eq!(stored[0].id, Some(1));
        assert_eq!(stored[1].id, Some(2));
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn put_preserves_existing_ids() {
        let store = InMemoryDatastore::new();
        let stored = store.put(vec![item(10)]).await.unwrap();
        let mut updated = stored[0].clone();
        updated.rank = Some(99);
        store.put(vec![updated]).await.unwrap();
        assert_eq!(store.count().await, 1);
        let fetched = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(fetched.rank, Some(99));
    }

    #[tokio::test]
    async fn query_orders_by_id_and_applies_filters() {
        let store = InMemoryDatastore::new();
        store.put(vec![item(2), item(1), item(2)]).await.unwrap();

        let all = store.query(&ListQuery::new()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|m| m.id.unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let query = ListQuery::new().with_filter("rank", FieldValue::Integer(2));
        let ranked = store.query(&query).await.unwrap();
        let ids: Vec<_> = ranked.iter().map(|m| m.id.unwrap()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn filter_on_unknown_field_matches_nothing() {
        let store = InMemoryDatastore::new();
        store.put(vec![item(1)]).await.unwrap();
        let query = ListQuery::new().with_filter("missing", FieldValue::Integer(1));
        assert!(store.query(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_by_identity() {
        let store = InMemoryDatastore::new();
        let stored = store.put(vec![item(1), item(2)]).await.unwrap();
        store.delete(vec![stored[0].clone()]).await.unwrap();
        assert_eq!(store.count().await, 1);
        assert!(store.get_by_id(1).await.unwrap().is_none());
        assert!(store.get_by_id(2).await.unwrap().is_some());

        // Unpersisted records are ignored.
        store.delete(vec![item(5)]).await.unwrap();
        assert_eq!(store.count().await, 1);
    }
}
