#[cfg(test)]
mod memory;
mod schema;
mod sqlite;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[cfg(test)]
pub(crate) use memory::MemoryStore;
pub(crate) use sqlite::SqliteStore;

/// Errors raised while reading or writing persisted collections.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("storage backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The stored text could not be decoded into the collection's records.
    #[error("stored {collection} are malformed: {source}")]
    Malformed {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode {collection}: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw string storage keyed by name.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    Transactions,
    Categories,
    MonthlyBudgets,
}

impl Collection {
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Categories => "categories",
            Self::MonthlyBudgets => "budgets",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Whole-collection JSON persistence on top of a [`KeyValueStore`].
///
/// Every write replaces the entire collection in a single `set` call, so a
/// reader never sees a partially written collection.
pub(crate) struct JsonStore<S> {
    kv: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    pub(crate) fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Read a collection, treating an absent key as an empty collection.
    pub(crate) fn read<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, StoreError> {
        Ok(self.read_present(collection)?.unwrap_or_default())
    }

    /// Read a collection, returning `None` when it has never been written.
    pub(crate) fn read_present<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Option<Vec<T>>, StoreError> {
        let Some(text) = self.kv.get(collection.key())? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Malformed { collection, source })
    }

    pub(crate) fn write<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<(), StoreError> {
        let text = serde_json::to_string(records)
            .map_err(|source| StoreError::Encode { collection, source })?;
        self.kv.set(collection.key(), &text)?;
        tracing::debug!(%collection, records = records.len(), "collection written");
        Ok(())
    }

    pub(crate) fn has_marker(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.kv.get(name)?.is_some())
    }

    pub(crate) fn set_marker(&self, name: &str) -> Result<(), StoreError> {
        self.kv.set(name, "true")
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &S {
        &self.kv
    }
}

#[cfg(test)]
mod tests;
