use std::rc::Rc;

use crate::models::Category;
use crate::store::{Collection, JsonStore, KeyValueStore, StoreError};

/// Set once the default categories have been written (or found already present).
pub(crate) const SEEDED_MARKER: &str = "categories_seeded";

pub(crate) struct CategoryRepository<S> {
    store: Rc<JsonStore<S>>,
}

impl<S: KeyValueStore> CategoryRepository<S> {
    pub(crate) fn new(store: Rc<JsonStore<S>>) -> Result<Self, StoreError> {
        let repo = Self { store };
        repo.ensure_seeded()?;
        Ok(repo)
    }

    /// Write the default categories unless seeding already happened.
    ///
    /// Seeding is keyed on the marker, not on the collection being empty, so
    /// deleting every category never brings the defaults back. Returns whether
    /// defaults were written.
    pub(crate) fn ensure_seeded(&self) -> Result<bool, StoreError> {
        if self.store.has_marker(SEEDED_MARKER)? {
            return Ok(false);
        }

        let seeded = match self.store.read_present::<Category>(Collection::Categories)? {
            Some(existing) => {
                tracing::info!(
                    count = existing.len(),
                    "categories present without seed marker, leaving them as is"
                );
                false
            }
            None => {
                let defaults = Category::defaults();
                self.store.write(Collection::Categories, &defaults)?;
                tracing::info!(count = defaults.len(), "seeded default categories");
                true
            }
        };
        self.store.set_marker(SEEDED_MARKER)?;
        Ok(seeded)
    }

    pub(crate) fn list(&self) -> Result<Vec<Category>, StoreError> {
        self.store.read(Collection::Categories)
    }

    pub(crate) fn get(&self, id: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.list()?.into_iter().find(|c| c.id == id))
    }

    /// Replace the category with the same id, or append it.
    pub(crate) fn upsert(&self, category: Category) -> Result<(), StoreError> {
        let mut categories = self.list()?;
        match categories.iter().position(|c| c.id == category.id) {
            Some(i) => {
                tracing::debug!(id = %category.id, "replacing category");
                categories[i] = category;
            }
            None => {
                tracing::debug!(id = %category.id, "adding category");
                categories.push(category);
            }
        }
        self.store.write(Collection::Categories, &categories)
    }

    /// Remove a category. Transactions that reference it are left alone.
    /// Returns whether anything was removed; an unknown id writes nothing.
    pub(crate) fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut categories = self.list()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            tracing::warn!(id, "delete of unknown category ignored");
            return Ok(false);
        }
        self.store.write(Collection::Categories, &categories)?;
        tracing::debug!(id, "deleted category");
        Ok(true)
    }
}
