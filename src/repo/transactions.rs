use std::rc::Rc;

use crate::models::Transaction;
use crate::period::{filter_month, MonthKey};
use crate::store::{Collection, JsonStore, KeyValueStore, StoreError};

/// CRUD over the transactions collection. Ids come from the caller.
pub(crate) struct TransactionRepository<S> {
    store: Rc<JsonStore<S>>,
}

impl<S: KeyValueStore> TransactionRepository<S> {
    pub(crate) fn new(store: Rc<JsonStore<S>>) -> Self {
        Self { store }
    }

    pub(crate) fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        self.store.read(Collection::Transactions)
    }

    pub(crate) fn list_in_month(&self, month: MonthKey) -> Result<Vec<Transaction>, StoreError> {
        Ok(filter_month(&self.list()?, month))
    }

    pub(crate) fn get(&self, id: &str) -> Result<Option<Transaction>, StoreError> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    pub(crate) fn upsert(&self, transaction: Transaction) -> Result<(), StoreError> {
        let mut transactions = self.list()?;
        match transactions.iter().position(|t| t.id == transaction.id) {
            Some(i) => {
                tracing::debug!(id = %transaction.id, "replacing transaction");
                transactions[i] = transaction;
            }
            None => {
                tracing::debug!(id = %transaction.id, "adding transaction");
                transactions.push(transaction);
            }
        }
        self.store.write(Collection::Transactions, &transactions)
    }

    pub(crate) fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut transactions = self.list()?;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            tracing::warn!(id, "delete of unknown transaction ignored");
            return Ok(false);
        }
        self.store.write(Collection::Transactions, &transactions)?;
        tracing::debug!(id, "deleted transaction");
        Ok(true)
    }
}
