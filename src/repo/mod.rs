mod budgets;
mod categories;
mod transactions;

use std::rc::Rc;

pub(crate) use budgets::BudgetRepository;
pub(crate) use categories::CategoryRepository;
pub(crate) use transactions::TransactionRepository;

use crate::store::{JsonStore, KeyValueStore, SqliteStore, StoreError};

/// The ledger both front-ends run against.
pub(crate) type SqliteLedger = Ledger<SqliteStore>;

/// All repositories over one shared store handle.
pub(crate) struct Ledger<S> {
    pub(crate) transactions: TransactionRepository<S>,
    pub(crate) categories: CategoryRepository<S>,
    pub(crate) budgets: BudgetRepository<S>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Wire up the repositories. Seeds default categories on a fresh store.
    pub(crate) fn new(store: JsonStore<S>) -> Result<Self, StoreError> {
        let store = Rc::new(store);
        Ok(Self {
            transactions: TransactionRepository::new(Rc::clone(&store)),
            categories: CategoryRepository::new(Rc::clone(&store))?,
            budgets: BudgetRepository::new(store),
        })
    }
}
