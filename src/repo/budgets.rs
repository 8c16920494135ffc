use std::rc::Rc;

use crate::models::MonthlyBudget;
use crate::period::MonthKey;
use crate::store::{Collection, JsonStore, KeyValueStore, StoreError};

/// Monthly budget overrides, unique per month.
pub(crate) struct BudgetRepository<S> {
    store: Rc<JsonStore<S>>,
}

impl<S: KeyValueStore> BudgetRepository<S> {
    pub(crate) fn new(store: Rc<JsonStore<S>>) -> Self {
        Self { store }
    }

    pub(crate) fn list(&self) -> Result<Vec<MonthlyBudget>, StoreError> {
        self.store.read(Collection::MonthlyBudgets)
    }

    pub(crate) fn get(&self, month: MonthKey) -> Result<Option<MonthlyBudget>, StoreError> {
        Ok(self.list()?.into_iter().find(|b| b.month == month))
    }

    pub(crate) fn upsert(&self, budget: MonthlyBudget) -> Result<(), StoreError> {
        let mut budgets = self.list()?;
        match budgets.iter().position(|b| b.month == budget.month) {
            Some(i) => budgets[i] = budget,
            None => budgets.push(budget),
        }
        self.store.write(Collection::MonthlyBudgets, &budgets)
    }
}
