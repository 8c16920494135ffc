use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::period::MonthKey;

/// Per-month budget overrides. Persisted, but no report reads them yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthlyBudget {
    pub(crate) month: MonthKey,
    pub(crate) total_budget: Decimal,
    /// Category id -> limit for that month.
    #[serde(default)]
    pub(crate) categories: BTreeMap<String, Decimal>,
}

impl MonthlyBudget {
    pub(crate) fn new(month: MonthKey, total_budget: Decimal) -> Self {
        Self {
            month,
            total_budget,
            categories: BTreeMap::new(),
        }
    }
}
