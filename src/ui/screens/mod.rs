pub(crate) mod analytics;
pub(crate) mod budgets;
pub(crate) mod categories;
pub(crate) mod overview;
pub(crate) mod transactions;
