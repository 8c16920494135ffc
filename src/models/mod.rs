mod budget;
mod category;
mod transaction;

pub(crate) use budget::MonthlyBudget;
pub(crate) use category::{Category, CategoryRole, FALLBACK_COLOR, UNKNOWN_LABEL};
pub(crate) use transaction::{Transaction, TransactionKind};
