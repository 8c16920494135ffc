//! Budget and spending aggregation over snapshots of transactions and categories.
//!
//! Everything here is a pure function of its inputs. Callers filter the
//! transactions to the month they care about first.

use rust_decimal::Decimal;

use crate::models::{Category, Transaction, FALLBACK_COLOR, UNKNOWN_LABEL};

/// Spend against one budgeted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryBudget {
    pub(crate) category: Category,
    pub(crate) spent: Decimal,
    /// `budget - spent`; negative once over budget.
    pub(crate) remaining: Decimal,
    /// `spent / budget * 100`, not capped at 100. Saturates at `Decimal::MAX`.
    pub(crate) percentage: Decimal,
    pub(crate) is_over_budget: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BudgetReport {
    pub(crate) total_income: Decimal,
    pub(crate) total_expense: Decimal,
    pub(crate) balance: Decimal,
    /// Only categories with a positive budget, in category order.
    pub(crate) per_category: Vec<CategoryBudget>,
    /// Expense spend whose category id matches no category.
    pub(crate) unattributed: Decimal,
}

/// One slice of the expense breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BreakdownSlice {
    /// `None` for the merged slice of unresolvable ids.
    pub(crate) category_id: Option<String>,
    pub(crate) label: String,
    pub(crate) color: String,
    pub(crate) amount: Decimal,
    /// Percent of total expense.
    pub(crate) share: Decimal,
}

/// Expense totals per category id, in order of first appearance.
/// Income never counts toward any category's spend.
pub(crate) fn category_spend(transactions: &[Transaction]) -> Vec<(&str, Decimal)> {
    let mut spend: Vec<(&str, Decimal)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match spend.iter_mut().find(|(id, _)| *id == txn.category) {
            Some((_, total)) => *total = total.saturating_add(txn.amount),
            None => spend.push((txn.category.as_str(), txn.amount)),
        }
    }
    spend
}

pub(crate) fn compute_budget_report(
    transactions: &[Transaction],
    categories: &[Category],
) -> BudgetReport {
    let total_income = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount),
    );
    let total_expense = saturating_sum(
        transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount),
    );

    let spend = category_spend(transactions);
    let spent_on = |id: &str| {
        spend
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, amt)| *amt)
            .unwrap_or(Decimal::ZERO)
    };

    // Zero-budget categories are dropped here, which also keeps the
    // percentage division well-defined.
    let per_category: Vec<CategoryBudget> = categories
        .iter()
        .filter(|c| c.is_budgeted())
        .map(|category| {
            let spent = spent_on(&category.id);
            CategoryBudget {
                spent,
                remaining: category.budget.saturating_sub(spent),
                percentage: percent_of(spent, category.budget),
                is_over_budget: spent > category.budget,
                category: category.clone(),
            }
        })
        .collect();

    let unattributed = saturating_sum(
        spend
            .iter()
            .filter(|(id, _)| Category::find_by_id(categories, id).is_none())
            .map(|(_, amt)| *amt),
    );

    BudgetReport {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        per_category,
        unattributed,
    }
}

/// Expense distribution by category for the breakdown chart.
///
/// Ids that resolve to no category are merged into a single `Unknown` slice.
pub(crate) fn expense_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<BreakdownSlice> {
    let mut slices: Vec<BreakdownSlice> = Vec::new();
    for (id, amount) in category_spend(transactions) {
        let category_id = Category::find_by_id(categories, id).map(|c| c.id.clone());
        match slices.iter_mut().find(|s| s.category_id == category_id) {
            Some(slice) => slice.amount = slice.amount.saturating_add(amount),
            None => {
                let (label, color) = category_label(categories, id);
                slices.push(BreakdownSlice {
                    category_id,
                    label: label.to_string(),
                    color: color.to_string(),
                    amount,
                    share: Decimal::ZERO,
                });
            }
        }
    }

    let total = saturating_sum(slices.iter().map(|s| s.amount));
    if total > Decimal::ZERO {
        for slice in &mut slices {
            slice.share = percent_of(slice.amount, total);
        }
    }
    slices
}

/// Sum that pins at `Decimal::MAX`/`MIN` instead of overflowing.
pub(crate) fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(amount))
}

/// `part / whole * 100`, saturating at `Decimal::MAX` when the ratio does
/// not fit. `whole` must be positive.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// Display name and color for a category id, falling back to `Unknown`.
pub(crate) fn category_label<'a>(categories: &'a [Category], id: &str) -> (&'a str, &'a str) {
    Category::find_by_id(categories, id)
        .map(|c| (c.name.as_str(), c.color.as_str()))
        .unwrap_or((UNKNOWN_LABEL, FALLBACK_COLOR))
}

#[cfg(test)]
mod tests;
