#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{CategoryRole, TransactionKind};

fn expense(amount: Decimal, category: &str) -> Transaction {
    make(TransactionKind::Expense, amount, category)
}

fn income(amount: Decimal, category: &str) -> Transaction {
    make(TransactionKind::Income, amount, category)
}

fn make(kind: TransactionKind, amount: Decimal, category: &str) -> Transaction {
    Transaction::new(
        format!("{category}-{amount}"),
        kind,
        amount,
        "test".into(),
        category.into(),
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    )
}

fn cat(id: &str, budget: Decimal) -> Category {
    Category::new(
        id.into(),
        format!("Cat {id}"),
        budget,
        "#112233".into(),
        CategoryRole::Expense,
    )
}

// ── compute_budget_report ─────────────────────────────────────

#[test]
fn test_report_over_budget() {
    let txns = vec![
        expense(dec!(100), "catA"),
        expense(dec!(50), "catA"),
        income(dec!(200), "catIncome"),
    ];
    let cats = vec![cat("catA", dec!(120)), cat("catIncome", dec!(0))];

    let report = compute_budget_report(&txns, &cats);
    assert_eq!(report.total_income, dec!(200));
    assert_eq!(report.total_expense, dec!(150));
    assert_eq!(report.balance, dec!(50));
    assert_eq!(report.unattributed, dec!(0));

    assert_eq!(report.per_category.len(), 1);
    let a = &report.per_category[0];
    assert_eq!(a.category.id, "catA");
    assert_eq!(a.spent, dec!(150));
    assert_eq!(a.remaining, dec!(-30));
    assert_eq!(a.percentage, dec!(125));
    assert!(a.is_over_budget);
    assert!(report
        .per_category
        .iter()
        .all(|c| c.category.id != "catIncome"));
}

#[test]
fn test_report_empty_transactions() {
    let cats = vec![cat("a", dec!(300)), cat("b", dec!(0)), cat("c", dec!(75))];
    let report = compute_budget_report(&[], &cats);
    assert_eq!(report.total_income, dec!(0));
    assert_eq!(report.total_expense, dec!(0));
    assert_eq!(report.balance, dec!(0));

    assert_eq!(report.per_category.len(), 2);
    for item in &report.per_category {
        assert_eq!(item.spent, dec!(0));
        assert_eq!(item.percentage, dec!(0));
        assert_eq!(item.remaining, item.category.budget);
        assert!(!item.is_over_budget);
    }
}

#[test]
fn test_report_no_categories() {
    let report = compute_budget_report(&[expense(dec!(5), "x")], &[]);
    assert!(report.per_category.is_empty());
    assert_eq!(report.total_expense, dec!(5));
    assert_eq!(report.unattributed, dec!(5));
}

#[test]
fn test_income_never_counts_against_budget() {
    let txns = vec![income(dec!(500), "a"), expense(dec!(20), "a")];
    let report = compute_budget_report(&txns, &[cat("a", dec!(100))]);
    assert_eq!(report.per_category[0].spent, dec!(20));
    assert_eq!(report.per_category[0].remaining, dec!(80));
}

#[test]
fn test_exactly_on_budget_is_not_over() {
    let report = compute_budget_report(&[expense(dec!(100), "a")], &[cat("a", dec!(100))]);
    let a = &report.per_category[0];
    assert_eq!(a.percentage, dec!(100));
    assert_eq!(a.remaining, dec!(0));
    assert!(!a.is_over_budget);
}

#[test]
fn test_report_keeps_full_precision() {
    let txns = vec![
        expense(dec!(0.1), "a"),
        expense(dec!(0.2), "a"),
        income(dec!(0.005), "i"),
    ];
    let report = compute_budget_report(&txns, &[cat("a", dec!(1))]);
    assert_eq!(report.total_expense, dec!(0.3));
    assert_eq!(report.balance, dec!(-0.295));
    assert_eq!(report.per_category[0].percentage, dec!(30));
}

#[test]
fn test_dangling_category_is_unattributed() {
    let txns = vec![
        expense(dec!(40), "a"),
        expense(dec!(15), "deleted"),
        expense(dec!(5), "also-gone"),
    ];
    let report = compute_budget_report(&txns, &[cat("a", dec!(100))]);
    assert_eq!(report.per_category[0].spent, dec!(40));
    assert_eq!(report.unattributed, dec!(20));
    assert_eq!(report.total_expense, dec!(60));
}

#[test]
fn test_report_follows_category_order() {
    let cats = vec![cat("z", dec!(10)), cat("m", dec!(10)), cat("a", dec!(10))];
    let report = compute_budget_report(&[expense(dec!(1), "a")], &cats);
    let ids: Vec<&str> = report
        .per_category
        .iter()
        .map(|c| c.category.id.as_str())
        .collect();
    assert_eq!(ids, vec!["z", "m", "a"]);
}

#[test]
fn test_report_is_deterministic() {
    let txns = vec![expense(dec!(3), "a"), income(dec!(7), "b")];
    let cats = vec![cat("a", dec!(10))];
    assert_eq!(
        compute_budget_report(&txns, &cats),
        compute_budget_report(&txns, &cats)
    );
}

// ── category_spend ────────────────────────────────────────────

#[test]
fn test_category_spend_first_seen_order() {
    let txns = vec![
        expense(dec!(1), "b"),
        expense(dec!(2), "a"),
        income(dec!(100), "c"),
        expense(dec!(3), "b"),
    ];
    assert_eq!(
        category_spend(&txns),
        vec![("b", dec!(4)), ("a", dec!(2))]
    );
}

// ── expense_breakdown ─────────────────────────────────────────

#[test]
fn test_breakdown_shares() {
    let txns = vec![
        expense(dec!(50), "a"),
        expense(dec!(30), "b"),
        expense(dec!(20), "a"),
        income(dec!(999), "b"),
    ];
    let cats = vec![cat("a", dec!(0)), cat("b", dec!(0))];
    let slices = expense_breakdown(&txns, &cats);

    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].label, "Cat a");
    assert_eq!(slices[0].amount, dec!(70));
    assert_eq!(slices[0].share, dec!(70));
    assert_eq!(slices[1].amount, dec!(30));
    assert_eq!(slices[1].share, dec!(30));
    let total: Decimal = slices.iter().map(|s| s.share).sum();
    assert_eq!(total, dec!(100));
}

#[test]
fn test_breakdown_merges_unknown() {
    let txns = vec![
        expense(dec!(25), "gone-1"),
        expense(dec!(50), "a"),
        expense(dec!(25), "gone-2"),
    ];
    let slices = expense_breakdown(&txns, &[cat("a", dec!(10))]);

    assert_eq!(slices.len(), 2);
    let unknown = &slices[0];
    assert_eq!(unknown.category_id, None);
    assert_eq!(unknown.label, UNKNOWN_LABEL);
    assert_eq!(unknown.color, FALLBACK_COLOR);
    assert_eq!(unknown.amount, dec!(50));
    assert_eq!(unknown.share, dec!(50));
    assert_eq!(slices[1].category_id.as_deref(), Some("a"));
}

#[test]
fn test_breakdown_empty_without_expenses() {
    assert!(expense_breakdown(&[income(dec!(10), "a")], &[cat("a", dec!(1))]).is_empty());
}

#[test]
fn test_breakdown_zero_amounts_do_not_divide() {
    let slices = expense_breakdown(&[expense(dec!(0), "a")], &[cat("a", dec!(1))]);
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].share, dec!(0));
}

// ── overflow ──────────────────────────────────────────────────

#[test]
fn test_report_totals_saturate() {
    let txns = vec![
        expense(Decimal::MAX, "a"),
        expense(Decimal::MAX, "a"),
    ];
    let report = compute_budget_report(&txns, &[cat("a", dec!(100))]);

    assert_eq!(report.total_expense, Decimal::MAX);
    assert_eq!(report.per_category[0].spent, Decimal::MAX);
    assert_eq!(report.per_category[0].percentage, Decimal::MAX);
    assert!(report.per_category[0].is_over_budget);
    assert_eq!(report.balance, Decimal::MIN);
}

#[test]
fn test_tiny_budget_percentage_saturates() {
    let tiny = Decimal::new(1, 28);
    let report = compute_budget_report(&[expense(dec!(1), "a")], &[cat("a", tiny)]);

    let a = &report.per_category[0];
    assert_eq!(a.percentage, Decimal::MAX);
    assert!(a.is_over_budget);
    assert_eq!(a.remaining, tiny - dec!(1));
}

#[test]
fn test_breakdown_survives_huge_amounts() {
    let txns = vec![expense(Decimal::MAX, "a"), expense(Decimal::MAX, "b")];
    let slices = expense_breakdown(&txns, &[cat("a", dec!(0)), cat("b", dec!(0))]);

    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].share, dec!(100));
}

#[test]
fn test_percent_of() {
    assert_eq!(percent_of(dec!(25), dec!(200)), dec!(12.5));
    assert_eq!(percent_of(Decimal::MAX, dec!(0.5)), Decimal::MAX);
}

// ── category_label ────────────────────────────────────────────

#[test]
fn test_category_label() {
    let cats = vec![cat("a", dec!(1))];
    assert_eq!(category_label(&cats, "a"), ("Cat a", "#112233"));
    assert_eq!(category_label(&cats, "zz"), (UNKNOWN_LABEL, FALLBACK_COLOR));
}
