#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::models::{CategoryRole, TransactionKind};
use crate::period::MonthKey;
use crate::repo::{Ledger, SqliteLedger};
use crate::store::{JsonStore, SqliteStore};

fn setup() -> (App, SqliteLedger) {
    let db = Ledger::new(JsonStore::new(SqliteStore::open_in_memory().unwrap())).unwrap();
    let mut app = App::new();
    app.current_month = MonthKey::new(2024, 3).unwrap();
    app.refresh(&db).unwrap();
    (app, db)
}

fn run(input: &str, app: &mut App, db: &SqliteLedger) {
    handle_command(input, app, db).unwrap();
}

// ── adding entries ────────────────────────────────────────────

#[test]
fn test_add_expense_with_category() {
    let (mut app, db) = setup();
    run("add-expense 12.50 Lunch @Food & Dining", &mut app, &db);

    let txns = db.transactions.list().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount, dec!(12.50));
    assert_eq!(txns[0].description, "Lunch");
    assert_eq!(txns[0].category, "1");
    assert_eq!(txns[0].kind, TransactionKind::Expense);
    // Viewing a past month dates the entry on its first day
    assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.report.total_expense, dec!(12.50));
}

#[test]
fn test_add_income_uses_income_category() {
    let (mut app, db) = setup();
    run("ai 2500 Salary", &mut app, &db);

    let txns = db.transactions.list().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].kind, TransactionKind::Income);
    assert_eq!(txns[0].category, "7");
    assert_eq!(app.report.balance, dec!(2500));
}

#[test]
fn test_add_expense_rejects_bad_input() {
    let (mut app, db) = setup();
    run("add-expense -5 Refund", &mut app, &db);
    run("add-expense abc Lunch", &mut app, &db);
    run("add-expense 5 Lunch @Nowhere", &mut app, &db);
    run("add-expense 5 Salary @Income", &mut app, &db);
    run("add-expense 5", &mut app, &db);

    assert!(db.transactions.list().unwrap().is_empty());
    assert!(!app.status_message.is_empty());
}

#[test]
fn test_add_expense_keeps_inline_at_in_description() {
    let (mut app, db) = setup();
    run("add-expense 4 Coffee @ Joe's", &mut app, &db);
    run("ae 6 Invoice for me@work.com", &mut app, &db);
    run("ae 7 Lunch @ Sam's @Shopping", &mut app, &db);

    let mut txns = db.transactions.list().unwrap();
    txns.sort_by_key(|t| t.amount);
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[0].description, "Coffee @ Joe's");
    assert_eq!(txns[0].category, "1");
    assert_eq!(txns[1].description, "Invoice for me@work.com");
    assert_eq!(txns[1].category, "1");
    assert_eq!(txns[2].description, "Lunch @ Sam's");
    assert_eq!(txns[2].category, "3");
}

// ── editing ───────────────────────────────────────────────────

#[test]
fn test_edits_need_transactions_screen() {
    let (mut app, db) = setup();
    run("ae 10 Coffee", &mut app, &db);
    run("edit-amount 99", &mut app, &db);

    assert_eq!(db.transactions.list().unwrap()[0].amount, dec!(10));
    assert!(app.status_message.contains("Transactions"));
}

#[test]
fn test_edit_selected_transaction() {
    let (mut app, db) = setup();
    run("ae 10 Coffee", &mut app, &db);
    app.screen = Screen::Transactions;

    run("edit-amount $14.25", &mut app, &db);
    run("edit-desc Flat white", &mut app, &db);
    run("recat Shopping", &mut app, &db);

    let txn = &db.transactions.list().unwrap()[0];
    assert_eq!(txn.amount, dec!(14.25));
    assert_eq!(txn.description, "Flat white");
    assert_eq!(txn.category, "3");
}

#[test]
fn test_edit_desc_without_args_opens_editor() {
    let (mut app, db) = setup();
    run("ae 10 Coffee", &mut app, &db);
    app.screen = Screen::Transactions;

    run("edit-desc", &mut app, &db);
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.command_input, "Coffee");
}

#[test]
fn test_recat_rejects_role_mismatch() {
    let (mut app, db) = setup();
    run("ae 10 Coffee @Food & Dining", &mut app, &db);
    app.screen = Screen::Transactions;

    run("recat Income", &mut app, &db);
    assert_eq!(db.transactions.list().unwrap()[0].category, "1");
}

#[test]
fn test_edit_type_checks_category_role() {
    let (mut app, db) = setup();
    run("ae 10 Refund @Shopping", &mut app, &db);
    app.screen = Screen::Transactions;

    // Shopping only takes expenses
    run("edit-type income", &mut app, &db);
    assert_eq!(db.transactions.list().unwrap()[0].kind, TransactionKind::Expense);
    assert!(app.status_message.contains("Shopping"));

    run("edit-type income @Income", &mut app, &db);
    let txn = &db.transactions.list().unwrap()[0];
    assert_eq!(txn.kind, TransactionKind::Income);
    assert_eq!(txn.category, "7");
    assert_eq!(app.report.total_income, dec!(10));

    run("edit-type refund", &mut app, &db);
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_edit_type_keeps_open_or_dangling_category() {
    let (mut app, db) = setup();
    run("category Misc role=any", &mut app, &db);
    run("ae 10 Gift @Misc", &mut app, &db);
    run("ae 20 Pills @Healthcare", &mut app, &db);
    db.categories.delete("6").unwrap();
    app.screen = Screen::Transactions;
    app.refresh(&db).unwrap();

    for index in 0..app.transactions.len() {
        app.transaction_index = index;
        run("edit-type income", &mut app, &db);
    }

    let txns = db.transactions.list().unwrap();
    assert!(txns.iter().all(|t| t.kind == TransactionKind::Income));
    assert!(txns.iter().any(|t| t.category == "6"));
}

#[test]
fn test_edit_date_moves_out_of_month() {
    let (mut app, db) = setup();
    run("ae 10 Coffee", &mut app, &db);
    app.screen = Screen::Transactions;

    run("edit-date 2024-04-02", &mut app, &db);
    assert!(app.transactions.is_empty());
    assert_eq!(app.total_transactions, 1);
    assert!(app.status_message.contains("April 2024"));
}

// ── deleting ──────────────────────────────────────────────────

#[test]
fn test_delete_transaction_after_confirm() {
    let (mut app, db) = setup();
    run("ae 10 Coffee", &mut app, &db);
    app.screen = Screen::Transactions;

    run("delete-txn", &mut app, &db);
    assert_eq!(app.input_mode, InputMode::Confirm);
    let action = app.pending_action.take().unwrap();
    assert!(matches!(action, PendingAction::DeleteTransaction { .. }));

    confirm(action, &mut app, &db).unwrap();
    assert!(db.transactions.list().unwrap().is_empty());
    assert!(app.transactions.is_empty());
}

#[test]
fn test_delete_category_warns_about_orphans() {
    let (mut app, db) = setup();
    run("ae 10 Coffee @Food & Dining", &mut app, &db);
    app.screen = Screen::Categories;
    app.category_index = 0;

    run("delete-category", &mut app, &db);
    assert!(app.confirm_message.contains("1 transaction(s)"));

    let action = app.pending_action.take().unwrap();
    confirm(action, &mut app, &db).unwrap();

    assert!(db.categories.get("1").unwrap().is_none());
    // The transaction stays and its spend moves to the unknown bucket
    assert_eq!(db.transactions.list().unwrap().len(), 1);
    assert_eq!(app.report.unattributed, dec!(10));
}

// ── categories and budgets ────────────────────────────────────

#[test]
fn test_category_create_then_update() {
    let (mut app, db) = setup();
    run("category Pet Care budget=80 role=expense color=#aabbcc", &mut app, &db);

    let pets = db
        .categories
        .list()
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Pet Care")
        .unwrap();
    assert_eq!(pets.budget, dec!(80));
    assert_eq!(pets.role, CategoryRole::Expense);
    assert_eq!(pets.color, "#AABBCC");

    run("category pet care budget=120", &mut app, &db);
    let updated = db.categories.get(&pets.id).unwrap().unwrap();
    assert_eq!(updated.budget, dec!(120));
    assert_eq!(updated.name, "Pet Care");
    assert!(app.status_message.starts_with("Updated"));
}

#[test]
fn test_category_rejects_bad_role() {
    let (mut app, db) = setup();
    let before = db.categories.list().unwrap().len();
    run("category Gifts role=sometimes", &mut app, &db);
    assert_eq!(db.categories.list().unwrap().len(), before);
}

#[test]
fn test_set_budget_by_name() {
    let (mut app, db) = setup();
    run("set-budget Bills & Utilities 450", &mut app, &db);
    assert_eq!(db.categories.get("5").unwrap().unwrap().budget, dec!(450));

    run("set-budget Bills & Utilities 0", &mut app, &db);
    assert!(!db.categories.get("5").unwrap().unwrap().is_budgeted());
    assert!(app
        .report
        .per_category
        .iter()
        .all(|c| c.category.id != "5"));
}

#[test]
fn test_month_budget_is_stored_for_viewed_month() {
    let (mut app, db) = setup();
    run("month-budget 2000", &mut app, &db);

    let stored = db.budgets.get(MonthKey::new(2024, 3).unwrap()).unwrap().unwrap();
    assert_eq!(stored.total_budget, dec!(2000));
    assert_eq!(app.monthly_budget.unwrap().total_budget, dec!(2000));
}

// ── navigation ────────────────────────────────────────────────

#[test]
fn test_month_navigation() {
    let (mut app, db) = setup();
    run("next-month", &mut app, &db);
    assert_eq!(app.current_month, MonthKey::new(2024, 4).unwrap());

    run("m 2023-12", &mut app, &db);
    assert_eq!(app.current_month, MonthKey::new(2023, 12).unwrap());

    run("month 2023-13", &mut app, &db);
    assert_eq!(app.current_month, MonthKey::new(2023, 12).unwrap());
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, db) = setup();
    run("transactons", &mut app, &db);
    assert!(app.status_message.contains(":transactions"));
    assert_eq!(app.screen, Screen::Overview);
}

#[test]
fn test_quit() {
    let (mut app, db) = setup();
    run("q", &mut app, &db);
    assert!(!app.running);
}

#[test]
fn test_screen_cycle_wraps() {
    assert_eq!(Screen::Overview.cycle(true), Screen::Transactions);
    assert_eq!(Screen::Categories.cycle(true), Screen::Overview);
    assert_eq!(Screen::Overview.cycle(false), Screen::Categories);
}

#[test]
fn test_list_cursor_follows_screen() {
    let (mut app, _db) = setup();
    assert!(app.list_cursor().is_none());

    app.screen = Screen::Categories;
    let (index, _, len) = app.list_cursor().unwrap();
    assert_eq!(*index, 0);
    assert_eq!(len, 7);
}
