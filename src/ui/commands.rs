use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::ids::next_id;
use crate::input::{self, InputError};
use crate::models::{Category, CategoryRole, MonthlyBudget, Transaction, TransactionKind};
use crate::period::MonthKey;
use crate::repo::SqliteLedger;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &SqliteLedger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add-expense",
        "Add expense (e.g. :add-expense 12.50 Lunch @Food & Dining)",
        cmd_add_expense,
        r
    );
    register_command!("ae", "Add expense", cmd_add_expense, r);
    register_command!(
        "add-income",
        "Add income (e.g. :add-income 2500 Salary @Income)",
        cmd_add_income,
        r
    );
    register_command!("ai", "Add income", cmd_add_income, r);
    register_command!(
        "edit-amount",
        "Change amount of selected transaction",
        cmd_edit_amount,
        r
    );
    register_command!(
        "edit-desc",
        "Change description of selected transaction",
        cmd_edit_desc,
        r
    );
    register_command!(
        "edit-date",
        "Change date of selected transaction (e.g. :edit-date 2024-01-15)",
        cmd_edit_date,
        r
    );
    register_command!(
        "edit-type",
        "Change type of selected transaction (e.g. :edit-type income @Income)",
        cmd_edit_type,
        r
    );
    register_command!("recat", "Re-categorize selected transaction", cmd_recat, r);
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "category",
        "Create or edit category (e.g. :category Pets budget=80 role=expense)",
        cmd_category,
        r
    );
    register_command!(
        "set-budget",
        "Set category budget (e.g. :set-budget Food & Dining 500)",
        cmd_set_budget,
        r
    );
    register_command!(
        "delete-category",
        "Delete selected category",
        cmd_delete_category,
        r
    );
    register_command!(
        "month-budget",
        "Set planned total for this month (e.g. :month-budget 2000)",
        cmd_month_budget,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        tracing::warn!(command = cmd_name, "unknown command");
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn reject(app: &mut App, err: InputError) {
    tracing::warn!(error = %err, "input rejected");
    app.set_status(err.to_string());
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &SqliteLedger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    app.screen = Screen::Overview;
    app.refresh(db)
}

fn cmd_transactions(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(db)
}

fn cmd_analytics(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    app.screen = Screen::Analytics;
    app.refresh(db)
}

fn cmd_categories(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh(db)
}

fn cmd_help(_args: &str, app: &mut App, _db: &SqliteLedger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        return app.set_month(MonthKey::current(), db);
    }

    match args.parse::<MonthKey>() {
        Ok(month) => app.set_month(month, db)?,
        Err(e) => {
            tracing::warn!(error = %e, "month rejected");
            app.set_status(format!("{e}"));
        }
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    app.set_month(app.current_month.next(), db)
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    app.set_month(app.current_month.prev(), db)
}

// ── Transactions ─────────────────────────────────────────────

/// Split `<amount> <description> [@category]`.
///
/// Only an `@` that opens a word marks the category, so `Coffee @ Joe's`
/// and `me@work` stay part of the description.
fn parse_entry(args: &str) -> Option<(&str, &str, Option<&str>)> {
    let (amount, rest) = args.split_once(' ')?;
    let rest = rest.trim();
    match category_marker(rest) {
        Some(at) => Some((amount, rest[..at].trim(), Some(rest[at + 1..].trim()))),
        None => Some((amount, rest, None)),
    }
}

/// Byte offset of the last `@` that starts a whitespace-separated word.
fn category_marker(text: &str) -> Option<usize> {
    text.match_indices('@').rev().map(|(at, _)| at).find(|&at| {
        let opens_word = at == 0 || text[..at].ends_with(char::is_whitespace);
        let has_name = text[at + 1..].starts_with(|c: char| !c.is_whitespace());
        opens_word && has_name
    })
}

fn validate_entry<'a>(
    kind: TransactionKind,
    amount: &str,
    description: &str,
    category: Option<&str>,
    categories: &'a [Category],
) -> Result<(Decimal, String, &'a Category), InputError> {
    let amount = input::parse_amount(amount)?;
    let description = input::require_text("description", description)?;
    let category = match category {
        Some(token) => input::category_for(categories, token, kind)?,
        None => input::default_category(categories, kind)?,
    };
    Ok((amount, description, category))
}

fn add_entry(
    kind: TransactionKind,
    args: &str,
    app: &mut App,
    db: &SqliteLedger,
) -> anyhow::Result<()> {
    let Some((amount, description, category)) = parse_entry(args) else {
        app.set_status(format!(
            "Usage: :add-{kind} <amount> <description> [@category]"
        ));
        return Ok(());
    };

    let (amount, description, category) =
        match validate_entry(kind, amount, description, category, &app.categories) {
            Ok((amount, description, category)) => (amount, description, category.clone()),
            Err(e) => {
                reject(app, e);
                return Ok(());
            }
        };

    let existing = db.transactions.list()?;
    let id = next_id(existing.iter().map(|t| t.id.as_str()));
    let date = app.entry_date();
    let status = format!(
        "Added {kind}: {description} {} ({}) on {date}",
        format_amount(amount),
        category.name
    );
    db.transactions.upsert(Transaction::new(
        id,
        kind,
        amount,
        description,
        category.id,
        date,
    ))?;
    app.refresh(db)?;
    app.set_status(status);
    Ok(())
}

fn cmd_add_expense(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    add_entry(TransactionKind::Expense, args, app, db)
}

fn cmd_add_income(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    add_entry(TransactionKind::Income, args, app, db)
}

/// The transaction under the cursor, if the Transactions screen is showing one.
fn selected_txn(app: &mut App) -> Option<Transaction> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return None;
    }
    app.selected_transaction().cloned()
}

fn cmd_edit_amount(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    let Some(mut txn) = selected_txn(app) else {
        return Ok(());
    };
    if args.is_empty() {
        app.set_status("Usage: :edit-amount <amount>");
        return Ok(());
    }

    match input::parse_amount(args) {
        Ok(amount) => {
            txn.amount = amount;
            db.transactions.upsert(txn)?;
            app.refresh(db)?;
            app.set_status(format!("Amount set to {}", format_amount(amount)));
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

fn cmd_edit_desc(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    let Some(mut txn) = selected_txn(app) else {
        return Ok(());
    };

    if args.is_empty() {
        app.command_input = txn.description;
        app.input_mode = InputMode::Editing;
        app.set_status("Type new description, press Enter to confirm");
        return Ok(());
    }

    match input::require_text("description", args) {
        Ok(description) => {
            app.set_status(format!("Renamed to: {description}"));
            txn.description = description;
            db.transactions.upsert(txn)?;
            app.refresh(db)?;
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

fn cmd_edit_date(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    let Some(mut txn) = selected_txn(app) else {
        return Ok(());
    };

    match input::parse_date(args) {
        Ok(date) => {
            txn.date = date;
            db.transactions.upsert(txn)?;
            app.refresh(db)?;
            if MonthKey::of(date) == app.current_month {
                app.set_status(format!("Date set to {date}"));
            } else {
                app.set_status(format!(
                    "Moved to {}",
                    MonthKey::of(date).long_name()
                ));
            }
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

fn cmd_recat(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    let Some(mut txn) = selected_txn(app) else {
        return Ok(());
    };
    if args.is_empty() {
        app.set_status("Usage: :recat <category>");
        return Ok(());
    }

    let category = match input::category_for(&app.categories, args, txn.kind) {
        Ok(category) => category.clone(),
        Err(e) => {
            reject(app, e);
            return Ok(());
        }
    };
    txn.category = category.id;
    db.transactions.upsert(txn)?;
    app.refresh(db)?;
    app.set_status(format!("Categorized as: {}", category.name));
    Ok(())
}

fn cmd_edit_type(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    let Some(mut txn) = selected_txn(app) else {
        return Ok(());
    };
    let (kind, category) = match args.split_once(' ') {
        Some((kind, category)) => (kind, Some(category.trim().trim_start_matches('@'))),
        None => (args, None),
    };
    let Some(kind) = TransactionKind::parse(kind) else {
        app.set_status("Usage: :edit-type <expense|income> [@category]");
        return Ok(());
    };

    // A dangling category is kept; a live one must accept the new type.
    let checked = match category {
        Some(token) => input::category_for(&app.categories, token, kind).map(|c| Some(c.id.clone())),
        None if Category::find_by_id(&app.categories, &txn.category).is_some() => {
            input::category_for(&app.categories, &txn.category, kind).map(|c| Some(c.id.clone()))
        }
        None => Ok(None),
    };
    match checked {
        Ok(category) => {
            txn.kind = kind;
            if let Some(id) = category {
                txn.category = id;
            }
            db.transactions.upsert(txn)?;
            app.refresh(db)?;
            app.set_status(format!("Type set to {kind}"));
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _db: &SqliteLedger) -> anyhow::Result<()> {
    let Some(txn) = selected_txn(app) else {
        return Ok(());
    };

    app.confirm_message = format!("Delete '{}'?", txn.description);
    app.pending_action = Some(PendingAction::DeleteTransaction {
        id: txn.id,
        description: txn.description,
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

// ── Categories ───────────────────────────────────────────────

struct CategoryArgs<'a> {
    name: String,
    budget: Option<&'a str>,
    role: Option<&'a str>,
    color: Option<&'a str>,
}

/// Split `<name words> [budget=N] [role=R] [color=#RRGGBB]`.
fn parse_category_args(args: &str) -> CategoryArgs<'_> {
    let mut parsed = CategoryArgs {
        name: String::new(),
        budget: None,
        role: None,
        color: None,
    };
    let mut words = Vec::new();
    for token in args.split_whitespace() {
        if let Some(v) = token.strip_prefix("budget=") {
            parsed.budget = Some(v);
        } else if let Some(v) = token.strip_prefix("role=") {
            parsed.role = Some(v);
        } else if let Some(v) = token.strip_prefix("color=") {
            parsed.color = Some(v);
        } else {
            words.push(token);
        }
    }
    parsed.name = words.join(" ");
    parsed
}

fn build_category(args: &CategoryArgs<'_>, categories: &[Category]) -> Result<Category, InputError> {
    let name = input::require_text("name", &args.name)?;
    let mut category = match Category::find_by_name(categories, &name) {
        Some(existing) => existing.clone(),
        None => Category::new(
            next_id(categories.iter().map(|c| c.id.as_str())),
            name,
            Decimal::ZERO,
            input::pick_color(categories).to_string(),
            CategoryRole::Any,
        ),
    };
    if let Some(budget) = args.budget {
        category.budget = input::parse_amount(budget)?;
    }
    if let Some(color) = args.color {
        category.color = input::parse_color(color)?;
    }
    if let Some(role) = args.role {
        category.role = input::parse_role(role)?;
    }
    Ok(category)
}

fn cmd_category(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name> [budget=N] [role=expense|income|any] [color=#RRGGBB]");
        return Ok(());
    }

    let parsed = parse_category_args(args);
    match build_category(&parsed, &app.categories) {
        Ok(category) => {
            let existed = Category::find_by_id(&app.categories, &category.id).is_some();
            let name = category.name.clone();
            db.categories.upsert(category)?;
            app.refresh(db)?;
            app.set_status(if existed {
                format!("Updated category: {name}")
            } else {
                format!("Created category: {name}")
            });
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

fn cmd_set_budget(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category
    let Some((category_token, amount)) = args.rsplit_once(' ') else {
        app.set_status("Usage: :set-budget <category> <amount>");
        return Ok(());
    };

    let result = input::resolve_category(&app.categories, category_token)
        .cloned()
        .and_then(|c| input::parse_amount(amount).map(|budget| (c, budget)));
    match result {
        Ok((mut category, budget)) => {
            category.budget = budget;
            app.set_status(if budget.is_zero() {
                format!("{} is no longer budgeted", category.name)
            } else {
                format!("Budget set: {} = {}", category.name, format_amount(budget))
            });
            db.categories.upsert(category)?;
            app.refresh(db)?;
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

fn cmd_delete_category(_args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    if app.screen != Screen::Categories || app.categories.is_empty() {
        app.set_status("Navigate to Categories and select one first");
        return Ok(());
    }
    let Some(category) = app.selected_category().cloned() else {
        return Ok(());
    };

    let orphaned = db
        .transactions
        .list()?
        .iter()
        .filter(|t| t.category == category.id)
        .count();
    app.confirm_message = if orphaned > 0 {
        format!(
            "Delete category '{}'? {orphaned} transaction(s) will show as Unknown.",
            category.name
        )
    } else {
        format!("Delete category '{}'?", category.name)
    };
    app.pending_action = Some(PendingAction::DeleteCategory {
        id: category.id,
        name: category.name,
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_month_budget(args: &str, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month-budget <amount>");
        return Ok(());
    }

    match input::parse_amount(args) {
        Ok(total) => {
            let mut budget = app
                .monthly_budget
                .clone()
                .unwrap_or_else(|| MonthlyBudget::new(app.current_month, total));
            budget.total_budget = total;
            db.budgets.upsert(budget)?;
            app.refresh(db)?;
            app.set_status(format!(
                "Planned total for {}: {}",
                app.current_month.long_name(),
                format_amount(total)
            ));
        }
        Err(e) => reject(app, e),
    }
    Ok(())
}

/// Carry out a confirmed action.
pub(crate) fn confirm(action: PendingAction, app: &mut App, db: &SqliteLedger) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteTransaction { id, description } => {
            db.transactions.delete(&id)?;
            app.refresh(db)?;
            app.set_status(format!("Deleted: {description}"));
        }
        PendingAction::DeleteCategory { id, name } => {
            db.categories.delete(&id)?;
            app.refresh(db)?;
            app.set_status(format!("Deleted category: {name}"));
        }
    }
    Ok(())
}
