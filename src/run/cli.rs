use anyhow::{anyhow, bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::ids::next_id;
use crate::input;
use crate::models::{Category, CategoryRole, MonthlyBudget, Transaction, TransactionKind};
use crate::period::MonthKey;
use crate::repo::SqliteLedger;
use crate::report::{self, category_label};
use crate::ui::util::{format_amount, truncate};

#[derive(Debug, Parser)]
#[command(name = "expensetui", version)]
#[command(about = "ExpenseTUI: local-only expense and budget tracker")]
#[command(long_about = "Run without a command to launch the interactive TUI.")]
pub(crate) struct Cli {
    /// Database file to use instead of the one in the data directory
    #[arg(long, env = "EXPENSETUI_DB", global = true, value_name = "PATH")]
    pub(crate) db: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum CliCommand {
    /// Print income, expenses and budget status for a month
    Summary {
        /// Month as YYYY-MM (default: current month)
        month: Option<MonthKey>,
    },
    /// List, add, edit or delete transactions
    #[command(subcommand)]
    Txn(TxnCommand),
    /// List, add, edit or delete categories
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Show or set monthly budget totals
    #[command(subcommand)]
    Budget(BudgetCommand),
}

#[derive(Debug, Subcommand)]
pub(crate) enum TxnCommand {
    /// List transactions, newest first
    List {
        /// Month as YYYY-MM (default: current month)
        month: Option<MonthKey>,
        /// Ignore the month and list everything
        #[arg(long, conflicts_with = "month")]
        all: bool,
    },
    /// Record a new transaction
    Add {
        /// `expense` or `income`
        kind: TransactionKind,
        amount: String,
        description: String,
        /// Category id or name (default: first category that fits)
        #[arg(short, long)]
        category: Option<String>,
        /// Date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Change fields of an existing transaction
    Edit {
        id: String,
        #[arg(long)]
        kind: Option<TransactionKind>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete a transaction by id
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub(crate) enum CategoryCommand {
    /// List categories
    List,
    /// Create a category
    Add {
        name: String,
        /// Monthly budget; 0 leaves the category out of budget tracking
        #[arg(short, long, default_value = "0")]
        budget: String,
        /// Color as #RRGGBB (default: next unused palette color)
        #[arg(long)]
        color: Option<String>,
        #[arg(short, long, default_value = "any")]
        role: CategoryRole,
    },
    /// Change fields of a category, addressed by id or name
    Edit {
        category: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        budget: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(short, long)]
        role: Option<CategoryRole>,
    },
    /// Delete a category; its transactions are kept and show as Unknown
    Delete { category: String },
}

#[derive(Debug, Subcommand)]
pub(crate) enum BudgetCommand {
    /// List stored monthly budgets
    List,
    /// Set the planned total for a month
    Set {
        month: MonthKey,
        #[arg(long)]
        total: String,
        /// Per-category amount, repeatable
        #[arg(long = "category", value_name = "CATEGORY=AMOUNT")]
        categories: Vec<String>,
    },
}

pub(crate) fn as_cli(command: CliCommand, db: &SqliteLedger) -> Result<()> {
    match command {
        CliCommand::Summary { month } => cli_summary(month.unwrap_or_else(MonthKey::current), db),
        CliCommand::Txn(cmd) => match cmd {
            TxnCommand::List { month, all } => cli_txn_list(month, all, db),
            TxnCommand::Add {
                kind,
                amount,
                description,
                category,
                date,
            } => cli_txn_add(kind, &amount, &description, category, date, db),
            TxnCommand::Edit {
                id,
                kind,
                amount,
                description,
                category,
                date,
            } => cli_txn_edit(
                &id,
                TxnChanges {
                    kind,
                    amount,
                    description,
                    category,
                    date,
                },
                db,
            ),
            TxnCommand::Delete { id } => cli_txn_delete(&id, db),
        },
        CliCommand::Category(cmd) => match cmd {
            CategoryCommand::List => cli_category_list(db),
            CategoryCommand::Add {
                name,
                budget,
                color,
                role,
            } => cli_category_add(&name, &budget, color, role, db),
            CategoryCommand::Edit {
                category,
                name,
                budget,
                color,
                role,
            } => cli_category_edit(&category, name, budget, color, role, db),
            CategoryCommand::Delete { category } => cli_category_delete(&category, db),
        },
        CliCommand::Budget(cmd) => match cmd {
            BudgetCommand::List => cli_budget_list(db),
            BudgetCommand::Set {
                month,
                total,
                categories,
            } => cli_budget_set(month, &total, &categories, db),
        },
    }
}

// ── Summary ──────────────────────────────────────────────────

fn cli_summary(month: MonthKey, db: &SqliteLedger) -> Result<()> {
    let txns = db.transactions.list_in_month(month)?;
    let categories = db.categories.list()?;
    let summary = report::compute_budget_report(&txns, &categories);
    let breakdown = report::expense_breakdown(&txns, &categories);

    println!("ExpenseTUI: {}", month.long_name());
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(summary.total_income));
    println!("  Expenses:   {}", format_amount(summary.total_expense));
    println!("  Balance:    {}", format_amount(summary.balance));
    println!("  Txns:       {}", txns.len());
    if let Some(plan) = db.budgets.get(month)? {
        println!("  Planned:    {}", format_amount(plan.total_budget));
    }

    if !summary.per_category.is_empty() {
        println!();
        println!("Budgets:");
        for item in &summary.per_category {
            let status = if item.is_over_budget {
                format!("{} over", format_amount(item.remaining.abs()))
            } else {
                format!("{} left", format_amount(item.remaining))
            };
            println!(
                "  {:<20} {:>12} / {:<12} {:>5}  {status}",
                truncate(&item.category.name, 20),
                format_amount(item.spent),
                format_amount(item.category.budget),
                format!("{:.0}%", item.percentage),
            );
        }
        if !summary.unattributed.is_zero() {
            println!(
                "  {:<20} {:>12}",
                "(deleted categories)",
                format_amount(summary.unattributed)
            );
        }
    }

    if !breakdown.is_empty() {
        println!();
        println!("Spending by Category:");
        for slice in &breakdown {
            println!(
                "  {:<24} {:>12} {:>6}",
                truncate(&slice.label, 24),
                format_amount(slice.amount),
                format!("{:.1}%", slice.share),
            );
        }
    }

    Ok(())
}

// ── Transactions ─────────────────────────────────────────────

struct TxnChanges {
    kind: Option<TransactionKind>,
    amount: Option<String>,
    description: Option<String>,
    category: Option<String>,
    date: Option<String>,
}

fn cli_txn_list(month: Option<MonthKey>, all: bool, db: &SqliteLedger) -> Result<()> {
    let mut txns = if all {
        db.transactions.list()?
    } else {
        db.transactions
            .list_in_month(month.unwrap_or_else(MonthKey::current))?
    };
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    Transaction::sort_newest_first(&mut txns);
    let categories = db.categories.list()?;

    println!(
        "{:<14} {:<11} {:<8} {:<18} {:>12}  Description",
        "ID", "Date", "Type", "Category", "Amount"
    );
    println!("{}", "─".repeat(80));
    for txn in &txns {
        let (cat_name, _) = category_label(&categories, &txn.category);
        println!(
            "{:<14} {:<11} {:<8} {:<18} {:>12}  {}",
            truncate(&txn.id, 14),
            txn.date,
            txn.kind,
            truncate(cat_name, 18),
            format_amount(txn.signed_amount()),
            txn.description,
        );
    }
    Ok(())
}

fn cli_txn_add(
    kind: TransactionKind,
    amount: &str,
    description: &str,
    category: Option<String>,
    date: Option<String>,
    db: &SqliteLedger,
) -> Result<()> {
    let categories = db.categories.list()?;
    let amount = input::parse_amount(amount)?;
    let description = input::require_text("description", description)?;
    let category = match category {
        Some(token) => input::category_for(&categories, &token, kind)?,
        None => input::default_category(&categories, kind)?,
    };
    let date = match date {
        Some(d) => input::parse_date(&d)?,
        None => Local::now().date_naive(),
    };

    let existing = db.transactions.list()?;
    let id = next_id(existing.iter().map(|t| t.id.as_str()));
    let txn = Transaction::new(
        id.clone(),
        kind,
        amount,
        description,
        category.id.clone(),
        date,
    );
    db.transactions.upsert(txn)?;
    println!(
        "Added {kind} {id}: {} on {date} ({})",
        format_amount(amount),
        category.name
    );
    Ok(())
}

fn cli_txn_edit(id: &str, changes: TxnChanges, db: &SqliteLedger) -> Result<()> {
    let mut txn = db
        .transactions
        .get(id)?
        .ok_or_else(|| anyhow!("Transaction '{id}' not found"))?;
    let categories = db.categories.list()?;

    if let Some(kind) = changes.kind {
        txn.kind = kind;
    }
    if let Some(amount) = changes.amount {
        txn.amount = input::parse_amount(&amount)?;
    }
    if let Some(description) = changes.description {
        txn.description = input::require_text("description", &description)?;
    }
    if let Some(date) = changes.date {
        txn.date = input::parse_date(&date)?;
    }
    match changes.category {
        Some(token) => {
            txn.category = input::category_for(&categories, &token, txn.kind)?.id.clone();
        }
        // A dangling category stays as it is; a live one must still fit the type.
        None if Category::find_by_id(&categories, &txn.category).is_some() => {
            input::category_for(&categories, &txn.category, txn.kind)?;
        }
        None => {}
    }

    db.transactions.upsert(txn)?;
    println!("Updated transaction {id}");
    Ok(())
}

fn cli_txn_delete(id: &str, db: &SqliteLedger) -> Result<()> {
    if !db.transactions.delete(id)? {
        bail!("Transaction '{id}' not found");
    }
    println!("Deleted transaction {id}");
    Ok(())
}

// ── Categories ───────────────────────────────────────────────

fn cli_category_list(db: &SqliteLedger) -> Result<()> {
    let categories = db.categories.list()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!(
        "{:<14} {:<22} {:<8} {:>12}  Color",
        "ID", "Name", "Role", "Budget"
    );
    println!("{}", "─".repeat(66));
    for cat in &categories {
        println!(
            "{:<14} {:<22} {:<8} {:>12}  {}",
            truncate(&cat.id, 14),
            truncate(&cat.name, 22),
            cat.role,
            format_amount(cat.budget),
            cat.color,
        );
    }
    Ok(())
}

fn cli_category_add(
    name: &str,
    budget: &str,
    color: Option<String>,
    role: CategoryRole,
    db: &SqliteLedger,
) -> Result<()> {
    let categories = db.categories.list()?;
    let name = input::require_text("name", name)?;
    if Category::find_by_name(&categories, &name).is_some() {
        bail!("Category '{name}' already exists");
    }
    let budget = input::parse_amount(budget)?;
    let color = match color {
        Some(c) => input::parse_color(&c)?,
        None => input::pick_color(&categories).to_string(),
    };

    let id = next_id(categories.iter().map(|c| c.id.as_str()));
    let category = Category::new(id.clone(), name, budget, color, role);
    let label = category.to_string();
    db.categories.upsert(category)?;
    println!("Created category {id}: {label}");
    Ok(())
}

fn cli_category_edit(
    target: &str,
    name: Option<String>,
    budget: Option<String>,
    color: Option<String>,
    role: Option<CategoryRole>,
    db: &SqliteLedger,
) -> Result<()> {
    let categories = db.categories.list()?;
    let mut category = input::resolve_category(&categories, target)?.clone();

    if let Some(name) = name {
        let name = input::require_text("name", &name)?;
        if Category::find_by_name(&categories, &name).is_some_and(|c| c.id != category.id) {
            bail!("Category '{name}' already exists");
        }
        category.name = name;
    }
    if let Some(budget) = budget {
        category.budget = input::parse_amount(&budget)?;
    }
    if let Some(color) = color {
        category.color = input::parse_color(&color)?;
    }
    if let Some(role) = role {
        category.role = role;
    }

    let line = format!("Updated category {}: {category}", category.id);
    db.categories.upsert(category)?;
    println!("{line}");
    Ok(())
}

fn cli_category_delete(target: &str, db: &SqliteLedger) -> Result<()> {
    let categories = db.categories.list()?;
    let category = input::resolve_category(&categories, target)?;
    db.categories.delete(&category.id)?;

    let orphaned = db
        .transactions
        .list()?
        .iter()
        .filter(|t| t.category == category.id)
        .count();
    println!("Deleted category: {}", category.name);
    if orphaned > 0 {
        println!("{orphaned} transaction(s) now show as Unknown");
    }
    Ok(())
}

// ── Monthly budgets ──────────────────────────────────────────

fn cli_budget_list(db: &SqliteLedger) -> Result<()> {
    let mut budgets = db.budgets.list()?;
    if budgets.is_empty() {
        println!("No monthly budgets");
        return Ok(());
    }
    budgets.sort_by_key(|b| b.month);
    let categories = db.categories.list()?;

    for budget in &budgets {
        println!(
            "{:<16} {:>12}",
            budget.month.long_name(),
            format_amount(budget.total_budget)
        );
        for (id, amount) in &budget.categories {
            let (name, _) = category_label(&categories, id);
            println!("  {:<22} {:>12}", truncate(name, 22), format_amount(*amount));
        }
    }
    Ok(())
}

fn cli_budget_set(
    month: MonthKey,
    total: &str,
    allocations: &[String],
    db: &SqliteLedger,
) -> Result<()> {
    let categories = db.categories.list()?;
    let total = input::parse_amount(total)?;
    let mut budget = MonthlyBudget::new(month, total);

    let mut per_category = BTreeMap::new();
    for entry in allocations {
        let (token, amount) = entry
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("Expected CATEGORY=AMOUNT, got '{entry}'"))?;
        let category = input::resolve_category(&categories, token)?;
        per_category.insert(category.id.clone(), input::parse_amount(amount)?);
    }
    budget.categories = per_category;

    db.budgets.upsert(budget)?;
    println!(
        "Budget for {} set to {}",
        month.long_name(),
        format_amount(total)
    );
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
