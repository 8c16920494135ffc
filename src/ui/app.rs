use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::models::{Category, MonthlyBudget, Transaction};
use crate::period::{is_in_month, MonthKey};
use crate::repo::SqliteLedger;
use crate::report::{self, BreakdownSlice, BudgetReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Transactions,
    Analytics,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Overview,
            Self::Transactions,
            Self::Analytics,
            Self::Categories,
        ]
    }

    /// The neighbouring tab, wrapping at either end.
    pub(crate) fn cycle(self, forward: bool) -> Screen {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % screens.len()
        } else {
            (idx + screens.len() - 1) % screens.len()
        };
        screens[next]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Analytics => write!(f, "Analytics"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: String, description: String },
    DeleteCategory { id: String, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) current_month: MonthKey,

    // Month snapshot
    pub(crate) report: BudgetReport,
    pub(crate) breakdown: Vec<BreakdownSlice>,
    pub(crate) monthly_budget: Option<MonthlyBudget>,
    pub(crate) total_transactions: usize,

    // Transactions (selected month, newest first)
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Categories
    pub(crate) categories: Vec<Category>,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month: MonthKey::current(),

            report: BudgetReport::default(),
            breakdown: Vec::new(),
            monthly_budget: None,
            total_transactions: 0,

            transactions: Vec::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            categories: Vec::new(),
            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload everything for the current month from the store.
    pub(crate) fn refresh(&mut self, db: &SqliteLedger) -> Result<()> {
        let all = db.transactions.list()?;
        self.total_transactions = all.len();
        self.categories = db.categories.list()?;
        self.monthly_budget = db.budgets.get(self.current_month)?;

        let mut month: Vec<Transaction> = all
            .into_iter()
            .filter(|t| is_in_month(t.date, self.current_month))
            .collect();
        Transaction::sort_newest_first(&mut month);

        self.report = report::compute_budget_report(&month, &self.categories);
        self.breakdown = report::expense_breakdown(&month, &self.categories);
        self.transactions = month;

        self.clamp_cursors();
        Ok(())
    }

    /// Switch the viewed month and reload.
    pub(crate) fn set_month(&mut self, month: MonthKey, db: &SqliteLedger) -> Result<()> {
        self.current_month = month;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.refresh(db)?;
        self.set_status(format!("Month: {}", month.long_name()));
        Ok(())
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.category_index)
    }

    /// Date given to new entries: today when viewing the current month,
    /// otherwise the first of the viewed month so the entry stays visible.
    pub(crate) fn entry_date(&self) -> NaiveDate {
        let today = Local::now().date_naive();
        if is_in_month(today, self.current_month) {
            today
        } else {
            self.current_month.first_day()
        }
    }

    /// Cursor, scroll offset and row count of the list on the current screen.
    pub(crate) fn list_cursor(&mut self) -> Option<(&mut usize, &mut usize, usize)> {
        match self.screen {
            Screen::Transactions => Some((
                &mut self.transaction_index,
                &mut self.transaction_scroll,
                self.transactions.len(),
            )),
            Screen::Categories => Some((
                &mut self.category_index,
                &mut self.category_scroll,
                self.categories.len(),
            )),
            Screen::Overview | Screen::Analytics => None,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clamp_cursors(&mut self) {
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        if self.category_index >= self.categories.len() {
            self.category_index = self.categories.len().saturating_sub(1);
        }
        if self.category_scroll > self.category_index {
            self.category_scroll = self.category_index;
        }
    }
}
