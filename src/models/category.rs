use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TransactionKind;

/// Label shown for a category id that no longer resolves.
pub(crate) const UNKNOWN_LABEL: &str = "Unknown";
/// Swatch used for unresolved categories.
pub(crate) const FALLBACK_COLOR: &str = "#6B7280";

/// Which transaction types a category is meant for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CategoryRole {
    Expense,
    Income,
    /// Records written before roles existed land here.
    #[default]
    Any,
}

impl CategoryRole {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Any => "any",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Some(Self::Expense),
            "income" => Some(Self::Income),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    pub(crate) fn accepts(&self, kind: TransactionKind) -> bool {
        match self {
            Self::Expense => kind == TransactionKind::Expense,
            Self::Income => kind == TransactionKind::Income,
            Self::Any => true,
        }
    }
}

impl std::fmt::Display for CategoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CategoryRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("'{s}' is not 'expense', 'income' or 'any'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: String,
    pub(crate) name: String,
    /// Monthly limit. Zero means the category is left out of budget views.
    pub(crate) budget: Decimal,
    pub(crate) color: String,
    #[serde(default)]
    pub(crate) role: CategoryRole,
}

impl Category {
    pub(crate) fn new(
        id: String,
        name: String,
        budget: Decimal,
        color: String,
        role: CategoryRole,
    ) -> Self {
        Self {
            id,
            name,
            budget,
            color,
            role,
        }
    }

    pub(crate) fn is_budgeted(&self) -> bool {
        self.budget > Decimal::ZERO
    }

    pub(crate) fn accepts(&self, kind: TransactionKind) -> bool {
        self.role.accepts(kind)
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub(crate) fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub(crate) fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// The set written on first run.
    pub(crate) fn defaults() -> Vec<Category> {
        let seed = [
            ("1", "Food & Dining", 500, "#EF4444", CategoryRole::Expense),
            ("2", "Transportation", 200, "#F59E0B", CategoryRole::Expense),
            ("3", "Shopping", 300, "#8B5CF6", CategoryRole::Expense),
            ("4", "Entertainment", 150, "#06B6D4", CategoryRole::Expense),
            ("5", "Bills & Utilities", 400, "#10B981", CategoryRole::Expense),
            ("6", "Healthcare", 200, "#F97316", CategoryRole::Expense),
            ("7", "Income", 0, "#22C55E", CategoryRole::Income),
        ];
        seed.iter()
            .map(|&(id, name, budget, color, role)| {
                Category::new(
                    id.into(),
                    name.into(),
                    Decimal::from(budget),
                    color.into(),
                    role,
                )
            })
            .collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
