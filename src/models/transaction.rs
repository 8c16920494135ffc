use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "e" => Some(Self::Expense),
            "income" | "i" => Some(Self::Income),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("'{s}' is not 'expense' or 'income'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) id: String,
    /// Always non-negative; the direction lives in `kind`.
    pub(crate) amount: Decimal,
    pub(crate) description: String,
    /// Id of the category. May dangle if the category was deleted.
    pub(crate) category: String,
    pub(crate) date: NaiveDate,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
}

impl Transaction {
    pub(crate) fn new(
        id: String,
        kind: TransactionKind,
        amount: Decimal,
        description: String,
        category: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            amount,
            description,
            category,
            date,
            kind,
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign of its direction: income positive, expense negative.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Newest date first; same-day entries by id, most recently created first.
    pub(crate) fn sort_newest_first(transactions: &mut [Transaction]) {
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| (b.id.len(), &b.id).cmp(&(a.id.len(), &a.id)))
        });
    }
}
