//! Validation of user-entered fields. Repositories persist whatever they are
//! given, so both front-ends go through these helpers first.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Category, CategoryRole, TransactionKind};

/// Colors handed out to new categories, in order.
pub(crate) const PALETTE: [&str; 8] = [
    "#3B82F6", "#EC4899", "#84CC16", "#EAB308", "#14B8A6", "#A855F7", "#F43F5E", "#0EA5E9",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("amount must not be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("amount {0} is over the limit of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(Decimal),

    #[error("amount '{0}' has more than {places} decimal places", places = MAX_DECIMALS)]
    TooManyDecimals(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),

    #[error("invalid role '{0}', expected expense, income or any")]
    InvalidRole(String),

    #[error("category '{0}' not found")]
    UnknownCategory(String),

    #[error("no category accepts {0} transactions")]
    NoCategoryFor(TransactionKind),

    #[error("category '{category}' is for {role} transactions, not {kind}")]
    RoleMismatch {
        category: String,
        role: CategoryRole,
        kind: TransactionKind,
    },
}

/// Largest amount a single transaction or budget may hold.
pub(crate) const MAX_AMOUNT: i64 = 1_000_000_000_000;
/// Cents precision, like the entry form's `step="0.01"`.
pub(crate) const MAX_DECIMALS: u32 = 2;

/// Parse a non-negative amount. A leading `$` is ignored.
///
/// At most [`MAX_AMOUNT`], with at most [`MAX_DECIMALS`] decimal places.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal, InputError> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount =
        Decimal::from_str(digits).map_err(|_| InputError::InvalidAmount(trimmed.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(InputError::NegativeAmount(amount));
    }
    if amount.normalize().scale() > MAX_DECIMALS {
        return Err(InputError::TooManyDecimals(trimmed.to_string()));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(InputError::AmountTooLarge(amount));
    }
    Ok(amount)
}

pub(crate) fn require_text(field: &'static str, s: &str) -> Result<String, InputError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty(field));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(s.trim().to_string()))
}

/// Accepts `#RRGGBB` (any case) and normalizes it to upper case.
pub(crate) fn parse_color(s: &str) -> Result<String, InputError> {
    let trimmed = s.trim();
    match trimmed.strip_prefix('#') {
        Some(hex) if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            Ok(format!("#{}", hex.to_ascii_uppercase()))
        }
        _ => Err(InputError::InvalidColor(trimmed.to_string())),
    }
}

pub(crate) fn parse_role(s: &str) -> Result<CategoryRole, InputError> {
    CategoryRole::parse(s).ok_or_else(|| InputError::InvalidRole(s.trim().to_string()))
}

/// Look a category up by id first, then by name.
pub(crate) fn resolve_category<'a>(
    categories: &'a [Category],
    token: &str,
) -> Result<&'a Category, InputError> {
    let token = token.trim();
    Category::find_by_id(categories, token)
        .or_else(|| Category::find_by_name(categories, token))
        .ok_or_else(|| InputError::UnknownCategory(token.to_string()))
}

/// Resolve a category and check that its role allows `kind`.
pub(crate) fn category_for<'a>(
    categories: &'a [Category],
    token: &str,
    kind: TransactionKind,
) -> Result<&'a Category, InputError> {
    let category = resolve_category(categories, token)?;
    if !category.accepts(kind) {
        return Err(InputError::RoleMismatch {
            category: category.name.clone(),
            role: category.role,
            kind,
        });
    }
    Ok(category)
}

/// First category usable for `kind`; what a blank form preselects.
pub(crate) fn default_category(
    categories: &[Category],
    kind: TransactionKind,
) -> Result<&Category, InputError> {
    categories
        .iter()
        .find(|c| c.accepts(kind))
        .ok_or(InputError::NoCategoryFor(kind))
}

/// First palette color not yet used by any category.
pub(crate) fn pick_color(categories: &[Category]) -> &'static str {
    PALETTE
        .iter()
        .find(|color| !categories.iter().any(|c| c.color.eq_ignore_ascii_case(color)))
        .copied()
        .unwrap_or(PALETTE[categories.len() % PALETTE.len()])
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
