use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::models::Transaction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum MonthKeyError {
    #[error("invalid month '{0}', expected YYYY-MM")]
    Format(String),

    #[error("month out of range in '{0}'")]
    OutOfRange(String),
}

/// A calendar month, written as `YYYY-MM`.
///
/// Internally this is the first day of the month, so every key names a real
/// month and the boundary dates are always computable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct MonthKey(NaiveDate);

impl MonthKey {
    pub(crate) fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| MonthKeyError::OutOfRange(format!("{year}-{month:02}")))
    }

    /// The month a date falls in.
    pub(crate) fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub(crate) fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> u32 {
        self.0.month()
    }

    pub(crate) fn first_day(self) -> NaiveDate {
        self.0
    }

    pub(crate) fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub(crate) fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map(Self)
            .unwrap_or(self)
    }

    pub(crate) fn prev(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map(Self)
            .unwrap_or(self)
    }

    /// e.g. `February 2024`
    pub(crate) fn long_name(self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    /// Accepts `YYYY-MM` and `YYYY-M`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthKeyError::Format(s.to_string()))?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !all_digits(year) || month.len() > 2 || !all_digits(month) {
            return Err(MonthKeyError::Format(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| MonthKeyError::Format(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthKeyError::Format(s.to_string()))?;
        Self::new(year, month).map_err(|_| MonthKeyError::OutOfRange(s.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// True iff `date` lies within `[first day, last day]` of `month`.
pub(crate) fn is_in_month(date: NaiveDate, month: MonthKey) -> bool {
    date >= month.first_day() && date <= month.last_day()
}

pub(crate) fn filter_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| is_in_month(t.date, month))
        .cloned()
        .collect()
}
