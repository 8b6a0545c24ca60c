//! Windowing and ordering for the caller's expense list, selected by the
//! `sort` query parameter.

use thiserror::Error;
use time::{OffsetDateTime, UtcOffset};

use crate::expenses::repo_types::Expense;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Only expenses dated today.
    Day,
    /// Only expenses whose month-of-year is the current one, in any year.
    Month,
    /// Everything, oldest first.
    All,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort value `{0}`")]
pub struct UnknownSort(pub String);

impl SortMode {
    /// Absent and empty values both mean [`SortMode::All`].
    pub fn parse(raw: Option<&str>) -> Result<Self, UnknownSort> {
        match raw.unwrap_or_default() {
            "day" => Ok(SortMode::Day),
            "month" => Ok(SortMode::Month),
            "" | "all" => Ok(SortMode::All),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// Day and month windows keep the store's order; `All` sorts stably by date.
pub fn apply(mode: SortMode, mut expenses: Vec<Expense>, now: OffsetDateTime) -> Vec<Expense> {
    let now = now.to_offset(UtcOffset::UTC);
    match mode {
        SortMode::Day => {
            let today = now.date();
            expenses.retain(|e| e.date.to_offset(UtcOffset::UTC).date() == today);
        }
        SortMode::Month => {
            let month = now.month();
            expenses.retain(|e| e.date.to_offset(UtcOffset::UTC).month() == month);
        }
        SortMode::All => expenses.sort_by_key(|e| e.date),
    }
    expenses
}
