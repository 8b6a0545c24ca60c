use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};

use crate::expenses::repo_types::Expense;

/// Body of `POST /expenses`. Any client-supplied id, date or owner is ignored.
#[derive(Debug, Deserialize)]
pub struct NewExpenseRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: i64,
}

/// Body of `PUT /expenses`.
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub rawdate: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: i64,
}

impl UpdateExpenseRequest {
    /// `rawdate` as midnight UTC; only the exact `YYYY-MM-DD` form is accepted.
    pub fn parsed_date(&self) -> Option<OffsetDateTime> {
        lazy_static! {
            static ref RAW_DATE_RE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
        }
        if !RAW_DATE_RE.is_match(&self.rawdate) {
            return None;
        }
        let date = Date::parse(&self.rawdate, format_description!("[year]-[month]-[day]")).ok()?;
        Some(date.midnight().assume_utc())
    }
}

/// First `sort` value of a raw query string. Later repeats are ignored and
/// malformed escapes decode lossily, so this never fails.
pub fn sort_param(query: Option<&str>) -> Option<String> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query.unwrap_or_default()).unwrap_or_default();
    pairs.into_iter().find(|(k, _)| k == "sort").map(|(_, v)| v)
}

/// Expense as returned by `GET /expenses`; the owner is implied by the caller.
#[derive(Debug, Serialize)]
pub struct ExpenseListItem {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub category: String,
    pub amount: i64,
}

impl From<Expense> for ExpenseListItem {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            date: e.date,
            category: e.category,
            amount: e.amount,
        }
    }
}
