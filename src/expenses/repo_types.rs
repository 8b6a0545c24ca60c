use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// Raw `expenses` row; Postgres keeps only the calendar date.
#[derive(Debug, FromRow)]
pub struct ExpenseRow {
    pub id: i64,
    pub user_id: i64,
    pub date: Date,
    pub category: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub category: String,
    pub amount: i64,
}

impl From<ExpenseRow> for Expense {
    fn from(r: ExpenseRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            date: r.date.midnight().assume_utc(),
            category: r.category,
            amount: r.amount,
        }
    }
}

/// Expense about to be inserted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewExpenseRecord {
    pub user_id: i64,
    pub date: OffsetDateTime,
    pub category: String,
    pub amount: i64,
}

/// Replacement values for an existing expense, addressed by id.
#[derive(Debug, Clone)]
pub struct ExpenseUpdateRecord {
    pub id: i64,
    pub date: OffsetDateTime,
    pub category: String,
    pub amount: i64,
}
