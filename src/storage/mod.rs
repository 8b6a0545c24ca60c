//! Storage ports for users and expenses.
//!
//! Handlers only ever see `Arc<dyn UserStore>` / `Arc<dyn ExpenseStore>`;
//! [`postgres`] backs the running service and [`memory`] backs tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    expenses::repo_types::{Expense, ExpenseUpdateRecord, NewExpenseRecord},
    users::repo_types::User,
};

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required row was absent, or a delete matched nothing.
    #[error("no rows in result set")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, username: &str, password: &str) -> Result<(), StoreError>;

    /// Exact match on both fields; `None` when no such pair exists.
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// All expenses owned by `user_id`, in insertion order.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Expense>, StoreError>;

    async fn add(&self, expense: NewExpenseRecord) -> Result<(), StoreError>;

    /// Overwrites date, category and amount. Updating an absent id is a no-op.
    async fn update(&self, expense: ExpenseUpdateRecord) -> Result<(), StoreError>;

    /// Fails with [`StoreError::NotFound`] when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
