use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ExpenseStore, StoreError, UserStore};
use crate::{
    expenses::repo_types::{Expense, ExpenseUpdateRecord, NewExpenseRecord},
    users::repo_types::User,
};

struct UserEntry {
    user: User,
    password: String,
}

#[derive(Default)]
struct UserTable {
    last_id: i64,
    rows: Vec<UserEntry>,
}

/// Process-local [`UserStore`]. Like the SQL table it does not enforce
/// username uniqueness.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<UserTable>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn add_user(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let mut table = self.inner.lock();
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(UserEntry {
            user: User {
                id,
                username: username.to_string(),
            },
            password: password.to_string(),
        });
        Ok(())
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let table = self.inner.lock();
        Ok(table
            .rows
            .iter()
            .find(|e| e.user.username == username && e.password == password)
            .map(|e| e.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.inner.lock();
        Ok(table
            .rows
            .iter()
            .find(|e| e.user.username == username)
            .map(|e| e.user.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let table = self.inner.lock();
        Ok(table
            .rows
            .iter()
            .find(|e| e.user.id == id)
            .map(|e| e.user.clone()))
    }
}

#[derive(Default)]
struct ExpenseTable {
    last_id: i64,
    rows: Vec<Expense>,
}

#[derive(Default)]
pub struct MemoryExpenseStore {
    inner: Mutex<ExpenseTable>,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored expense regardless of owner.
    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> Vec<Expense> {
        self.inner.lock().rows.clone()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseStore {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Expense>, StoreError> {
        let table = self.inner.lock();
        Ok(table
            .rows
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add(&self, expense: NewExpenseRecord) -> Result<(), StoreError> {
        let mut table = self.inner.lock();
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(Expense {
            id,
            user_id: expense.user_id,
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
        });
        Ok(())
    }

    async fn update(&self, expense: ExpenseUpdateRecord) -> Result<(), StoreError> {
        let mut table = self.inner.lock();
        if let Some(row) = table.rows.iter_mut().find(|e| e.id == expense.id) {
            row.date = expense.date;
            row.category = expense.category;
            row.amount = expense.amount;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.inner.lock();
        let before = table.rows.len();
        table.rows.retain(|e| e.id != id);
        if table.rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
