use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;

use super::{ExpenseStore, StoreError, UserStore};
use crate::{
    config::AppConfig,
    expenses::repo_types::{Expense, ExpenseRow, ExpenseUpdateRecord, NewExpenseRecord},
    users::repo_types::User,
};

pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn add_user(&self, username: &str, password: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            "#,
        )
        .bind(username)
        .bind(password)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username
            FROM users
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT id, username FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgExpenseStore {
    db: PgPool,
}

impl PgExpenseStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseStore for PgExpenseStore {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Expense>, StoreError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, user_id, date, category, amount
            FROM expenses
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn add(&self, expense: NewExpenseRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO expenses (amount, category, date, user_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date.date())
        .bind(expense.user_id)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn update(&self, expense: ExpenseUpdateRecord) -> Result<(), StoreError> {
        let res = sqlx::query(
            r#"
            UPDATE expenses
               SET amount = $1, category = $2, date = $3
             WHERE id = $4
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(expense.date.date())
        .bind(expense.id)
        .execute(&self.db)
        .await?;
        debug!(id = expense.id, rows = res.rows_affected(), "expense updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let res = sqlx::query(r#"DELETE FROM expenses WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
