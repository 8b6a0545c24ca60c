use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request},
    response::Response,
    Router,
};
use jsonwebtoken::errors::ErrorKind;
use tower::ServiceExt;

use crate::{
    auth::{claims::Claims, TokenAuthority, TokenError},
    expenses::repo_types::{Expense, ExpenseUpdateRecord, NewExpenseRecord},
    state::AppState,
    storage::{ExpenseStore, StoreError, UserStore},
    users::repo_types::User,
};

pub const TEST_SECRET: &str = "test-secret";

pub async fn send(app: Router, req: Request<Body>) -> Response {
    app.oneshot(req).await.expect("router is infallible")
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_request(method: Method, uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(res: Response) -> serde_json::Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers `username` in the state's user store and returns it with a
/// freshly issued token.
pub async fn seed_user(state: &AppState, username: &str) -> (User, String) {
    state.users.add_user(username, "p").await.unwrap();
    let user = state.users.find_by_username(username).await.unwrap().unwrap();
    let token = state.tokens.issue(&user).unwrap();
    (user, token)
}

fn db_down() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// User store whose every call fails.
pub struct FailingUsers {
    pub no_rows_on_add: bool,
}

#[async_trait]
impl UserStore for FailingUsers {
    async fn add_user(&self, _username: &str, _password: &str) -> Result<(), StoreError> {
        if self.no_rows_on_add {
            Err(StoreError::NotFound)
        } else {
            Err(db_down())
        }
    }

    async fn find_by_credentials(&self, _u: &str, _p: &str) -> Result<Option<User>, StoreError> {
        Err(db_down())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(db_down())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Err(db_down())
    }
}

/// Expense store whose every call fails.
pub struct FailingExpenses;

#[async_trait]
impl ExpenseStore for FailingExpenses {
    async fn list_by_user(&self, _user_id: i64) -> Result<Vec<Expense>, StoreError> {
        Err(db_down())
    }

    async fn add(&self, _expense: NewExpenseRecord) -> Result<(), StoreError> {
        Err(db_down())
    }

    async fn update(&self, _expense: ExpenseUpdateRecord) -> Result<(), StoreError> {
        Err(db_down())
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        Err(db_down())
    }
}

/// Token authority that can neither sign nor verify.
pub struct FailingTokens;

impl TokenAuthority for FailingTokens {
    fn issue(&self, _user: &User) -> Result<String, TokenError> {
        Err(TokenError::Signing(ErrorKind::InvalidKeyFormat.into()))
    }

    fn verify(&self, _token: &str) -> Result<Claims, TokenError> {
        Err(TokenError::Invalid(ErrorKind::InvalidToken.into()))
    }
}
