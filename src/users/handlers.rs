use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use bytes::Bytes;
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError, extract::decode_body, state::AppState, storage::StoreError,
    users::dto::Credentials,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let payload: Credentials = decode_body(&body)?;

    if payload.username.is_empty() {
        warn!("empty username");
        return Err(ApiError::BadRequest);
    }

    // Advisory only: a concurrent registration can slip in before the insert.
    if let Ok(Some(_)) = state.users.find_by_username(&payload.username).await {
        warn!(username = %payload.username, "username already registered");
        return Err(ApiError::UsernameTaken);
    }

    match state
        .users
        .add_user(&payload.username, &payload.password)
        .await
    {
        Ok(()) => {}
        Err(StoreError::NotFound) => {
            warn!(username = %payload.username, "insert reported no rows");
            return Err(ApiError::Conflict);
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(ApiError::Internal);
        }
    }

    info!(username = %payload.username, "user registered");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state, body))]
pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let payload: Credentials = decode_body(&body)?;

    let user = match state
        .users
        .find_by_credentials(&payload.username, &payload.password)
        .await
    {
        Ok(Some(u)) => u,
        Ok(None) | Err(StoreError::NotFound) => {
            warn!(username = %payload.username, "login invalid credentials");
            return Err(ApiError::Unauthorized);
        }
        Err(e) => {
            error!(error = %e, "find_by_credentials failed");
            return Err(ApiError::Internal);
        }
    };

    let token = match state.tokens.issue(&user) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "jwt sign failed");
            return Err(ApiError::Internal);
        }
    };
    let header = HeaderValue::from_str(&token).map_err(|e| {
        error!(error = %e, "token is not a valid header value");
        ApiError::Internal
    })?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok((StatusCode::OK, [(AUTHORIZATION, header)]).into_response())
}
