use axum::http::HeaderMap;
use tracing::{error, warn};

use crate::{error::ApiError, state::AppState, users::repo_types::User};

/// Resolves the authenticated caller to a stored user. A bad token and a
/// token naming an unknown user both surface as `Unauthorized`.
pub async fn resolve_caller(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let user_id = state.tokens.identify_caller(headers).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        ApiError::Unauthorized
    })?;

    match state.users.find_by_id(user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            warn!(user_id, "token references unknown user");
            Err(ApiError::Unauthorized)
        }
        Err(e) => {
            error!(error = %e, user_id, "user lookup failed");
            Err(ApiError::Unauthorized)
        }
    }
}
