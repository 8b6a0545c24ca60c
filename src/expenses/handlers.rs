use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::resolve_caller,
    error::ApiError,
    expenses::{
        dto::{sort_param, ExpenseListItem, NewExpenseRequest, UpdateExpenseRequest},
        filter::{self, SortMode},
        repo_types::{ExpenseUpdateRecord, NewExpenseRecord},
    },
    extract::decode_body,
    state::AppState,
    storage::StoreError,
};

/// One method table serves `/expenses`, `/expenses/` and anything below
/// it; the DELETE arm checks the path shape itself.
pub fn expense_routes() -> Router<AppState> {
    let by_method = post(create_expense)
        .get(list_expenses)
        .put(update_expense)
        .delete(delete_expense);
    Router::new()
        .route("/expenses", by_method.clone())
        .route("/expenses/", by_method.clone())
        .route("/expenses/*rest", by_method)
}

#[instrument(skip(state, headers, body))]
pub async fn create_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let payload: NewExpenseRequest = decode_body(&body)?;
    let user = resolve_caller(&state, &headers).await?;

    let record = NewExpenseRecord {
        user_id: user.id,
        date: OffsetDateTime::now_utc(),
        category: payload.category,
        amount: payload.amount,
    };
    if let Err(e) = state.expenses.add(record).await {
        error!(error = %e, user_id = user.id, "create expense failed");
        return Err(ApiError::Internal);
    }

    info!(user_id = user.id, "expense created");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state, headers))]
pub async fn list_expenses(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<ExpenseListItem>>, ApiError> {
    let user = resolve_caller(&state, &headers).await?;

    let expenses = state.expenses.list_by_user(user.id).await.map_err(|e| {
        error!(error = %e, user_id = user.id, "list expenses failed");
        ApiError::Internal
    })?;

    let sort = sort_param(query.as_deref());
    let mode = SortMode::parse(sort.as_deref()).map_err(|e| {
        warn!(error = %e, "rejected sort parameter");
        ApiError::UnprocessableSort
    })?;

    let items = filter::apply(mode, expenses, OffsetDateTime::now_utc())
        .into_iter()
        .map(ExpenseListItem::from)
        .collect();
    Ok(Json(items))
}

/// Ownership of the target expense is not checked; any authenticated user
/// may update any id.
#[instrument(skip(state, headers, body))]
pub async fn update_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let user = resolve_caller(&state, &headers).await?;
    let payload: UpdateExpenseRequest = decode_body(&body)?;

    let Some(date) = payload.parsed_date() else {
        warn!(rawdate = %payload.rawdate, "rawdate is not YYYY-MM-DD");
        return Err(ApiError::BadRequest);
    };

    let record = ExpenseUpdateRecord {
        id: payload.id,
        date,
        category: payload.category,
        amount: payload.amount,
    };
    if let Err(e) = state.expenses.update(record).await {
        error!(error = %e, id = payload.id, "update expense failed");
        return Err(ApiError::Internal);
    }

    info!(user_id = user.id, id = payload.id, "expense updated");
    Ok(StatusCode::OK)
}

/// Ownership of the target expense is not checked.
#[instrument(skip(state, headers))]
pub async fn delete_expense(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<StatusCode, ApiError> {
    let user = resolve_caller(&state, &headers).await?;

    let Some(id) = expense_id_from_path(uri.path()) else {
        warn!(path = %uri.path(), "delete path is not /<resource>/<id>");
        return Err(ApiError::BadRequest);
    };

    match state.expenses.delete(id).await {
        Ok(()) => {}
        Err(StoreError::NotFound) => {
            warn!(id, "expense to delete not found");
            return Err(ApiError::NotFound);
        }
        Err(e) => {
            error!(error = %e, id, "delete expense failed");
            return Err(ApiError::NotFound);
        }
    }

    info!(user_id = user.id, id, "expense deleted");
    Ok(StatusCode::OK)
}

/// Id from a path of exactly the form `/<resource>/<id>`.
fn expense_id_from_path(path: &str) -> Option<i64> {
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    parts[2].parse().ok()
}
