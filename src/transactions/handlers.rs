use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use super::{dto::TransactionResponse, services};
use crate::{auth::extractors::AuthUser, error::AppError, state::AppState};

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/tags", get(list_tags))
        .route(
            "/transactions/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

#[instrument(skip_all)]
pub async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let items = services::list(&state, &user)
        .await?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, user))]
pub async fn get_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, AppError> {
    let tx = services::get(&state, &user, &id).await?;
    Ok(Json(tx.into()))
}

#[instrument(skip_all)]
pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let Json(payload) = payload?;
    let tx = services::create(&state, &user, &payload).await?;
    Ok((StatusCode::CREATED, Json(tx.into())))
}

#[instrument(skip(state, user, payload))]
pub async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Json(payload) = payload?;
    let tx = services::update(&state, &user, &id, &payload).await?;
    Ok(Json(tx.into()))
}

#[instrument(skip(state, user))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::delete(&state, &user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
pub async fn list_tags(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(services::list_tags(&state, &user).await?))
}
