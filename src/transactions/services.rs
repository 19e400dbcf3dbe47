//! Owner-scoped transaction operations.
//!
//! Every operation on a single record resolves it in the same order: the id
//! must parse (400), the record must exist (404), the caller must own it
//! (403), and only then is an update payload validated (400).

use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::repo_types::{Transaction, TransactionDraft};
use crate::{auth::repo_types::User, error::AppError, state::AppState, validation};

const NOT_FOUND: &str = "Transaction not found";

pub async fn list(st: &AppState, caller: &User) -> Result<Vec<Transaction>, AppError> {
    Ok(st.transactions.list_by_user(caller.id).await?)
}

pub async fn get(st: &AppState, caller: &User, raw_id: &str) -> Result<Transaction, AppError> {
    let id = parse_id(raw_id)?;
    fetch_owned(st, caller, id).await
}

pub async fn create(st: &AppState, caller: &User, payload: &Value) -> Result<Transaction, AppError> {
    let input = validation::transaction::create(payload)?;
    let draft = TransactionDraft {
        user_id: caller.id,
        description: input.description,
        amount: input.amount,
        kind: input.kind,
        category: input.category,
        tags: input.tags,
        date: input.date.unwrap_or_else(OffsetDateTime::now_utc),
    };
    let tx = st.transactions.insert(draft).await?;
    info!(user_id = %caller.id, transaction_id = %tx.id, "transaction created");
    Ok(tx)
}

pub async fn update(
    st: &AppState,
    caller: &User,
    raw_id: &str,
    payload: &Value,
) -> Result<Transaction, AppError> {
    let id = parse_id(raw_id)?;
    fetch_owned(st, caller, id).await?;
    let patch = validation::transaction::update(payload)?;

    let tx = st
        .transactions
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    info!(user_id = %caller.id, transaction_id = %id, "transaction updated");
    Ok(tx)
}

pub async fn delete(st: &AppState, caller: &User, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id)?;
    fetch_owned(st, caller, id).await?;
    if !st.transactions.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    info!(user_id = %caller.id, transaction_id = %id, "transaction deleted");
    Ok(())
}

/// Tag listing is not offered yet; always answers 501.
pub async fn list_tags(_st: &AppState, _caller: &User) -> Result<Vec<String>, AppError> {
    Err(AppError::NotImplemented)
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("malformatted id".into()))
}

async fn fetch_owned(st: &AppState, caller: &User, id: Uuid) -> Result<Transaction, AppError> {
    let tx = st
        .transactions
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    if tx.user_id != caller.id {
        return Err(AppError::Forbidden);
    }
    Ok(tx)
}
