//! In-memory stores and fixtures for tests.

use async_trait::async_trait;
use axum::extract::FromRef;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{
    jwt::JwtKeys,
    password::hash_password,
    repo::{CreateUserError, UserRepo},
    repo_types::{Currency, NewUser, User},
};
use crate::state::AppState;
use crate::transactions::{
    repo::TransactionRepo,
    repo_types::{Transaction, TransactionDraft, TransactionKind, TransactionPatch},
};

#[derive(Default)]
pub struct MemoryUserRepo {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, CreateUserError> {
        // check and insert under one write lock, like a unique index
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(CreateUserError::EmailTaken);
        }
        let now = OffsetDateTime::now_utc();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            currency: user.currency,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct MemoryTransactionRepo {
    rows: RwLock<Vec<Transaction>>,
}

/// Same column-by-column COALESCE the Postgres update performs.
fn merge(tx: &mut Transaction, patch: &TransactionPatch) {
    if let Some(description) = &patch.description {
        tx.description = description.clone();
    }
    if let Some(amount) = patch.amount {
        tx.amount = amount;
    }
    if let Some(kind) = patch.kind {
        tx.kind = kind;
    }
    if let Some(category) = &patch.category {
        tx.category = category.clone();
    }
    if let Some(tags) = &patch.tags {
        tx.tags = tags.clone();
    }
    if let Some(date) = patch.date {
        tx.date = date;
    }
}

#[async_trait]
impl TransactionRepo for MemoryTransactionRepo {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Transaction>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, draft: TransactionDraft) -> anyhow::Result<Transaction> {
        let now = OffsetDateTime::now_utc();
        let tx = Transaction {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            description: draft.description,
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category,
            tags: draft.tags,
            date: draft.date,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(tx.clone());
        Ok(tx)
    }

    async fn update(&self, id: Uuid, patch: &TransactionPatch) -> anyhow::Result<Option<Transaction>> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|t| t.id == id).map(|tx| {
            merge(tx, patch);
            tx.updated_at = OffsetDateTime::now_utc();
            tx.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }
}

/// Seeds a user directly in the store and returns it with a bearer token.
pub async fn seed_user(state: &AppState, name: &str, email: &str, password: &str) -> (User, String) {
    let user = state
        .users
        .create(NewUser {
            name: name.into(),
            email: email.into(),
            password_hash: hash_password(password).expect("hash"),
            currency: Currency::INR,
        })
        .await
        .expect("seed user");
    let token = JwtKeys::from_ref(state).sign(&user).expect("sign");
    (user, token)
}

/// The five sample transactions used across the HTTP tests.
pub async fn seed_transactions(state: &AppState, owner: Uuid) -> Vec<Transaction> {
    let samples = [
        (50000.0, TransactionKind::Income, "Salary", "October Paycheck", vec!["work", "salary"], "2025-10-01T10:00:00Z"),
        (8000.0, TransactionKind::Expense, "Housing", "Rent Payment", vec!["rent", "bills"], "2025-10-05T08:00:00Z"),
        (1500.0, TransactionKind::Expense, "Food", "Weekly Groceries", vec!["groceries"], "2025-10-10T18:30:00Z"),
        (250.0, TransactionKind::Expense, "Transport", "Metro card top-up", vec!["commute"], "2025-10-15T09:15:00Z"),
        (10000.0, TransactionKind::Income, "Freelance", "Project Payment - Client X", vec!["work", "freelance"], "2025-10-18T15:00:00Z"),
    ];
    let mut out = Vec::with_capacity(samples.len());
    for (amount, kind, category, description, tags, date) in samples {
        let draft = TransactionDraft {
            user_id: owner,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            tags: tags.into_iter().map(String::from).collect(),
            date: OffsetDateTime::parse(date, &time::format_description::well_known::Rfc3339)
                .expect("sample date"),
        };
        out.push(state.transactions.insert(draft).await.expect("seed transaction"));
    }
    out
}
