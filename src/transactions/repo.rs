use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Transaction, TransactionDraft, TransactionPatch, TransactionRow};

/// Transaction store, keyed by id. Ownership is checked by callers.
#[async_trait]
pub trait TransactionRepo: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Transaction>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Transaction>>;
    async fn insert(&self, draft: TransactionDraft) -> anyhow::Result<Transaction>;
    /// `None` when the row no longer exists.
    async fn update(&self, id: Uuid, patch: &TransactionPatch) -> anyhow::Result<Option<Transaction>>;
    /// `false` when there was nothing to delete.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgTransactionRepo {
    db: PgPool,
}

impl PgTransactionRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionRepo for PgTransactionRepo {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_id, description, amount, kind, category, tags, date,
                   created_at, updated_at
              FROM transactions
             WHERE user_id = $1
             ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list transactions by user")?;
        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_id, description, amount, kind, category, tags, date,
                   created_at, updated_at
              FROM transactions
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find transaction by id")?;
        row.map(Transaction::try_from).transpose()
    }

    async fn insert(&self, draft: TransactionDraft) -> anyhow::Result<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (id, user_id, description, amount, kind, category, tags, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, description, amount, kind, category, tags, date,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(draft.user_id)
        .bind(&draft.description)
        .bind(draft.amount)
        .bind(draft.kind.as_str())
        .bind(&draft.category)
        .bind(&draft.tags)
        .bind(draft.date)
        .fetch_one(&self.db)
        .await
        .context("insert transaction")?;
        Transaction::try_from(row)
    }

    async fn update(&self, id: Uuid, patch: &TransactionPatch) -> anyhow::Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            UPDATE transactions
               SET description = COALESCE($2, description),
                   amount      = COALESCE($3, amount),
                   kind        = COALESCE($4, kind),
                   category    = COALESCE($5, category),
                   tags        = COALESCE($6, tags),
                   date        = COALESCE($7, date),
                   updated_at  = now()
             WHERE id = $1
            RETURNING id, user_id, description, amount, kind, category, tags, date,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.description.as_deref())
        .bind(patch.amount)
        .bind(patch.kind.map(|k| k.as_str()))
        .bind(patch.category.as_deref())
        .bind(patch.tags.as_deref())
        .bind(patch.date)
        .fetch_optional(&self.db)
        .await
        .context("update transaction")?;
        row.map(Transaction::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete transaction")?;
        Ok(result.rows_affected() > 0)
    }
}
