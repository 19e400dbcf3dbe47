use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Income and expense are told apart by kind, never by the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            other => anyhow::bail!("unknown transaction kind {other:?}"),
        }
    }
}

#[derive(Debug, FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid, // owner, fixed at creation
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub tags: Vec<String>,
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = anyhow::Error;

    fn try_from(r: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            description: r.description,
            amount: r.amount,
            kind: r.kind.parse()?,
            category: r.category,
            tags: r.tags,
            date: r.date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// A fully resolved transaction ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub user_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub tags: Vec<String>,
    pub date: OffsetDateTime,
}

/// Sparse update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub date: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn row(kind: &str) -> TransactionRow {
        let at = datetime!(2025-10-01 10:00 UTC);
        TransactionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            description: "Rent Payment".into(),
            amount: 8000.0,
            kind: kind.into(),
            category: "Housing".into(),
            tags: vec!["rent".into(), "bills".into()],
            date: at,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn row_converts_with_known_kind_only() {
        let tx = Transaction::try_from(row("Expense")).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.tags, vec!["rent", "bills"]);
        assert!(Transaction::try_from(row("Refund")).is_err());
    }

    #[test]
    fn kind_parses_exact_names_only() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert!("income".parse::<TransactionKind>().is_err());
    }
}
