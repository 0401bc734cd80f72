//! Ledger primitives.
//!
//! A `LedgerEntry` is the immutable record of one wallet-affecting event
//! (top-up or purchase). Entries are append-only and back the user-facing
//! transaction history.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid ledger entry kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub user_id: String,
    pub kind: EntryKind,
    pub amount: Money,
    pub detail: String,
    pub purchase_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// `amount` must not be negative; zero is allowed for fully discounted
    /// purchases, which still leave a trace in the history.
    pub fn new(
        user_id: String,
        kind: EntryKind,
        amount: Money,
        detail: String,
        purchase_id: Option<Uuid>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "ledger amount must not be negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount,
            detail,
            purchase_id,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount_minor: i64,
    pub detail: String,
    pub purchase_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&LedgerEntry> for ActiveModel {
    fn from(value: &LedgerEntry) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            detail: ActiveValue::Set(value.detail.clone()),
            purchase_id: ActiveValue::Set(value.purchase_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for LedgerEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("ledger entry not exists".to_string()))?,
            user_id: model.user_id,
            kind: EntryKind::try_from(model.kind.as_str())?,
            amount: Money::new(model.amount_minor),
            detail: model.detail,
            purchase_id: model.purchase_id.and_then(|s| Uuid::parse_str(&s).ok()),
            created_at: model.created_at,
        })
    }
}
