//! The module contains the `Game` catalog item and its entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money};

/// A catalog item.
///
/// Prices are authoritative here: checkout never trusts amounts supplied by
/// the client. `sales_count` is the only field this crate mutates, and only
/// on a committed purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: Uuid,
    pub name: String,
    pub detail: Option<String>,
    pub price: Money,
    pub release_date: DateTime<Utc>,
    pub sales_count: i64,
}

impl Game {
    pub fn new(
        name: String,
        detail: Option<String>,
        price: Money,
        release_date: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        if price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "price must not be negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            detail,
            price,
            release_date,
            sales_count: 0,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub detail: Option<String>,
    pub price_minor: i64,
    pub release_date: DateTimeUtc,
    pub sales_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_items::Entity")]
    PurchaseItems,
    #[sea_orm(has_many = "super::library::Entity")]
    LibraryEntries,
}

impl Related<super::purchase_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseItems.def()
    }
}

impl Related<super::library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LibraryEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Game> for ActiveModel {
    fn from(value: &Game) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            detail: ActiveValue::Set(value.detail.clone()),
            price_minor: ActiveValue::Set(value.price.cents()),
            release_date: ActiveValue::Set(value.release_date),
            sales_count: ActiveValue::Set(value.sales_count),
        }
    }
}

impl TryFrom<Model> for Game {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("game not exists".to_string()))?,
            name: model.name,
            detail: model.detail,
            price: Money::new(model.price_minor),
            release_date: model.release_date,
            sales_count: model.sales_count,
        })
    }
}
