//! Purchase primitives.
//!
//! A `Purchase` is the immutable record of one committed checkout: subtotal,
//! discount, final total and the optional code that produced the discount.
//! Its line items live in `purchase_items`.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub id: Uuid,
    pub user_id: String,
    pub sub_total: Money,
    pub discount: Money,
    pub total: Money,
    pub code_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Builds a purchase record, deriving `total` from subtotal and discount.
    ///
    /// The total is floored at zero; the discount must already be clamped to
    /// the subtotal by [`DiscountCode::discount_for`].
    ///
    /// [`DiscountCode::discount_for`]: crate::DiscountCode::discount_for
    pub fn new(
        user_id: String,
        sub_total: Money,
        discount: Money,
        code_id: Option<Uuid>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        if sub_total.is_negative() || discount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amounts must not be negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            total: sub_total.saturating_sub_floor(discount),
            sub_total,
            discount,
            code_id,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub sub_total_minor: i64,
    pub discount_minor: i64,
    pub total_minor: i64,
    pub code_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_items::Entity")]
    Items,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::purchase_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Purchase> for ActiveModel {
    fn from(value: &Purchase) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            sub_total_minor: ActiveValue::Set(value.sub_total.cents()),
            discount_minor: ActiveValue::Set(value.discount.cents()),
            total_minor: ActiveValue::Set(value.total.cents()),
            code_id: ActiveValue::Set(value.code_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Purchase {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("purchase not exists".to_string()))?,
            user_id: model.user_id,
            sub_total: Money::new(model.sub_total_minor),
            discount: Money::new(model.discount_minor),
            total: Money::new(model.total_minor),
            code_id: model.code_id.and_then(|s| Uuid::parse_str(&s).ok()),
            created_at: model.created_at,
        })
    }
}
