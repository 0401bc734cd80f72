//! The module contains the `code_redemptions` entity.
//!
//! One row per (user, code) pair; existence means the user already consumed
//! the code. Rows are created by checkout and never deleted, so the audit
//! trail survives code retirement.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "code_redemptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub code_id: String,
    pub redeemed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::discount_codes::Entity",
        from = "Column::CodeId",
        to = "super::discount_codes::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Codes,
}

impl Related<super::discount_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Codes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
