//! The module contains the `users` entity.
//!
//! The wallet balance lives on the user row and is mutated only by the wallet
//! operations in `ops::wallets` and by checkout, always inside a database
//! transaction.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub profile_image: Option<String>,
    /// Stored-value balance in minor units. Never negative.
    pub wallet_balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchases::Entity")]
    Purchases,
    #[sea_orm(has_many = "super::ledger::Entity")]
    LedgerEntries,
    #[sea_orm(has_many = "super::library::Entity")]
    LibraryEntries,
}

impl Related<super::purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Related<super::ledger::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntries.def()
    }
}

impl Related<super::library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LibraryEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
