//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Gameshelf:
//!
//! - `users`: accounts with an embedded stored-value wallet balance
//! - `games`: the catalog, with a denormalized sales counter
//! - `discount_codes`: flat or percentage codes with a bounded use count
//! - `code_redemptions`: one row per user per code, kept forever
//! - `purchases`: committed checkout headers
//! - `purchase_items`: per-game price snapshots of a purchase
//! - `library_entries`: game ownership grants
//! - `ledger_entries`: append-only wallet movement history

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    UserId,
    Username,
    Email,
    Password,
    Role,
    ProfileImage,
    WalletBalance,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Name,
    Detail,
    PriceMinor,
    ReleaseDate,
    SalesCount,
}

#[derive(Iden)]
enum DiscountCodes {
    Table,
    Id,
    Name,
    Kind,
    Value,
    MaxUse,
    CurrentUse,
    ExpireDate,
    Retired,
}

#[derive(Iden)]
enum CodeRedemptions {
    Table,
    UserId,
    CodeId,
    RedeemedAt,
}

#[derive(Iden)]
enum Purchases {
    Table,
    Id,
    UserId,
    SubTotalMinor,
    DiscountMinor,
    TotalMinor,
    CodeId,
    CreatedAt,
}

#[derive(Iden)]
enum PurchaseItems {
    Table,
    PurchaseId,
    GameId,
    PriceMinor,
}

#[derive(Iden)]
enum LibraryEntries {
    Table,
    UserId,
    GameId,
    GrantedAt,
}

#[derive(Iden)]
enum LedgerEntries {
    Table,
    Id,
    UserId,
    Kind,
    AmountMinor,
    Detail,
    PurchaseId,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(Users::ProfileImage).string())
                    .col(
                        ColumnDef::new(Users::WalletBalance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-username-unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Games
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Games::Name).string().not_null())
                    .col(ColumnDef::new(Games::Detail).string())
                    .col(ColumnDef::new(Games::PriceMinor).big_integer().not_null())
                    .col(ColumnDef::new(Games::ReleaseDate).timestamp().not_null())
                    .col(
                        ColumnDef::new(Games::SalesCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-games-name-unique")
                    .table(Games::Table)
                    .col(Games::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-games-sales_count")
                    .table(Games::Table)
                    .col(Games::SalesCount)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Discount codes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DiscountCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountCodes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DiscountCodes::Name).string().not_null())
                    .col(ColumnDef::new(DiscountCodes::Kind).string().not_null())
                    .col(ColumnDef::new(DiscountCodes::Value).big_integer().not_null())
                    .col(
                        ColumnDef::new(DiscountCodes::MaxUse)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscountCodes::CurrentUse)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(DiscountCodes::ExpireDate).timestamp())
                    .col(
                        ColumnDef::new(DiscountCodes::Retired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-discount_codes-name-unique")
                    .table(DiscountCodes::Table)
                    .col(DiscountCodes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Code redemptions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CodeRedemptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CodeRedemptions::UserId).string().not_null())
                    .col(ColumnDef::new(CodeRedemptions::CodeId).string().not_null())
                    .col(
                        ColumnDef::new(CodeRedemptions::RedeemedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CodeRedemptions::UserId)
                            .col(CodeRedemptions::CodeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-code_redemptions-user_id")
                            .from(CodeRedemptions::Table, CodeRedemptions::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-code_redemptions-code_id")
                            .from(CodeRedemptions::Table, CodeRedemptions::CodeId)
                            .to(DiscountCodes::Table, DiscountCodes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Purchases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchases::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchases::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Purchases::SubTotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Purchases::DiscountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Purchases::TotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Purchases::CodeId).string())
                    .col(ColumnDef::new(Purchases::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchases-user_id")
                            .from(Purchases::Table, Purchases::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchases-user_id-created_at")
                    .table(Purchases::Table)
                    .col(Purchases::UserId)
                    .col(Purchases::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Purchase items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PurchaseItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseItems::PurchaseId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseItems::GameId).string().not_null())
                    .col(
                        ColumnDef::new(PurchaseItems::PriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PurchaseItems::PurchaseId)
                            .col(PurchaseItems::GameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_items-purchase_id")
                            .from(PurchaseItems::Table, PurchaseItems::PurchaseId)
                            .to(Purchases::Table, Purchases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_items-game_id")
                            .from(PurchaseItems::Table, PurchaseItems::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Library entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(LibraryEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LibraryEntries::UserId).string().not_null())
                    .col(ColumnDef::new(LibraryEntries::GameId).string().not_null())
                    .col(
                        ColumnDef::new(LibraryEntries::GrantedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(LibraryEntries::UserId)
                            .col(LibraryEntries::GameId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-library_entries-user_id")
                            .from(LibraryEntries::Table, LibraryEntries::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-library_entries-game_id")
                            .from(LibraryEntries::Table, LibraryEntries::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Ledger entries
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(LedgerEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LedgerEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LedgerEntries::UserId).string().not_null())
                    .col(ColumnDef::new(LedgerEntries::Kind).string().not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LedgerEntries::Detail).string().not_null())
                    .col(ColumnDef::new(LedgerEntries::PurchaseId).string())
                    .col(
                        ColumnDef::new(LedgerEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ledger_entries-user_id")
                            .from(LedgerEntries::Table, LedgerEntries::UserId)
                            .to(Users::Table, Users::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ledger_entries-purchase_id")
                            .from(LedgerEntries::Table, LedgerEntries::PurchaseId)
                            .to(Purchases::Table, Purchases::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ledger_entries-user_id-created_at")
                    .table(LedgerEntries::Table)
                    .col(LedgerEntries::UserId)
                    .col(LedgerEntries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(LedgerEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LibraryEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CodeRedemptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DiscountCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
