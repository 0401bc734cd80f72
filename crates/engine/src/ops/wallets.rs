use chrono::Utc;

use sea_orm::{DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{EngineError, EntryKind, LedgerEntry, Money, ResultEngine, TopUpCmd, users};

use super::{Engine, with_tx};

impl Engine {
    /// Return the current wallet balance in minor units.
    pub async fn balance(&self, user_id: &str) -> ResultEngine<i64> {
        let user = self.require_user(&self.database, user_id).await?;
        Ok(user.wallet_balance)
    }

    /// Credit the wallet and append a `credit` ledger entry, atomically.
    ///
    /// Returns the new balance.
    pub async fn top_up(&self, cmd: TopUpCmd) -> ResultEngine<i64> {
        if cmd.amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "top-up amount must be > 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let user = self.lock_user(&db_tx, &cmd.user_id).await?;
            self.credit_wallet(&db_tx, &cmd.user_id, cmd.amount_minor)
                .await?;

            let entry = LedgerEntry::new(
                cmd.user_id.clone(),
                EntryKind::Credit,
                Money::new(cmd.amount_minor),
                "wallet top-up".to_string(),
                None,
                Utc::now(),
            )?;
            self.append_ledger_entry(&db_tx, &entry).await?;

            Ok(user.wallet_balance + cmd.amount_minor)
        })
    }

    /// Unconditional balance increment. `amount_minor` must be positive.
    pub(super) async fn credit_wallet(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        amount_minor: i64,
    ) -> ResultEngine<()> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "credit amount must be > 0".to_string(),
            ));
        }

        let result = users::Entity::update_many()
            .col_expr(
                users::Column::WalletBalance,
                Expr::col(users::Column::WalletBalance).add(amount_minor),
            )
            .filter(users::Column::UserId.eq(user_id.to_string()))
            .exec(db_tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }

    /// Conditional balance decrement.
    ///
    /// The `wallet_balance >= amount` predicate rides on the UPDATE itself, so
    /// the balance can never go negative even if two debits race: the loser
    /// matches zero rows and the caller sees `InsufficientFunds`.
    pub(super) async fn debit_wallet(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        amount_minor: i64,
    ) -> ResultEngine<()> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "debit amount must be > 0".to_string(),
            ));
        }

        let result = users::Entity::update_many()
            .col_expr(
                users::Column::WalletBalance,
                Expr::col(users::Column::WalletBalance).sub(amount_minor),
            )
            .filter(users::Column::UserId.eq(user_id.to_string()))
            .filter(users::Column::WalletBalance.gte(amount_minor))
            .exec(db_tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::InsufficientFunds(format!(
                "balance below {}",
                Money::new(amount_minor)
            )));
        }
        Ok(())
    }
}
