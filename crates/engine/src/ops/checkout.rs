use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use sea_orm::{ActiveValue, DatabaseTransaction, TransactionTrait, prelude::*};

use crate::{
    BuyCmd, CheckoutCmd, EngineError, EntryKind, LedgerEntry, Money, Purchase, ResultEngine,
    purchase_items, purchases,
};

use super::{Engine, normalize_code_name, with_tx};

/// Outcome of a committed checkout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub purchase_id: Uuid,
    pub sub_total: Money,
    pub discount: Money,
    pub total: Money,
    pub new_balance: Money,
}

impl Engine {
    /// Convert a cart of games plus an optional discount code into a paid
    /// and recorded purchase, all or nothing.
    ///
    /// Step order decides which error the caller sees: the ownership
    /// precheck fires before anything touches the wallet, the funds check
    /// runs against the locked balance after the discount is priced in, and
    /// redemption is last so a failed purchase never consumes a code use.
    /// Any error rolls back every write of this invocation.
    pub async fn checkout(&self, cmd: CheckoutCmd) -> ResultEngine<CheckoutReceipt> {
        if cmd.game_ids.is_empty() {
            return Err(EngineError::InvalidAmount(
                "cart must not be empty".to_string(),
            ));
        }
        let distinct: HashSet<Uuid> = cmd.game_ids.iter().copied().collect();
        if distinct.len() != cmd.game_ids.len() {
            return Err(EngineError::InvalidAmount(
                "cart must not repeat games".to_string(),
            ));
        }
        let code_name = cmd
            .code_name
            .as_deref()
            .map(normalize_code_name)
            .transpose()?;

        with_tx!(self, |db_tx| {
            self.checkout_in_tx(&db_tx, &cmd.user_id, &cmd.game_ids, code_name.as_deref())
                .await
        })
    }

    /// Degenerate single-game checkout with no discount.
    pub async fn buy(&self, cmd: BuyCmd) -> ResultEngine<CheckoutReceipt> {
        self.checkout(CheckoutCmd::new(cmd.user_id, vec![cmd.game_id]))
            .await
    }

    async fn checkout_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        game_ids: &[Uuid],
        code_name: Option<&str>,
    ) -> ResultEngine<CheckoutReceipt> {
        let now = Utc::now();

        let owned = self.owned_among(db_tx, user_id, game_ids).await?;
        if !owned.is_empty() {
            let ids = owned
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(EngineError::AlreadyOwned(ids));
        }

        let wallet = self.lock_user(db_tx, user_id).await?;

        let games = self.require_games(db_tx, game_ids).await?;
        let mut sub_total = Money::ZERO;
        for game in &games {
            sub_total = sub_total.checked_add(game.price).ok_or_else(|| {
                EngineError::InvalidAmount("cart subtotal overflows".to_string())
            })?;
        }

        let code = match code_name {
            Some(name) => Some(self.usable_discount(db_tx, user_id, name, now).await?),
            None => None,
        };
        let discount = code
            .as_ref()
            .map(|code| code.discount_for(sub_total))
            .unwrap_or(Money::ZERO);

        let purchase = Purchase::new(
            user_id.to_string(),
            sub_total,
            discount,
            code.as_ref().map(|code| code.id),
            now,
        )?;

        if wallet.wallet_balance < purchase.total.cents() {
            return Err(EngineError::InsufficientFunds(format!(
                "balance {} below total {}",
                Money::new(wallet.wallet_balance),
                purchase.total
            )));
        }
        // A fully discounted cart has nothing to debit but is still recorded.
        if purchase.total.is_positive() {
            self.debit_wallet(db_tx, user_id, purchase.total.cents())
                .await?;
        }

        purchases::ActiveModel::from(&purchase).insert(db_tx).await?;
        for game in &games {
            let item = purchase_items::ActiveModel {
                purchase_id: ActiveValue::Set(purchase.id.to_string()),
                game_id: ActiveValue::Set(game.id.to_string()),
                price_minor: ActiveValue::Set(game.price.cents()),
            };
            item.insert(db_tx).await?;
            self.grant_ownership(db_tx, user_id, game.id, now).await?;
            self.increment_sales_count(db_tx, game.id).await?;
        }

        if let Some(code) = &code {
            self.redeem_discount(db_tx, user_id, code, now).await?;
        }

        let names = games
            .iter()
            .map(|game| game.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let entry = LedgerEntry::new(
            user_id.to_string(),
            EntryKind::Debit,
            purchase.total,
            format!("purchase of {names}"),
            Some(purchase.id),
            now,
        )?;
        self.append_ledger_entry(db_tx, &entry).await?;

        tracing::debug!(
            user = user_id,
            purchase = %purchase.id,
            total_minor = purchase.total.cents(),
            "checkout committed"
        );

        Ok(CheckoutReceipt {
            purchase_id: purchase.id,
            sub_total,
            discount,
            total: purchase.total,
            new_balance: Money::new(wallet.wallet_balance - purchase.total.cents()),
        })
    }
}
