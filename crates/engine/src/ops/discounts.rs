use chrono::{DateTime, Utc};

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QuerySelect, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{
    DiscountCode, DiscountError, EngineError, ResultEngine, code_redemptions, discount_codes,
};

use super::{Engine, normalize_code_name, with_tx};

impl Engine {
    /// Read-only preview: checks whether `code_name` can be applied by
    /// `user_id` right now, without consuming a use.
    pub async fn validate_discount(
        &self,
        user_id: &str,
        code_name: &str,
    ) -> ResultEngine<DiscountCode> {
        let code_name = normalize_code_name(code_name)?;
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let code = self
                .usable_discount(&db_tx, user_id, &code_name, Utc::now())
                .await?;
            Ok(code)
        })
    }

    /// Loads the code by name and runs every redeemability check under one
    /// locked read: existence, exhaustion/retirement, expiry, and the
    /// per-user redemption record. Validation and redemption share this read
    /// so the checks cannot go stale between them.
    pub(super) async fn usable_discount(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        code_name: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<DiscountCode> {
        let model = discount_codes::Entity::find()
            .filter(discount_codes::Column::Name.eq(code_name.to_string()))
            .lock_exclusive()
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("discount code not exists".to_string()))?;

        let code = DiscountCode::try_from(model)?;
        code.check_usable(now)?;

        let redeemed = code_redemptions::Entity::find_by_id((
            user_id.to_string(),
            code.id.to_string(),
        ))
        .one(db_tx)
        .await?
        .is_some();
        if redeemed {
            return Err(EngineError::DiscountInvalid(DiscountError::AlreadyRedeemed));
        }

        Ok(code)
    }

    /// Consume one use of `code` for `user_id` within the enclosing
    /// transaction.
    ///
    /// The capacity check rides on the UPDATE (`current_use < max_use`), so
    /// two redemptions racing for the last unit cannot both succeed: the
    /// loser matches zero rows. Hitting `max_use` retires the code; the
    /// redemption rows stay as audit trail.
    pub(super) async fn redeem_discount(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        code: &DiscountCode,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let result = discount_codes::Entity::update_many()
            .col_expr(
                discount_codes::Column::CurrentUse,
                Expr::col(discount_codes::Column::CurrentUse).add(1),
            )
            .filter(discount_codes::Column::Id.eq(code.id.to_string()))
            .filter(discount_codes::Column::Retired.eq(false))
            .filter(
                Expr::col(discount_codes::Column::CurrentUse)
                    .lt(Expr::col(discount_codes::Column::MaxUse)),
            )
            .exec(db_tx)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::DiscountInvalid(DiscountError::Exhausted));
        }

        let redemption = code_redemptions::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            code_id: ActiveValue::Set(code.id.to_string()),
            redeemed_at: ActiveValue::Set(now),
        };
        redemption.insert(db_tx).await?;

        let updated = discount_codes::Entity::find_by_id(code.id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("discount code not exists".to_string()))?;
        if updated.current_use >= updated.max_use && !updated.retired {
            let active = discount_codes::ActiveModel {
                id: ActiveValue::Set(code.id.to_string()),
                retired: ActiveValue::Set(true),
                ..Default::default()
            };
            active.update(db_tx).await?;
            tracing::info!(code = %code.name, "discount code exhausted, retiring");
        }

        Ok(())
    }
}
