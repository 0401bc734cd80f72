//! Discount code primitives.
//!
//! A code grants either a flat amount or a percentage off the cart subtotal.
//! Codes are bounded by `max_use` and an optional expiry, and each user may
//! redeem a given code at most once. An exhausted code is retired, never
//! deleted, so the redemption history stays intact.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{DiscountError, EngineError, Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscountKind {
    /// Flat amount off, in minor units.
    Amount,
    /// Percentage off the subtotal; `value` is percent points.
    Percent,
}

impl DiscountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percent => "percent",
        }
    }
}

impl TryFrom<&str> for DiscountKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "amount" => Ok(Self::Amount),
            "percent" => Ok(Self::Percent),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid discount kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscountCode {
    pub id: Uuid,
    pub name: String,
    pub kind: DiscountKind,
    pub value: i64,
    pub max_use: i64,
    pub current_use: i64,
    pub expire_date: Option<DateTime<Utc>>,
    pub retired: bool,
}

impl DiscountCode {
    /// Computes the discount this code grants on `sub_total`.
    ///
    /// The result is clamped into `[0, sub_total]`: a flat amount larger than
    /// the cart still only zeroes the total, never goes below it.
    #[must_use]
    pub fn discount_for(&self, sub_total: Money) -> Money {
        let raw = match self.kind {
            DiscountKind::Percent => sub_total.percent(self.value),
            DiscountKind::Amount => Money::new(self.value),
        };
        raw.clamp_to(sub_total)
    }

    /// Returns `true` if the code has no uses left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.retired || self.current_use >= self.max_use
    }

    /// Returns `true` if the code expired before `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expire_date.is_some_and(|expiry| expiry < now)
    }

    /// Checks exhaustion and expiry; per-user redemption is checked by the
    /// caller against the `code_redemptions` table.
    pub fn check_usable(&self, now: DateTime<Utc>) -> Result<(), EngineError> {
        if self.is_exhausted() {
            return Err(EngineError::DiscountInvalid(DiscountError::Exhausted));
        }
        if self.is_expired(now) {
            return Err(EngineError::DiscountInvalid(DiscountError::Expired));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "discount_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub kind: String,
    pub value: i64,
    pub max_use: i64,
    pub current_use: i64,
    pub expire_date: Option<DateTimeUtc>,
    pub retired: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::code_redemptions::Entity")]
    Redemptions,
}

impl Related<super::code_redemptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Redemptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&DiscountCode> for ActiveModel {
    fn from(value: &DiscountCode) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            value: ActiveValue::Set(value.value),
            max_use: ActiveValue::Set(value.max_use),
            current_use: ActiveValue::Set(value.current_use),
            expire_date: ActiveValue::Set(value.expire_date),
            retired: ActiveValue::Set(value.retired),
        }
    }
}

impl TryFrom<Model> for DiscountCode {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("discount code not exists".to_string()))?,
            name: model.name,
            kind: DiscountKind::try_from(model.kind.as_str())?,
            value: model.value,
            max_use: model.max_use,
            current_use: model.current_use,
            expire_date: model.expire_date,
            retired: model.retired,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn code(kind: DiscountKind, value: i64) -> DiscountCode {
        DiscountCode {
            id: Uuid::new_v4(),
            name: "WELCOME".to_string(),
            kind,
            value,
            max_use: 10,
            current_use: 0,
            expire_date: None,
            retired: false,
        }
    }

    #[test]
    fn percent_discount_on_subtotal() {
        let code = code(DiscountKind::Percent, 10);
        assert_eq!(code.discount_for(Money::new(7000)), Money::new(700));
    }

    #[test]
    fn amount_discount_is_clamped_to_subtotal() {
        let code = code(DiscountKind::Amount, 5000);
        assert_eq!(code.discount_for(Money::new(3000)), Money::new(3000));
        assert_eq!(code.discount_for(Money::new(8000)), Money::new(5000));
    }

    #[test]
    fn exhausted_when_uses_consumed_or_retired() {
        let mut code = code(DiscountKind::Amount, 100);
        assert!(!code.is_exhausted());
        code.current_use = code.max_use;
        assert!(code.is_exhausted());

        code.current_use = 0;
        code.retired = true;
        assert!(code.is_exhausted());
    }

    #[test]
    fn expiry_is_strictly_in_the_past() {
        let now = Utc::now();
        let mut code = code(DiscountKind::Percent, 10);
        assert!(!code.is_expired(now));

        code.expire_date = Some(now - Duration::days(1));
        assert!(code.is_expired(now));

        code.expire_date = Some(now + Duration::days(1));
        assert!(!code.is_expired(now));
    }

    #[test]
    fn check_usable_reports_exhaustion_before_expiry() {
        let now = Utc::now();
        let mut code = code(DiscountKind::Percent, 10);
        code.current_use = code.max_use;
        code.expire_date = Some(now - Duration::days(1));
        assert_eq!(
            code.check_usable(now).unwrap_err(),
            EngineError::DiscountInvalid(DiscountError::Exhausted)
        );
    }
}
