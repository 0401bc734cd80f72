//! Command structs for engine operations.
//!
//! These types group parameters for write operations (checkout/buy/top-up),
//! keeping call sites readable and avoiding long argument lists.

use uuid::Uuid;

/// Convert a cart of games (plus an optional discount code) into a paid
/// purchase.
#[derive(Clone, Debug)]
pub struct CheckoutCmd {
    pub user_id: String,
    pub game_ids: Vec<Uuid>,
    pub code_name: Option<String>,
}

impl CheckoutCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, game_ids: Vec<Uuid>) -> Self {
        Self {
            user_id: user_id.into(),
            game_ids,
            code_name: None,
        }
    }

    #[must_use]
    pub fn code_name(mut self, code_name: impl Into<String>) -> Self {
        self.code_name = Some(code_name.into());
        self
    }
}

/// Buy a single game, no discount.
#[derive(Clone, Debug)]
pub struct BuyCmd {
    pub user_id: String,
    pub game_id: Uuid,
}

impl BuyCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, game_id: Uuid) -> Self {
        Self {
            user_id: user_id.into(),
            game_id,
        }
    }
}

/// Credit the caller's wallet.
#[derive(Clone, Debug)]
pub struct TopUpCmd {
    pub user_id: String,
    pub amount_minor: i64,
}

impl TopUpCmd {
    #[must_use]
    pub fn new(user_id: impl Into<String>, amount_minor: i64) -> Self {
        Self {
            user_id: user_id.into(),
            amount_minor,
        }
    }
}
