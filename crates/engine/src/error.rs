//! The module contains the errors the engine can throw.
//!
//! Business-rule violations (insufficient funds, duplicate ownership, bad
//! discount codes) are explicit variants so the HTTP layer can map each to a
//! precise status code. Store-level faults are wrapped in [`Database`] and
//! must never leak storage detail to callers.
//!
//! [`Database`]: EngineError::Database

use sea_orm::DbErr;
use thiserror::Error;

/// Why a discount code cannot be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscountError {
    /// `expire_date` is in the past.
    Expired,
    /// `current_use` has reached `max_use` (or the code was retired).
    Exhausted,
    /// The calling user already redeemed this code.
    AlreadyRedeemed,
}

impl DiscountError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "code has expired",
            Self::Exhausted => "code has no uses left",
            Self::AlreadyRedeemed => "code was already redeemed by this user",
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Already owned: {0}")]
    AlreadyOwned(String),
    #[error("Discount invalid: {}", .0.as_str())]
    DiscountInvalid(DiscountError),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::AlreadyOwned(a), Self::AlreadyOwned(b)) => a == b,
            (Self::DiscountInvalid(a), Self::DiscountInvalid(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
