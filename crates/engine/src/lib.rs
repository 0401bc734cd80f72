pub use commands::{BuyCmd, CheckoutCmd, TopUpCmd};
pub use discount_codes::{DiscountCode, DiscountKind};
pub use error::{DiscountError, EngineError};
pub use games::Game;
pub use ledger::{EntryKind, LedgerEntry};
pub use money::Money;
pub use ops::{CheckoutReceipt, Engine, EngineBuilder, GamePage};
pub use purchases::Purchase;

pub mod code_redemptions;
mod commands;
pub mod discount_codes;
mod error;
pub mod games;
pub mod ledger;
pub mod library;
mod money;
mod ops;
pub mod purchase_items;
pub mod purchases;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
