use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod store {
    use super::*;

    /// Request body for a multi-game checkout.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CheckoutNew {
        /// Game ids (UUIDs), at least one, no repeats.
        pub game_ids: Vec<Uuid>,
        /// Optional discount code name.
        pub code: Option<String>,
    }

    /// Request body for a single-game purchase.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BuyNew {
        pub game_id: Uuid,
    }

    /// Response body for a committed checkout.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceiptView {
        pub purchase_id: Uuid,
        pub sub_total_minor: i64,
        pub discount_minor: i64,
        pub total_minor: i64,
        pub balance_minor: i64,
    }
}

pub mod wallet {
    use super::*;

    /// Request body for crediting the caller's wallet.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TopUpNew {
        /// Amount in minor units. Must be > 0.
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub balance_minor: i64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EntryKind {
        Credit,
        Debit,
    }

    /// One wallet movement, newest first in listings.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: Uuid,
        pub kind: EntryKind,
        pub amount_minor: i64,
        pub detail: String,
        pub purchase_id: Option<Uuid>,
        /// RFC3339 timestamp (UTC).
        pub created_at: DateTime<Utc>,
    }

    /// Query parameters for the wallet history listing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryList {
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryListResponse {
        pub entries: Vec<EntryView>,
    }
}

pub mod discount {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum DiscountKind {
        /// Flat amount off, `value` in minor units.
        Amount,
        /// Percentage off the subtotal, `value` in percent points.
        Percent,
    }

    /// Request body for previewing a code without consuming a use.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DiscountValidate {
        pub code: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DiscountView {
        pub name: String,
        pub kind: DiscountKind,
        pub value: i64,
        /// Uses left before the code retires.
        pub remaining_uses: i64,
        /// RFC3339 timestamp (UTC); absent means the code never expires.
        pub expire_date: Option<DateTime<Utc>>,
    }
}

pub mod game {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GameView {
        pub id: Uuid,
        pub name: String,
        pub detail: Option<String>,
        pub price_minor: i64,
        /// RFC3339 timestamp (UTC).
        pub release_date: DateTime<Utc>,
        pub sales_count: i64,
    }

    /// Query parameters for the paginated catalog listing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct GameList {
        /// Case-insensitive name filter.
        pub search: Option<String>,
        /// 1-based page number.
        pub page: Option<u64>,
        pub per_page: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GameListResponse {
        pub games: Vec<GameView>,
        pub total: u64,
        pub page: u64,
        pub per_page: u64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BestSellers {
        pub limit: Option<u64>,
    }
}

pub mod library {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OwnedGameView {
        pub game: game::GameView,
        /// RFC3339 timestamp (UTC).
        pub granted_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LibraryResponse {
        pub games: Vec<OwnedGameView>,
    }
}

pub mod user {
    use super::*;

    /// Caller profile. Never carries the password hash.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileView {
        pub user_id: String,
        pub username: String,
        pub email: String,
        pub role: String,
        pub profile_image: Option<String>,
        pub balance_minor: i64,
    }
}
