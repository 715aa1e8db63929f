use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

/// Wallet account row. The balance column is mutated only inside a committed
/// atomic unit; `password_hash` is opaque to this crate and consumed by the
/// authentication layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

/// Ledger entry kind tag. Stored as text; rows carry the string and code
/// compares against `as_str()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Coin movement between two distinct users.
    Peer,
    /// Catalog purchase; debits the buyer and retires the coins.
    Purchase,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Peer => "peer",
            EntryKind::Purchase => "purchase",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "peer" => Some(EntryKind::Peer),
            "purchase" => Some(EntryKind::Purchase),
            _ => None,
        }
    }
}

/// Immutable row of the append-only ledger.
///
/// Purchase rows satisfy `from_user_id == to_user_id` (the buyer) and carry
/// `item_name`; peer rows never do. Both shapes share the table so supply
/// checks can sum one column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub entry_type: String,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub amount: i64,
    pub item_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn is_peer(&self) -> bool {
        self.entry_type == EntryKind::Peer.as_str()
    }

    pub fn is_purchase(&self) -> bool {
        self.entry_type == EntryKind::Purchase.as_str()
    }
}

/// Priced catalog item; read-only at runtime, seeded by migration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogItem {
    pub name: String,
    pub price: i64,
}

/// Owned quantity of one item for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryEntry {
    pub user_id: i64,
    pub item_name: String,
    pub quantity: i64,
}

/// One incoming peer transfer, counterpart resolved to a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedTransfer {
    pub amount: i64,
    pub from_user: String,
}

/// One outgoing peer transfer, counterpart resolved to a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentTransfer {
    pub amount: i64,
    pub to_user: String,
}

/// Peer-transfer history for one user. Purchases never appear here.
///
/// `partial` is set when entries were skipped because their counterpart no
/// longer resolves to a username.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinHistory {
    pub received: Vec<ReceivedTransfer>,
    pub sent: Vec<SentTransfer>,
    pub partial: bool,
}

/// Balance, history, and inventory in one read-only aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub balance: i64,
    pub coin_history: CoinHistory,
    pub inventory: HashMap<String, i64>,
}
