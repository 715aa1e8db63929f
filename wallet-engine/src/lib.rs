//! Transactional coin wallet service core.
//!
//! Users hold an integer coin balance, send coins to each other, and spend
//! them on catalog items. Every mutation runs as one atomic unit of work
//! against PostgreSQL: the balance delta, the append-only ledger entry, and
//! (for purchases) the inventory grant either all land or none do.
//!
//! # Invariants
//!
//! - Every balance >= 0 at every observable instant
//! - Peer transfers conserve the total coin supply; purchases retire coins
//! - Every committed ledger entry has its balance delta already applied
//! - Inventory quantity equals the count of purchase entries for that pair

pub mod balances;
pub mod catalog;
pub mod config;
pub mod database;
pub mod engine;
pub mod errors;
pub mod inventory;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod users;

pub use config::Config;
pub use database::Database;
pub use engine::TransferEngine;
pub use errors::{Result, WalletError};
pub use models::{
    AccountSummary, CatalogItem, CoinHistory, EntryKind, InventoryEntry, LedgerEntry,
    ReceivedTransfer, SentTransfer, User,
};
