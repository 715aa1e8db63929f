//! Transfer engine: the transactional coordinator over the balance, ledger,
//! catalog, and inventory stores.
//!
//! Each mutating operation is single-shot and all-or-nothing: one
//! transaction is opened per call, and any early return before commit drops
//! it, which rolls back every step already applied. The engine itself is
//! stateless; serialization is delegated entirely to the store's atomic
//! conditional updates, so contention is per balance row, never
//! per service.

use crate::balances;
use crate::catalog;
use crate::database::Database;
use crate::errors::{Result, WalletError};
use crate::inventory;
use crate::ledger;
use crate::metrics;
use crate::models::{AccountSummary, CoinHistory};
use crate::users;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct TransferEngine {
    db: Arc<Database>,
}

impl TransferEngine {
    pub fn new(db: Arc<Database>) -> Self {
        TransferEngine { db }
    }

    /// Send `amount` coins from `sender_id` to the user named `recipient`.
    ///
    /// The debit, the credit, and the ledger entry land in one atomic unit;
    /// the conditional debit on the sender's row is what linearizes
    /// concurrent sends from the same sender and keeps the balance
    /// non-negative.
    pub async fn send(&self, sender_id: i64, recipient: &str, amount: i64) -> Result<()> {
        let timer = metrics::OPERATION_DURATION.start_timer();

        if amount <= 0 {
            return Err(WalletError::InvalidAmount(amount));
        }

        let recipient_id = users::id_by_username(self.db.pool(), recipient)
            .await?
            .ok_or_else(|| WalletError::RecipientNotFound(recipient.to_string()))?;

        if recipient_id == sender_id {
            return Err(WalletError::SelfTransferRejected);
        }

        let mut tx = self.db.pool().begin().await?;

        if !balances::try_debit(&mut *tx, sender_id, amount).await? {
            return Err(self.debit_failure(&mut tx, sender_id, amount).await?);
        }

        if !balances::credit(&mut *tx, recipient_id, amount).await? {
            return Err(WalletError::UserNotFound(recipient_id));
        }

        let entry_id = ledger::append_peer(&mut *tx, sender_id, recipient_id, amount).await?;

        tx.commit().await?;
        timer.observe_duration();

        metrics::TRANSFERS_COMMITTED.inc();
        info!(
            sender_id,
            recipient_id, amount, entry_id, "transfer committed"
        );

        Ok(())
    }

    /// Buy one unit of `item_name` for `user_id` at the catalog price.
    ///
    /// Price lookup, conditional debit, inventory grant, and the purchase
    /// ledger entry share one atomic unit; a failure after the debit rolls
    /// the debit back too.
    pub async fn purchase(&self, user_id: i64, item_name: &str) -> Result<()> {
        let timer = metrics::OPERATION_DURATION.start_timer();

        let mut tx = self.db.pool().begin().await?;

        let price = catalog::price_of(&mut *tx, item_name)
            .await?
            .ok_or_else(|| WalletError::ItemNotFound(item_name.to_string()))?;

        if !balances::try_debit(&mut *tx, user_id, price).await? {
            return Err(self.debit_failure(&mut tx, user_id, price).await?);
        }

        inventory::grant(&mut *tx, user_id, item_name).await?;
        let entry_id = ledger::append_purchase(&mut *tx, user_id, item_name, price).await?;

        tx.commit().await?;
        timer.observe_duration();

        metrics::PURCHASES_COMMITTED.inc();
        info!(user_id, item_name, price, entry_id, "purchase committed");

        Ok(())
    }

    /// Peer-transfer history for the user, counterparts resolved to
    /// usernames. Entries whose counterpart no longer resolves are skipped
    /// and the result is flagged partial.
    pub async fn history(&self, user_id: i64) -> Result<CoinHistory> {
        let pool = self.db.pool();

        let received = ledger::received_by(pool, user_id).await?;
        let sent = ledger::sent_by(pool, user_id).await?;

        let mut counterparts: Vec<i64> = received
            .iter()
            .map(|e| e.from_user_id)
            .chain(sent.iter().map(|e| e.to_user_id))
            .collect();
        counterparts.sort_unstable();
        counterparts.dedup();

        let usernames = users::usernames_of(pool, &counterparts).await?;
        let history = ledger::fold_history(&received, &sent, &usernames);

        if history.partial {
            warn!(user_id, "history omitted entries with unresolvable counterparts");
        }

        Ok(history)
    }

    pub async fn balance(&self, user_id: i64) -> Result<i64> {
        balances::balance_of(self.db.pool(), user_id)
            .await?
            .ok_or(WalletError::UserNotFound(user_id))
    }

    pub async fn inventory(&self, user_id: i64) -> Result<HashMap<String, i64>> {
        inventory::of_user(self.db.pool(), user_id).await
    }

    /// Balance, history, and inventory in one read-only aggregate.
    pub async fn summary(&self, user_id: i64) -> Result<AccountSummary> {
        let balance = self.balance(user_id).await?;
        let coin_history = self.history(user_id).await?;
        let inventory = self.inventory(user_id).await?;

        Ok(AccountSummary {
            balance,
            coin_history,
            inventory,
        })
    }

    /// Classify a failed conditional debit: the row is either absent or
    /// short of funds. Read inside the same transaction so the answer is
    /// consistent with the guard that just failed.
    async fn debit_failure(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: i64,
        required: i64,
    ) -> Result<WalletError> {
        let available = match balances::balance_of(&mut **tx, user_id).await? {
            Some(balance) => balance,
            None => return Ok(WalletError::UserNotFound(user_id)),
        };

        metrics::INSUFFICIENT_FUNDS_REJECTIONS.inc();
        info!(user_id, required, available, "mutation rejected, insufficient funds");

        Ok(WalletError::InsufficientFunds {
            required,
            available,
        })
    }
}
