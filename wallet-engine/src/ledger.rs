//! Ledger store: append-only record of every balance-affecting event.
//!
//! Entries are never updated or deleted. Peer transfers and purchases share
//! the table, distinguished by the `entry_type` tag, so any consumer can sum
//! amounts without disambiguating row shapes.

use crate::errors::Result;
use crate::models::{CoinHistory, EntryKind, LedgerEntry, ReceivedTransfer, SentTransfer};
use sqlx::PgExecutor;
use std::collections::HashMap;

/// Append a peer-transfer entry and return its id.
pub async fn append_peer<'e, E>(exec: E, from_user_id: i64, to_user_id: i64, amount: i64) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO ledger_entries (entry_type, from_user_id, to_user_id, amount)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(EntryKind::Peer.as_str())
    .bind(from_user_id)
    .bind(to_user_id)
    .bind(amount)
    .fetch_one(exec)
    .await?;

    Ok(id)
}

/// Append a purchase entry and return its id. Both user columns carry the
/// buyer so supply checks stay uniform across entry kinds.
pub async fn append_purchase<'e, E>(exec: E, user_id: i64, item_name: &str, price: i64) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO ledger_entries (entry_type, from_user_id, to_user_id, amount, item_name)
        VALUES ($1, $2, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(EntryKind::Purchase.as_str())
    .bind(user_id)
    .bind(price)
    .bind(item_name)
    .fetch_one(exec)
    .await?;

    Ok(id)
}

/// Peer entries where the user is the recipient.
pub async fn received_by<'e, E>(exec: E, user_id: i64) -> Result<Vec<LedgerEntry>>
where
    E: PgExecutor<'e>,
{
    let entries = sqlx::query_as::<_, LedgerEntry>(
        r#"
        SELECT id, entry_type, from_user_id, to_user_id, amount, item_name, created_at
        FROM ledger_entries
        WHERE to_user_id = $1 AND entry_type = 'peer'
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(exec)
    .await?;

    Ok(entries)
}

/// Peer entries where the user is the sender.
pub async fn sent_by<'e, E>(exec: E, user_id: i64) -> Result<Vec<LedgerEntry>>
where
    E: PgExecutor<'e>,
{
    let entries = sqlx::query_as::<_, LedgerEntry>(
        r#"
        SELECT id, entry_type, from_user_id, to_user_id, amount, item_name, created_at
        FROM ledger_entries
        WHERE from_user_id = $1 AND entry_type = 'peer'
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(exec)
    .await?;

    Ok(entries)
}

/// Shape raw ledger rows into per-user history, resolving counterparts
/// through the prefetched `usernames` map.
///
/// Entries whose counterpart is missing from the map are skipped and the
/// result is flagged `partial`; purchases are dropped outright, they are
/// spending, not peer transfers.
pub fn fold_history(
    received: &[LedgerEntry],
    sent: &[LedgerEntry],
    usernames: &HashMap<i64, String>,
) -> CoinHistory {
    let mut history = CoinHistory::default();

    for entry in received.iter().filter(|e| e.is_peer()) {
        match usernames.get(&entry.from_user_id) {
            Some(name) => history.received.push(ReceivedTransfer {
                amount: entry.amount,
                from_user: name.clone(),
            }),
            None => history.partial = true,
        }
    }

    for entry in sent.iter().filter(|e| e.is_peer()) {
        match usernames.get(&entry.to_user_id) {
            Some(name) => history.sent.push(SentTransfer {
                amount: entry.amount,
                to_user: name.clone(),
            }),
            None => history.partial = true,
        }
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn peer(id: i64, from: i64, to: i64, amount: i64) -> LedgerEntry {
        LedgerEntry {
            id,
            entry_type: EntryKind::Peer.as_str().to_string(),
            from_user_id: from,
            to_user_id: to,
            amount,
            item_name: None,
            created_at: Utc::now(),
        }
    }

    fn purchase(id: i64, user: i64, item: &str, price: i64) -> LedgerEntry {
        LedgerEntry {
            id,
            entry_type: EntryKind::Purchase.as_str().to_string(),
            from_user_id: user,
            to_user_id: user,
            amount: price,
            item_name: Some(item.to_string()),
            created_at: Utc::now(),
        }
    }

    fn names(pairs: &[(i64, &str)]) -> HashMap<i64, String> {
        pairs.iter().map(|(id, n)| (*id, n.to_string())).collect()
    }

    #[test]
    fn resolves_counterparts_on_both_sides() {
        let received = vec![peer(1, 2, 1, 40)];
        let sent = vec![peer(2, 1, 3, 25)];
        let usernames = names(&[(2, "alice"), (3, "bob")]);

        let history = fold_history(&received, &sent, &usernames);

        assert_eq!(
            history.received,
            vec![ReceivedTransfer {
                amount: 40,
                from_user: "alice".to_string()
            }]
        );
        assert_eq!(
            history.sent,
            vec![SentTransfer {
                amount: 25,
                to_user: "bob".to_string()
            }]
        );
        assert!(!history.partial);
    }

    #[test]
    fn unresolvable_counterpart_is_skipped_and_flagged() {
        let received = vec![peer(1, 2, 1, 40), peer(2, 9, 1, 15)];
        let usernames = names(&[(2, "alice")]);

        let history = fold_history(&received, &[], &usernames);

        assert_eq!(history.received.len(), 1);
        assert!(history.partial);
    }

    #[test]
    fn purchases_never_surface_in_history() {
        let sent = vec![purchase(1, 1, "pen", 10), peer(2, 1, 2, 100)];
        let usernames = names(&[(1, "me"), (2, "alice")]);

        let history = fold_history(&[], &sent, &usernames);

        assert_eq!(history.sent.len(), 1);
        assert_eq!(history.sent[0].to_user, "alice");
        assert!(!history.partial);
    }

    #[test]
    fn empty_ledger_folds_to_empty_history() {
        let history = fold_history(&[], &[], &HashMap::new());
        assert!(history.received.is_empty());
        assert!(history.sent.is_empty());
        assert!(!history.partial);
    }
}
