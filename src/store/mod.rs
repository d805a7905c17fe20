mod validate;

pub use validate::{validate, Field, ValidationError};

use std::sync::Arc;

use crate::models::{Id, IdGenerator, Transaction, TransactionDraft, UuidIdGenerator};
use crate::storage::Storage;

/// Mutation commands accepted by [`TransactionStore::apply`].
#[derive(Debug, Clone)]
pub enum Command {
    Add(TransactionDraft),
    Update(Transaction),
    Delete(Id),
}

/// Result of a successfully applied command.
#[derive(Debug, Clone)]
pub enum Applied {
    Added(Transaction),
    Updated(Transaction),
    Deleted,
}

/// Owner of the canonical transaction list.
///
/// Every transaction in the list has passed [`validate`]; a rejected
/// mutation leaves the list in its last committed state. Consumers read the
/// list through [`transactions`](Self::transactions) and derived views, never
/// through a mutable handle.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    version: u64,
    storage: Arc<dyn Storage>,
    ids: Arc<dyn IdGenerator>,
}

impl TransactionStore {
    /// Load the persisted list from the storage boundary.
    ///
    /// Unreadable or malformed data falls back to an empty list with a
    /// logged diagnostic; startup never fails on bad storage.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        Self::load_with(storage, Arc::new(UuidIdGenerator)).await
    }

    pub async fn load_with(storage: Arc<dyn Storage>, ids: Arc<dyn IdGenerator>) -> Self {
        let transactions = match storage.load().await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Transaction>>(&blob) {
                Ok(list) => list,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "stored transaction list is malformed, starting empty"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "failed to read stored transactions, starting empty"
                );
                Vec::new()
            }
        };

        Self {
            transactions,
            version: 0,
            storage,
            ids,
        }
    }

    /// The full list, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &Id) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Monotonic counter bumped on every committed mutation. Derived views
    /// key their memoization on this.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Dispatch a tagged mutation command.
    pub async fn apply(&mut self, command: Command) -> Result<Applied, ValidationError> {
        match command {
            Command::Add(draft) => self.add(draft).await.map(Applied::Added),
            Command::Update(tx) => self.update(tx).await.map(Applied::Updated),
            Command::Delete(id) => {
                self.delete(&id).await;
                Ok(Applied::Deleted)
            }
        }
    }

    /// Validate and prepend a new transaction.
    ///
    /// A blank category defaults to `"Other"` before validation, and a fresh
    /// id is generated. On rejection the list is unchanged.
    pub async fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, ValidationError> {
        let tx = draft.into_transaction_with(self.ids.as_ref());
        validate(&tx)?;

        tracing::debug!(id = %tx.id, kind = %tx.kind, "adding transaction");
        self.transactions.insert(0, tx.clone());
        self.commit().await;
        Ok(tx)
    }

    /// Validate and replace the entry with the same id.
    ///
    /// The replacement is validated as-is: unlike [`add`](Self::add), a blank
    /// category is a rejection here, not a default. An unknown id is a no-op
    /// that still reports success.
    pub async fn update(&mut self, tx: Transaction) -> Result<Transaction, ValidationError> {
        validate(&tx)?;

        if let Some(existing) = self.transactions.iter_mut().find(|t| t.id == tx.id) {
            tracing::debug!(id = %tx.id, "updating transaction");
            *existing = tx.clone();
        } else {
            tracing::debug!(id = %tx.id, "update target not found, nothing replaced");
        }
        self.commit().await;
        Ok(tx)
    }

    /// Remove the entry with the given id, if present. Unknown ids are a
    /// no-op, not an error. Returns the resulting list.
    pub async fn delete(&mut self, id: &Id) -> &[Transaction] {
        let before = self.transactions.len();
        self.transactions.retain(|t| &t.id != id);
        if self.transactions.len() == before {
            tracing::debug!(id = %id, "delete target not found");
        }
        self.commit().await;
        &self.transactions
    }

    /// Bump the version and write the full list through the boundary.
    ///
    /// A write failure is logged and swallowed: the committed in-memory
    /// mutation stays applied, it just may not survive a restart.
    async fn commit(&mut self) {
        self.version += 1;
        match serde_json::to_string_pretty(&self.transactions) {
            Ok(blob) => {
                if let Err(err) = self.storage.save(&blob).await {
                    tracing::warn!(
                        error = %err,
                        "failed to persist transactions, keeping in-memory state"
                    );
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize transactions");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedIdGenerator, TransactionKind};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn draft(amount: i64) -> TransactionDraft {
        TransactionDraft {
            kind: TransactionKind::Income,
            amount: Decimal::from(amount),
            description: "Salary".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            category: Some("Salary".to_string()),
        }
    }

    async fn store_with_ids(ids: &[&str]) -> TransactionStore {
        TransactionStore::load_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(FixedIdGenerator::new(
                ids.iter().map(|s| Id::from_string(*s)).collect::<Vec<_>>(),
            )),
        )
        .await
    }

    #[tokio::test]
    async fn add_prepends_newest_first() {
        let mut store = store_with_ids(&["1", "2"]).await;
        store.add(draft(100)).await.unwrap();
        store.add(draft(200)).await.unwrap();

        let ids: Vec<&str> = store
            .transactions()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn rejected_add_leaves_list_and_version_unchanged() {
        let mut store = store_with_ids(&["1"]).await;
        let err = store.add(draft(-100)).await.unwrap_err();
        assert_eq!(err.fields, vec![Field::Amount]);
        assert!(store.transactions().is_empty());
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn committed_mutations_bump_the_version() {
        let mut store = store_with_ids(&["1"]).await;
        assert_eq!(store.version(), 0);
        store.add(draft(100)).await.unwrap();
        assert_eq!(store.version(), 1);
        store.delete(&Id::from_string("1")).await;
        assert_eq!(store.version(), 2);
    }

    #[tokio::test]
    async fn apply_dispatches_commands() {
        let mut store = store_with_ids(&["1"]).await;

        let applied = store.apply(Command::Add(draft(100))).await.unwrap();
        let added = match applied {
            Applied::Added(tx) => tx,
            other => panic!("expected Added, got {other:?}"),
        };
        assert_eq!(added.id.as_str(), "1");

        let mut replacement = added.clone();
        replacement.amount = Decimal::from(150);
        let applied = store
            .apply(Command::Update(replacement))
            .await
            .unwrap();
        assert!(matches!(applied, Applied::Updated(_)));
        assert_eq!(store.get(&added.id).unwrap().amount, Decimal::from(150));

        let applied = store
            .apply(Command::Delete(added.id.clone()))
            .await
            .unwrap();
        assert!(matches!(applied, Applied::Deleted));
        assert!(store.transactions().is_empty());
    }
}
