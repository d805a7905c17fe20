use anyhow::Result;
use serde_json::json;

use crate::config::DisplayConfig;
use crate::models::{Id, Transaction, TransactionDraft};
use crate::store::{TransactionStore, ValidationError};

use super::views::transaction_output;

/// Add a transaction, reporting the outcome as JSON.
///
/// A validation rejection is a reported failure (`success: false` with the
/// offending field names), not an error: the caller's store is intact either
/// way.
pub async fn add_transaction(
    store: &mut TransactionStore,
    draft: TransactionDraft,
    display: &DisplayConfig,
) -> Result<serde_json::Value> {
    match store.add(draft).await {
        Ok(tx) => Ok(json!({
            "success": true,
            "transaction": transaction_output(&tx, display)
        })),
        Err(err) => Ok(rejection(err)),
    }
}

/// Replace a transaction by id, reporting the outcome as JSON.
pub async fn update_transaction(
    store: &mut TransactionStore,
    tx: Transaction,
    display: &DisplayConfig,
) -> Result<serde_json::Value> {
    let replaced = store.get(&tx.id).is_some();
    match store.update(tx).await {
        Ok(tx) => Ok(json!({
            "success": true,
            "replaced": replaced,
            "transaction": transaction_output(&tx, display)
        })),
        Err(err) => Ok(rejection(err)),
    }
}

/// Remove a transaction by id. An unknown id reports success with
/// `removed: false`.
pub async fn remove_transaction(
    store: &mut TransactionStore,
    id_str: &str,
) -> Result<serde_json::Value> {
    let id = Id::from_string(id_str);
    let removed = store.get(&id).is_some();
    let remaining = store.delete(&id).await.len();
    Ok(json!({
        "success": true,
        "removed": removed,
        "remaining": remaining
    }))
}

fn rejection(err: ValidationError) -> serde_json::Value {
    json!({
        "success": false,
        "error": err.to_string(),
        "invalid_fields": err.fields.iter().map(|f| f.name()).collect::<Vec<_>>()
    })
}
