use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Id, IdGenerator, UuidIdGenerator};

/// Category assigned when a new transaction arrives without one.
pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense record.
///
/// Stored as one entry of the serialized transaction list. The amount is
/// always strictly positive; whether it adds to or subtracts from the
/// balance is carried by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    pub category: String,
}

impl Transaction {
    /// The grouping label for this transaction.
    ///
    /// A blank category (possible in data written by older tools) groups
    /// under [`DEFAULT_CATEGORY`] without mutating the stored record.
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }
}

/// Candidate for a new transaction: every field except the id, which the
/// store assigns on insert.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    /// `None` or blank means "use the default category".
    pub category: Option<String>,
}

impl TransactionDraft {
    /// Materialize into a stored transaction with a freshly generated id.
    pub fn into_transaction(self) -> Transaction {
        self.into_transaction_with(&UuidIdGenerator)
    }

    /// Materialize with an injected generator, assigning the default
    /// category when none was supplied.
    pub fn into_transaction_with(self, ids: &dyn IdGenerator) -> Transaction {
        let category = match self.category {
            Some(c) if !c.trim().is_empty() => c,
            _ => DEFAULT_CATEGORY.to_string(),
        };
        Transaction {
            id: ids.new_id(),
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            date: self.date,
            category,
        }
    }
}
