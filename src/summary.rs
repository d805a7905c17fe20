//! Pure derivation of totals and groupings from a transaction list.
//!
//! Everything here is a deterministic function of its input slice; the store
//! is never touched. [`SummaryCache`] adds explicit memoization keyed on the
//! store's version counter so views recompute only after a mutation.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::models::{Transaction, TransactionKind};
use crate::store::TransactionStore;

/// Sum of amounts over entries of one kind; zero for an empty slice.
///
/// Addition runs in encounter order and no rounding is applied; display
/// formatting is a presentation concern.
pub fn total_for(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Per-kind partition of a list, original relative order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitByKind {
    pub income: Vec<Transaction>,
    pub expense: Vec<Transaction>,
}

pub fn split_by_kind(transactions: &[Transaction]) -> SplitByKind {
    let mut split = SplitByKind::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => split.income.push(tx.clone()),
            TransactionKind::Expense => split.expense.push(tx.clone()),
        }
    }
    split
}

/// Category name to the transactions carrying it, both kinds mixed.
///
/// Blank categories group under the default label without mutating the
/// stored records.
pub fn group_by_category(transactions: &[Transaction]) -> HashMap<String, Vec<Transaction>> {
    let mut groups: HashMap<String, Vec<Transaction>> = HashMap::new();
    for tx in transactions {
        groups
            .entry(tx.category_label().to_string())
            .or_default()
            .push(tx.clone());
    }
    groups
}

/// Category name to the sum of amounts across both kinds.
pub fn totals_by_category(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for tx in transactions {
        *totals.entry(tx.category_label().to_string()).or_default() += tx.amount;
    }
    totals
}

/// As [`totals_by_category`], restricted to one kind.
///
/// Categories with no matching transactions of that kind are absent from the
/// result, not present with a zero total.
pub fn totals_by_category_for(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.kind == kind) {
        *totals.entry(tx.category_label().to_string()).or_default() += tx.amount;
    }
    totals
}

/// Every derived view of one transaction list, computed together.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`; may be negative.
    pub total_balance: Decimal,
    pub split: SplitByKind,
    pub by_category: HashMap<String, Vec<Transaction>>,
    pub totals_by_category: HashMap<String, Decimal>,
    pub income_by_category: HashMap<String, Decimal>,
    pub expense_by_category: HashMap<String, Decimal>,
}

impl Summary {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let total_income = total_for(transactions, TransactionKind::Income);
        let total_expense = total_for(transactions, TransactionKind::Expense);
        Self {
            total_income,
            total_expense,
            total_balance: total_income - total_expense,
            split: split_by_kind(transactions),
            by_category: group_by_category(transactions),
            totals_by_category: totals_by_category(transactions),
            income_by_category: totals_by_category_for(transactions, TransactionKind::Income),
            expense_by_category: totals_by_category_for(transactions, TransactionKind::Expense),
        }
    }
}

/// Memoized [`Summary`] keyed on the store version.
///
/// Recomputing every call would be equally correct, just wasteful; the cache
/// only guarantees it never serves a summary older than the store's current
/// version.
#[derive(Default)]
pub struct SummaryCache {
    cached: Option<(u64, Arc<Summary>)>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&mut self, store: &TransactionStore) -> Arc<Summary> {
        if let Some((version, summary)) = &self.cached {
            if *version == store.version() {
                return Arc::clone(summary);
            }
        }
        let summary = Arc::new(Summary::compute(store.transactions()));
        self.cached = Some((store.version(), Arc::clone(&summary)));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Id;
    use chrono::NaiveDate;

    fn tx(id: &str, kind: TransactionKind, amount: i64, category: &str) -> Transaction {
        Transaction {
            id: Id::from_string(id),
            kind,
            amount: Decimal::from(amount),
            description: format!("tx {id}"),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            category: category.to_string(),
        }
    }

    #[test]
    fn empty_list_yields_zero_totals_and_empty_split() {
        let summary = Summary::compute(&[]);
        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.total_balance, Decimal::ZERO);
        assert!(summary.split.income.is_empty());
        assert!(summary.split.expense.is_empty());
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let list = vec![
            tx("1", TransactionKind::Income, 100, "Salary"),
            tx("2", TransactionKind::Expense, 150, "Food"),
        ];
        let summary = Summary::compute(&list);
        assert_eq!(summary.total_balance, Decimal::from(-50));
        assert_eq!(
            summary.total_balance,
            summary.total_income - summary.total_expense
        );
    }

    #[test]
    fn split_preserves_relative_order() {
        let list = vec![
            tx("1", TransactionKind::Expense, 10, "Food"),
            tx("2", TransactionKind::Income, 20, "Salary"),
            tx("3", TransactionKind::Expense, 30, "Bills"),
        ];
        let split = split_by_kind(&list);
        let expense_ids: Vec<&str> = split.expense.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(expense_ids, vec!["1", "3"]);
        assert_eq!(split.income.len(), 1);
    }

    #[test]
    fn blank_category_groups_under_default_without_mutation() {
        let mut blank = tx("1", TransactionKind::Expense, 10, "");
        blank.category = String::new();
        let groups = group_by_category(&[blank.clone()]);
        assert_eq!(groups["Other"].len(), 1);
        assert_eq!(groups["Other"][0].category, "");
    }

    #[test]
    fn category_bucket_sums_match_category_totals() {
        let list = vec![
            tx("1", TransactionKind::Income, 100, "Salary"),
            tx("2", TransactionKind::Expense, 40, "Food"),
            tx("3", TransactionKind::Expense, 60, "Food"),
        ];
        let groups = group_by_category(&list);
        let totals = totals_by_category(&list);
        for (category, bucket) in &groups {
            let bucket_sum: Decimal = bucket.iter().map(|t| t.amount).sum();
            assert_eq!(bucket_sum, totals[category]);
        }
        assert_eq!(totals["Food"], Decimal::from(100));
    }

    #[test]
    fn per_kind_totals_omit_categories_with_no_matches() {
        let list = vec![
            tx("1", TransactionKind::Income, 100, "Salary"),
            tx("2", TransactionKind::Expense, 40, "Food"),
        ];
        let income = totals_by_category_for(&list, TransactionKind::Income);
        assert_eq!(income.get("Salary"), Some(&Decimal::from(100)));
        assert!(!income.contains_key("Food"));
    }

    #[tokio::test]
    async fn cache_reuses_summary_until_the_version_changes() {
        use crate::models::{FixedIdGenerator, TransactionDraft};
        use crate::storage::MemoryStorage;

        let mut store = TransactionStore::load_with(
            Arc::new(MemoryStorage::new()),
            Arc::new(FixedIdGenerator::new([Id::from_string("1")])),
        )
        .await;
        let mut cache = SummaryCache::new();

        let first = cache.summary(&store);
        let second = cache.summary(&store);
        assert!(Arc::ptr_eq(&first, &second));

        store
            .add(TransactionDraft {
                kind: TransactionKind::Income,
                amount: Decimal::from(100),
                description: "Salary".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                category: Some("Salary".to_string()),
            })
            .await
            .unwrap();

        let third = cache.summary(&store);
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(third.total_income, Decimal::from(100));
    }
}
