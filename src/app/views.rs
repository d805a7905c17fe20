use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::config::DisplayConfig;
use crate::filter::{DateRange, TransactionFilter};
use crate::format::format_amount;
use crate::models::Transaction;
use crate::store::TransactionStore;
use crate::summary::{split_by_kind, Summary};

use super::types::{CategoryTotalOutput, ListOutput, SummaryOutput, TransactionOutput};

/// Parse a date-range selection from CLI arguments.
pub fn parse_range(range: &str, start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    match range.trim().to_lowercase().as_str() {
        "all" => Ok(DateRange::All),
        "today" => Ok(DateRange::Today),
        "week" => Ok(DateRange::Week),
        "month" => Ok(DateRange::Month),
        "year" => Ok(DateRange::Year),
        "custom" => Ok(DateRange::Custom {
            start: parse_bound("start", start)?,
            end: parse_bound("end", end)?,
        }),
        _ => anyhow::bail!(
            "Invalid range: {range}. Use: all, today, week, month, year, custom"
        ),
    }
}

fn parse_bound(label: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid {label} date: {v}"))
        })
        .transpose()
}

pub fn transaction_output(tx: &Transaction, display: &DisplayConfig) -> TransactionOutput {
    TransactionOutput {
        id: tx.id.to_string(),
        kind: tx.kind.to_string(),
        amount: tx.amount.to_string(),
        amount_display: format_amount(tx.amount, display),
        description: tx.description.clone(),
        date: tx.date.to_string(),
        category: tx.category.clone(),
    }
}

/// The filtered, type-partitioned list the CLI renders.
pub fn list_transactions(
    store: &TransactionStore,
    filter: &TransactionFilter,
    clock: &dyn Clock,
    display: &DisplayConfig,
    limit: Option<usize>,
) -> ListOutput {
    let split = split_by_kind(store.transactions());
    let mut filtered = filter.apply_split(&split, clock);
    if let Some(limit) = limit {
        filtered.income.truncate(limit);
        filtered.expense.truncate(limit);
    }

    let income: Vec<TransactionOutput> = filtered
        .income
        .iter()
        .map(|tx| transaction_output(tx, display))
        .collect();
    let expense: Vec<TransactionOutput> = filtered
        .expense
        .iter()
        .map(|tx| transaction_output(tx, display))
        .collect();
    let transaction_count = income.len() + expense.len();

    ListOutput {
        income,
        expense,
        transaction_count,
    }
}

pub fn summary_output(summary: &Summary, display: &DisplayConfig) -> SummaryOutput {
    SummaryOutput {
        total_income: format_amount(summary.total_income, display),
        total_expense: format_amount(summary.total_expense, display),
        total_balance: format_amount(summary.total_balance, display),
        transaction_count: summary.split.income.len() + summary.split.expense.len(),
        by_category: category_entries(
            &summary.totals_by_category,
            |category| {
                summary
                    .by_category
                    .get(category)
                    .map(Vec::len)
                    .unwrap_or(0)
            },
            display,
        ),
        income_by_category: category_entries(
            &summary.income_by_category,
            |category| kind_count(&summary.split.income, category),
            display,
        ),
        expense_by_category: category_entries(
            &summary.expense_by_category,
            |category| kind_count(&summary.split.expense, category),
            display,
        ),
    }
}

fn kind_count(bucket: &[Transaction], category: &str) -> usize {
    bucket
        .iter()
        .filter(|tx| tx.category_label() == category)
        .count()
}

fn category_entries(
    totals: &HashMap<String, Decimal>,
    count_for: impl Fn(&str) -> usize,
    display: &DisplayConfig,
) -> Vec<CategoryTotalOutput> {
    let mut entries: Vec<(&String, Decimal)> =
        totals.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .map(|(category, total)| CategoryTotalOutput {
            category: category.clone(),
            total: format_amount(total, display),
            transaction_count: count_for(category),
        })
        .collect()
}
