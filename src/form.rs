//! Input-collection boundary: raw field strings to a validated draft.
//!
//! The checks here belong to the form, not the store: parseability, the
//! amount ceiling, and the future-date rule are all enforced before a
//! candidate ever reaches [`TransactionStore`](crate::store::TransactionStore).

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::models::{TransactionDraft, TransactionKind};

/// The fixed category pick list.
pub const CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Other",
];

/// Largest amount the form accepts.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(999_999_999, 0, 0, false, 0);

/// Parse the income/expense toggle; an unset toggle means expense.
pub fn parse_kind(s: Option<&str>) -> Result<TransactionKind> {
    let Some(s) = s else {
        return Ok(TransactionKind::Expense);
    };
    match s.trim().to_lowercase().as_str() {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        _ => anyhow::bail!("Invalid type: {s}. Use: income, expense"),
    }
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    let amount =
        Decimal::from_str(trimmed).with_context(|| format!("Invalid amount: {trimmed}"))?;
    if amount <= Decimal::ZERO {
        anyhow::bail!("Amount must be greater than 0");
    }
    if amount > MAX_AMOUNT {
        anyhow::bail!("Amount is too large");
    }
    Ok(amount)
}

pub fn parse_date(s: &str, clock: &dyn Clock) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {trimmed} (expected YYYY-MM-DD)"))?;
    if date > clock.today() {
        anyhow::bail!("Date cannot be in the future");
    }
    Ok(date)
}

/// Match a category against the pick list, canonicalizing case.
/// `None` or blank means the store will assign the default.
pub fn parse_category(s: Option<&str>) -> Result<Option<String>> {
    let Some(s) = s else {
        return Ok(None);
    };
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let canonical = CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .with_context(|| {
            format!(
                "Unknown category: {trimmed}. Use: {}",
                CATEGORIES.join(", ")
            )
        })?;
    Ok(Some((*canonical).to_string()))
}

/// Assemble a draft from raw form fields, applying every boundary check.
pub fn parse_draft(
    kind: Option<&str>,
    amount: &str,
    description: &str,
    date: &str,
    category: Option<&str>,
    clock: &dyn Clock,
) -> Result<TransactionDraft> {
    let description = description.trim();
    if description.is_empty() {
        anyhow::bail!("Description is required");
    }
    Ok(TransactionDraft {
        kind: parse_kind(kind)?,
        amount: parse_amount(amount)?,
        description: description.to_string(),
        date: parse_date(date, clock)?,
        category: parse_category(category)?,
    })
}
