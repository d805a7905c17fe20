//! CSV and JSON rendering of a transaction list.

use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use tokio::fs;

use crate::models::Transaction;

const CSV_HEADERS: [&str; 6] = ["ID", "Type", "Amount", "Description", "Date", "Category"];

/// Render the list as CSV, every field quoted, one row per transaction in
/// list order.
///
/// An empty list renders as the empty string, without even a header row.
pub fn to_csv(transactions: &[Transaction]) -> Result<String> {
    if transactions.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .context("Failed to write CSV header")?;
    for tx in transactions {
        let amount = tx.amount.to_string();
        let date = tx.date.to_string();
        writer
            .write_record([
                tx.id.as_str(),
                tx.kind.as_str(),
                amount.as_str(),
                tx.description.as_str(),
                date.as_str(),
                tx.category.as_str(),
            ])
            .context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Failed to finalize CSV export: {err}"))?;
    let mut out = String::from_utf8(bytes).context("CSV output was not valid UTF-8")?;
    // The writer terminates every record; the format has no trailing newline.
    while out.ends_with('\n') || out.ends_with('\r') {
        out.pop();
    }
    Ok(out)
}

/// Render the list as JSON with 2-space indentation. An empty list renders
/// as `[]`.
pub fn to_json(transactions: &[Transaction]) -> Result<String> {
    serde_json::to_string_pretty(transactions).context("Failed to serialize transactions")
}

/// Write exported content to a file, the CLI stand-in for the original
/// browser download.
pub async fn write_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .context("Failed to create export directory")?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
