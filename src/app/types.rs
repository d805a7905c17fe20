use serde::Serialize;

/// JSON output for transactions
#[derive(Serialize)]
pub struct TransactionOutput {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub amount_display: String,
    pub description: String,
    pub date: String,
    pub category: String,
}

/// JSON output for one category's totals
#[derive(Serialize)]
pub struct CategoryTotalOutput {
    pub category: String,
    pub total: String,
    pub transaction_count: usize,
}

/// JSON output for the summary view
#[derive(Serialize)]
pub struct SummaryOutput {
    pub total_income: String,
    pub total_expense: String,
    pub total_balance: String,
    pub transaction_count: usize,
    pub by_category: Vec<CategoryTotalOutput>,
    pub income_by_category: Vec<CategoryTotalOutput>,
    pub expense_by_category: Vec<CategoryTotalOutput>,
}

/// JSON output for the filtered list view
#[derive(Serialize)]
pub struct ListOutput {
    pub income: Vec<TransactionOutput>,
    pub expense: Vec<TransactionOutput>,
    pub transaction_count: usize,
}
