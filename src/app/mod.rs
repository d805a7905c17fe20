mod mutations;
mod types;
mod views;

pub use mutations::{add_transaction, remove_transaction, update_transaction};
pub use types::{CategoryTotalOutput, ListOutput, SummaryOutput, TransactionOutput};
pub use views::{list_transactions, parse_range, summary_output, transaction_output};
