mod id;
mod transaction;

pub use id::{FixedIdGenerator, Id, IdGenerator, UuidIdGenerator};
pub use transaction::{Transaction, TransactionDraft, TransactionKind, DEFAULT_CATEGORY};
