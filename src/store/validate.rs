use rust_decimal::Decimal;

use crate::models::Transaction;

/// A transaction field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Amount,
    Description,
    Category,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Amount => "amount",
            Field::Description => "description",
            Field::Category => "category",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejection reason for an add or update, naming every offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transaction: {}", field_list(.fields))]
pub struct ValidationError {
    pub fields: Vec<Field>,
}

fn field_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check a complete transaction against the store's invariants.
///
/// Add runs this after assigning the id and default category; update runs it
/// on the caller's replacement object as-is, so a blank category rejects
/// there.
pub fn validate(tx: &Transaction) -> Result<(), ValidationError> {
    let mut fields = Vec::new();
    if tx.id.as_str().trim().is_empty() {
        fields.push(Field::Id);
    }
    if tx.amount <= Decimal::ZERO {
        fields.push(Field::Amount);
    }
    if tx.description.trim().is_empty() {
        fields.push(Field::Description);
    }
    if tx.category.trim().is_empty() {
        fields.push(Field::Category);
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Id, TransactionKind};
    use chrono::NaiveDate;

    fn valid_tx() -> Transaction {
        Transaction {
            id: Id::from_string("1"),
            kind: TransactionKind::Income,
            amount: Decimal::from(100),
            description: "Salary".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            category: "Salary".to_string(),
        }
    }

    #[test]
    fn valid_transaction_passes() {
        assert!(validate(&valid_tx()).is_ok());
    }

    #[test]
    fn zero_and_negative_amounts_reject() {
        let mut tx = valid_tx();
        tx.amount = Decimal::ZERO;
        assert_eq!(
            validate(&tx).unwrap_err().fields,
            vec![Field::Amount]
        );
        tx.amount = Decimal::from(-100);
        assert_eq!(
            validate(&tx).unwrap_err().fields,
            vec![Field::Amount]
        );
    }

    #[test]
    fn whitespace_only_text_fields_reject() {
        let mut tx = valid_tx();
        tx.description = "   ".to_string();
        tx.category = "\t".to_string();
        let err = validate(&tx).unwrap_err();
        assert_eq!(err.fields, vec![Field::Description, Field::Category]);
    }

    #[test]
    fn error_message_names_every_offending_field() {
        let mut tx = valid_tx();
        tx.id = Id::from_string("");
        tx.amount = Decimal::from(-1);
        let err = validate(&tx).unwrap_err();
        assert_eq!(err.to_string(), "invalid transaction: id, amount");
    }
}
