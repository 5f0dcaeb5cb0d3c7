use crate::contracts::types::TransactionRow;
use crate::expenses::Transaction;
use crate::expenses::date::format_iso_date;
use crate::{ClientError, ClientResult};

pub(crate) fn transaction_rows(transactions: &[Transaction]) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|txn| TransactionRow {
            date: format_iso_date(&txn.date),
            amount: txn.amount,
            category: txn.category.clone(),
            description: txn.description.clone(),
        })
        .collect()
}

pub(crate) fn ensure_finite(value: f64, field_name: &str, command: &str) -> ClientResult<f64> {
    if !value.is_finite() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must be a finite number."),
            Some(command),
        ));
    }
    Ok(value)
}
