use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::expenses::Transaction;
use crate::expenses::date::parse_transaction_date;
use crate::{ClientError, ClientResult};

pub const REQUIRED_HEADERS: [&str; 4] = ["Date", "Amount", "Category", "Description"];

pub fn load_expenses(path: &Path) -> ClientResult<Vec<Transaction>> {
    let content = fs::read_to_string(path).map_err(|error| {
        if error.kind() == ErrorKind::NotFound {
            ClientError::source_not_found(path)
        } else {
            ClientError::source_unreadable(path, &error.to_string())
        }
    })?;

    let transactions = parse_expenses(&content)?;
    debug!(
        path = %path.display(),
        rows = transactions.len(),
        "loaded expenses"
    );
    Ok(transactions)
}

/// Parses CSV with a `Date,Amount,Category,Description` header. Header order is
/// free and unknown columns are ignored. Any bad row fails the whole load.
pub fn parse_expenses(content: &str) -> ClientResult<Vec<Transaction>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            ClientError::format_error("CSV header row is missing or unreadable.", None, None)
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let missing = REQUIRED_HEADERS
        .iter()
        .filter(|name| !index_by_name.contains_key(**name))
        .copied()
        .collect::<Vec<&str>>();
    if !missing.is_empty() {
        return Err(ClientError::format_error(
            &format!("CSV header is missing required columns: {}.", missing.join(", ")),
            None,
            None,
        )
        .with_data(serde_json::json!({
            "row": null,
            "field": null,
            "missing_headers": missing,
            "actual_headers": headers,
        })));
    }

    let mut transactions = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let row = row_index + 1;
        let record = result_row.map_err(|_| {
            ClientError::format_error(
                &format!("Row {row} is malformed or not UTF-8."),
                Some(row),
                None,
            )
        })?;

        let raw_date = value_for(&record, &index_by_name, "Date");
        let Some(date) = parse_transaction_date(raw_date.trim()) else {
            return Err(ClientError::format_error(
                &format!("Row {row}: date `{raw_date}` does not match YYYY-MM-DD."),
                Some(row),
                Some("Date"),
            ));
        };

        let raw_amount = value_for(&record, &index_by_name, "Amount");
        let amount = raw_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite());
        let Some(amount) = amount else {
            return Err(ClientError::format_error(
                &format!("Row {row}: amount `{raw_amount}` is not a number."),
                Some(row),
                Some("Amount"),
            ));
        };

        transactions.push(Transaction {
            date,
            amount,
            category: value_for(&record, &index_by_name, "Category").to_string(),
            description: value_for(&record, &index_by_name, "Description").to_string(),
        });
    }

    Ok(transactions)
}

fn value_for<'a>(
    record: &'a csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> &'a str {
    index_by_name
        .get(field_name)
        .and_then(|index| record.get(*index))
        .unwrap_or("")
}
