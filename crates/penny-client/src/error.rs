use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const SOURCE_TEMPLATE_HEADER: &str = "Date,Amount,Category,Description";
pub(crate) const SOURCE_TEMPLATE_ROW: &str = "2024-01-15,25.99,Food,Lunch";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "calc_log_init_failed" | "calc_log_write_failed" | "calc_log_permission_denied"
            )
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `penny {cmd} --help` for usage."),
            None => "Run `penny --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn division_by_zero(operands: &[f64]) -> Self {
        Self::new(
            "division_by_zero",
            "Cannot divide by zero. The running total was left unchanged.",
            vec!["Remove the zero operand and retry the division.".to_string()],
        )
        .with_data(json!({
            "operands": operands,
        }))
    }

    pub fn source_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_not_found",
            &format!("Expense file `{location}` was not found."),
            vec![
                format!("Create `{location}` with a header row and one expense per row:"),
                SOURCE_TEMPLATE_HEADER.to_string(),
                SOURCE_TEMPLATE_ROW.to_string(),
                "Or pass the path of an existing expense file.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
            "template": {
                "header": SOURCE_TEMPLATE_HEADER,
                "example_row": SOURCE_TEMPLATE_ROW,
            },
        }))
    }

    pub fn source_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_unreadable",
            &format!("Could not read expense file `{location}`: {detail}"),
            vec!["Verify the path is a readable file.".to_string()],
        )
    }

    pub fn format_error(message: &str, row: Option<usize>, field: Option<&str>) -> Self {
        Self::new(
            "format_error",
            message,
            vec![
                "Check that dates use YYYY-MM-DD format.".to_string(),
                "Check that amounts are valid numbers.".to_string(),
                format!("Expected header row: {SOURCE_TEMPLATE_HEADER}"),
            ],
        )
        .with_data(json!({
            "row": row,
            "field": field,
        }))
    }

    pub fn calc_log_not_found(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "calc_log_not_found",
            &format!("No calculation history found at `{location}`."),
            vec!["Run `penny calc \"add 1 2\"` to record a first result.".to_string()],
        )
    }

    pub fn calc_log_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "calc_log_permission_denied",
            &format!("Cannot write calculation log at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `PENNY_HOME` to a writable directory."
            )],
        )
    }

    pub fn calc_log_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "calc_log_init_failed",
            &format!("Calculation log initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn calc_log_write_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "calc_log_write_failed",
            &format!("Could not append to calculation log at `{location}`: {detail}"),
            vec!["The running total was left unchanged; retry the operation.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
