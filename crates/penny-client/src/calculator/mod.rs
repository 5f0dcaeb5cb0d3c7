pub mod log;

use tracing::debug;

use crate::config::PennyConfig;
use crate::{ClientError, ClientResult};

pub use log::{
    CalculationHistory, CalculationLogEntry, CsvResultLog, LogStatus, ResultLog, read_history,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Name used in the `Result for <name>:` log label.
    pub const fn log_name(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" => Some(Self::Add),
            "subtract" | "subtraction" => Some(Self::Subtract),
            "multiply" | "multiplication" => Some(Self::Multiply),
            "divide" | "division" => Some(Self::Divide),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcStep {
    pub operation: Operation,
    pub operands: Vec<f64>,
}

/// Parses one step such as `multiply 2 4 7` or `add 1,5`.
pub fn parse_step(step: &str) -> ClientResult<CalcStep> {
    let Some(tokens) = shlex::split(step) else {
        return Err(ClientError::invalid_argument_for_command(
            &format!("Step `{step}` has unbalanced quotes."),
            Some("calc"),
        ));
    };

    let mut tokens = tokens.into_iter();
    let Some(name) = tokens.next() else {
        return Err(ClientError::invalid_argument_for_command(
            "Empty calculation step.",
            Some("calc"),
        ));
    };
    let Some(operation) = Operation::parse(&name) else {
        return Err(ClientError::invalid_argument_for_command(
            &format!("Unknown operation `{name}`. Use add, subtract, multiply or divide."),
            Some("calc"),
        ));
    };

    // Commas and whitespace both separate operands, but every comma needs a
    // number on each side: `1, 5` is fine, `1,,5` and `1,` are not.
    let operand_text = tokens.collect::<Vec<String>>().join(" ");
    let mut operands = Vec::new();
    if !operand_text.trim().is_empty() {
        for group in operand_text.split(',') {
            let mut pieces = group.split_whitespace().peekable();
            if pieces.peek().is_none() {
                return Err(ClientError::invalid_argument_for_command(
                    &format!("Step `{step}` has a comma with no operand beside it."),
                    Some("calc"),
                ));
            }
            for piece in pieces {
                let value = piece.parse::<f64>().ok().filter(|value| value.is_finite());
                let Some(operand) = value else {
                    return Err(ClientError::invalid_argument_for_command(
                        &format!("Operand `{piece}` in step `{step}` is not a finite number."),
                        Some("calc"),
                    ));
                };
                operands.push(operand);
            }
        }
    }

    if operands.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{}` needs at least one operand.", operation.command_name()),
            Some("calc"),
        ));
    }

    Ok(CalcStep {
        operation,
        operands,
    })
}

/// Running total whose every successful operation is recorded in a [`ResultLog`].
#[derive(Debug)]
pub struct Accumulator<L: ResultLog = CsvResultLog> {
    total: f64,
    log: L,
}

impl Accumulator<CsvResultLog> {
    pub fn open(config: &PennyConfig) -> ClientResult<Self> {
        let log = CsvResultLog::open(&config.log_path)?;
        Ok(Self::with_log(log))
    }

    pub fn log_status(&self) -> LogStatus {
        self.log.status()
    }
}

impl<L: ResultLog> Accumulator<L> {
    pub fn with_log(log: L) -> Self {
        Self::starting_at(0.0, log)
    }

    pub fn starting_at(total: f64, log: L) -> Self {
        Self { total, log }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    pub fn add(&mut self, values: &[f64]) -> ClientResult<f64> {
        self.apply(Operation::Add, values)
    }

    pub fn subtract(&mut self, values: &[f64]) -> ClientResult<f64> {
        self.apply(Operation::Subtract, values)
    }

    /// A zero total counts as untouched and restarts from 1 before multiplying.
    pub fn multiply(&mut self, values: &[f64]) -> ClientResult<f64> {
        self.apply(Operation::Multiply, values)
    }

    /// Rejects the whole list if any operand is zero; the total is untouched.
    pub fn divide(&mut self, values: &[f64]) -> ClientResult<f64> {
        self.apply(Operation::Divide, values)
    }

    pub fn apply(&mut self, operation: Operation, values: &[f64]) -> ClientResult<f64> {
        if values.is_empty() {
            return Err(ClientError::invalid_argument(&format!(
                "`{}` needs at least one operand.",
                operation.command_name()
            )));
        }

        let next = match operation {
            Operation::Add => values.iter().fold(self.total, |total, value| total + value),
            Operation::Subtract => values.iter().fold(self.total, |total, value| total - value),
            Operation::Multiply => {
                let start = if self.total == 0.0 { 1.0 } else { self.total };
                values.iter().fold(start, |total, value| total * value)
            }
            Operation::Divide => {
                if values.iter().any(|value| *value == 0.0) {
                    debug!(operands = ?values, "rejected division by zero");
                    return Err(ClientError::division_by_zero(values));
                }
                values.iter().fold(self.total, |total, value| total / value)
            }
        };

        self.log.record(&CalculationLogEntry {
            label: log::result_label(operation.log_name()),
            value: next,
        })?;
        debug!(
            operation = operation.command_name(),
            total = next,
            "applied calculation"
        );
        self.total = next;
        Ok(next)
    }
}
