use std::path::Path;

use tracing::debug;

use crate::calculator::{Accumulator, CalcStep, parse_step};
use crate::config::PennyConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CalcData, CalcStepResult, StepError};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct CalcRunOptions<'a> {
    pub steps: Vec<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(steps: Vec<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(CalcRunOptions {
        steps,
        home_override: None,
    })
}

/// Runs every step against one accumulator. Steps are all parsed before the
/// log is touched; a division by zero is recorded on its step and the run
/// continues with the total unchanged.
#[doc(hidden)]
pub fn run_with_options(options: CalcRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.steps.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Provide at least one calculation step, for example `add 1 5`.",
            Some("calc"),
        ));
    }

    let parsed = options
        .steps
        .iter()
        .map(|step| parse_step(step))
        .collect::<ClientResult<Vec<CalcStep>>>()?;

    let config = PennyConfig::resolve(options.home_override)?;
    let mut accumulator = Accumulator::open(&config)?;
    let log_status = accumulator.log_status();

    let mut results = Vec::with_capacity(parsed.len());
    for (raw, step) in options.steps.iter().zip(parsed) {
        let outcome = accumulator.apply(step.operation, &step.operands);
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) if error.code == "division_by_zero" => (
                None,
                Some(StepError {
                    code: error.code,
                    message: error.message,
                }),
            ),
            Err(error) => return Err(error),
        };

        results.push(CalcStepResult {
            step: raw.trim().to_string(),
            operation: step.operation.command_name().to_string(),
            operands: step.operands,
            result,
            error,
        });
    }

    let failed_steps = results.iter().filter(|row| row.error.is_some()).count();
    debug!(
        steps = results.len(),
        failed_steps,
        total = accumulator.total(),
        "calc run finished"
    );

    let data = CalcData {
        log_path: config.log_path.display().to_string(),
        log_status: log_status.as_str().to_string(),
        steps: results,
        total: accumulator.total(),
        failed_steps,
    };

    success("calc", data)
}
