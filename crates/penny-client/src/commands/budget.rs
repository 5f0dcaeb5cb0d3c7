use crate::ClientResult;
use crate::calculator::{Accumulator, CalculationLogEntry};
use crate::commands::common::ensure_finite;
use crate::config::resolve_source_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{BudgetData, BudgetMonth};
use crate::expenses::load_expenses;
use crate::expenses::stats::total_per_month;

pub const DEFAULT_MONTHLY_INCOME: f64 = 3000.0;
pub const DEFAULT_SAVINGS_TARGET: f64 = 500.0;

#[derive(Debug, Default)]
pub struct BudgetRunOptions {
    pub path: Option<String>,
    pub monthly_income: Option<f64>,
    pub savings_target: Option<f64>,
}

pub fn run(
    path: Option<String>,
    monthly_income: Option<f64>,
    savings_target: Option<f64>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(BudgetRunOptions {
        path,
        monthly_income,
        savings_target,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BudgetRunOptions) -> ClientResult<SuccessEnvelope> {
    let income = ensure_finite(
        options.monthly_income.unwrap_or(DEFAULT_MONTHLY_INCOME),
        "income",
        "budget",
    )?;
    let savings = ensure_finite(
        options.savings_target.unwrap_or(DEFAULT_SAVINGS_TARGET),
        "savings",
        "budget",
    )?;

    let source = resolve_source_path(options.path.as_deref())?;
    let transactions = load_expenses(&source)?;

    let mut months = Vec::new();
    for (month, spending) in total_per_month(&transactions) {
        months.push(budget_month(month, spending, income, savings)?);
    }
    let months_over_budget = months.iter().filter(|month| !month.within_budget).count();

    let data = BudgetData {
        path: source.display().to_string(),
        monthly_income: income,
        savings_target: savings,
        months,
        months_over_budget,
    };

    success("budget", data)
}

fn budget_month(
    month: String,
    spending: f64,
    income: f64,
    savings: f64,
) -> ClientResult<BudgetMonth> {
    // In-memory log: budget arithmetic is not calculator history.
    let mut accumulator = Accumulator::starting_at(income, Vec::<CalculationLogEntry>::new());
    accumulator.subtract(&[spending])?;
    let remaining = accumulator.subtract(&[savings])?;

    Ok(BudgetMonth {
        month,
        spending,
        remaining,
        within_budget: remaining >= 0.0,
    })
}
