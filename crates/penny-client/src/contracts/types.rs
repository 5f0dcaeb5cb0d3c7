use serde::{Serialize, Serializer};

use crate::calculator::CalculationLogEntry;
use crate::expenses::stats::{CategoryBreakdown, CategoryCount, DailySpending, MonthTotal};

/// Running totals can overflow to infinity from finite operands. JSON has no
/// number for that, so non-finite values go out as `"inf"`, `"-inf"` or `"NaN"`.
pub(crate) fn serialize_total<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.collect_str(value)
    }
}

fn serialize_optional_total<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(total) => serialize_total(total, serializer),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcStepResult {
    pub step: String,
    pub operation: String,
    pub operands: Vec<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_total"
    )]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StepError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalcData {
    pub log_path: String,
    pub log_status: String,
    pub steps: Vec<CalcStepResult>,
    #[serde(serialize_with = "serialize_total")]
    pub total: f64,
    pub failed_steps: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryData {
    pub log_path: String,
    pub title: Option<String>,
    pub created_at: Option<String>,
    pub entries: Vec<CalculationLogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub path: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub count: usize,
    pub total_spent: f64,
    pub average_expense: f64,
    pub most_common_category: Option<CategoryCount>,
    pub total_per_month: Vec<MonthTotal>,
    pub most_expensive_month: Option<MonthTotal>,
    pub categories: Vec<CategoryBreakdown>,
    pub daily: Option<DailySpending>,
    pub transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetMonth {
    pub month: String,
    pub spending: f64,
    pub remaining: f64,
    pub within_budget: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetData {
    pub path: String,
    pub monthly_income: f64,
    pub savings_target: f64,
    pub months: Vec<BudgetMonth>,
    pub months_over_budget: usize,
}
