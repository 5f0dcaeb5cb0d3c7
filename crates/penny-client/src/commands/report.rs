use tracing::info;

use crate::ClientResult;
use crate::commands::common::transaction_rows;
use crate::config::resolve_source_path;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportData;
use crate::expenses::date::{build_filter, format_iso_date};
use crate::expenses::load_expenses;
use crate::expenses::stats::{
    average_expense, category_breakdown, count, daily_spending, filter_by_date,
    month_total_rows, most_common_category, most_expensive_month, total_per_month, total_spent,
};

#[derive(Debug, Default)]
pub struct ReportRunOptions {
    pub path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn run(
    path: Option<String>,
    from: Option<&str>,
    to: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ReportRunOptions {
        path,
        from: from.map(std::string::ToString::to_string),
        to: to.map(std::string::ToString::to_string),
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ReportRunOptions) -> ClientResult<SuccessEnvelope> {
    let filter = build_filter(options.from.as_deref(), options.to.as_deref(), "report")?;
    let source = resolve_source_path(options.path.as_deref())?;

    let loaded = load_expenses(&source)?;
    let transactions = if filter.is_open() {
        loaded
    } else {
        filter_by_date(&loaded, &filter)
    };

    let month_totals = total_per_month(&transactions);
    let data = ReportData {
        path: source.display().to_string(),
        from: filter.from.as_ref().map(format_iso_date),
        to: filter.to.as_ref().map(format_iso_date),
        count: count(&transactions),
        total_spent: total_spent(&transactions),
        average_expense: average_expense(&transactions),
        most_common_category: most_common_category(&transactions),
        total_per_month: month_total_rows(&month_totals),
        most_expensive_month: most_expensive_month(&month_totals),
        categories: category_breakdown(&transactions),
        daily: daily_spending(&transactions),
        transactions: transaction_rows(&transactions),
    };
    info!(path = %source.display(), count = data.count, "expense report computed");

    success("report", data)
}
