use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::expenses::Transaction;
use crate::expenses::date::{DateFilter, format_iso_date};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: usize,
    pub total: f64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpending {
    pub highest: DayTotal,
    pub lowest: DayTotal,
    pub average_daily: f64,
}

pub fn count(transactions: &[Transaction]) -> usize {
    transactions.len()
}

pub fn total_spent(transactions: &[Transaction]) -> f64 {
    transactions.iter().fold(0.0, |total, txn| total + txn.amount)
}

pub fn average_expense(transactions: &[Transaction]) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }
    total_spent(transactions) / transactions.len() as f64
}

/// Most frequent category. On a tie the category that reached the maximum
/// count first, in record order, wins.
pub fn most_common_category(transactions: &[Transaction]) -> Option<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut best: Option<(&str, usize)> = None;

    for txn in transactions {
        let entry = counts.entry(txn.category.as_str()).or_insert(0);
        *entry += 1;
        let current = *entry;
        if best.is_none_or(|(_, best_count)| current > best_count) {
            best = Some((txn.category.as_str(), current));
        }
    }

    best.map(|(category, count)| CategoryCount {
        category: category.to_string(),
        count,
    })
}

pub fn total_per_month(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for txn in transactions {
        *totals.entry(txn.month_key()).or_insert(0.0) += txn.amount;
    }
    totals
}

/// Month with the largest total; ties go to the earliest month key.
pub fn most_expensive_month(month_totals: &BTreeMap<String, f64>) -> Option<MonthTotal> {
    let mut best: Option<(&String, f64)> = None;
    for (month, total) in month_totals {
        if best.is_none_or(|(_, best_total)| *total > best_total) {
            best = Some((month, *total));
        }
    }

    best.map(|(month, total)| MonthTotal {
        month: month.clone(),
        total,
    })
}

pub fn month_total_rows(month_totals: &BTreeMap<String, f64>) -> Vec<MonthTotal> {
    month_totals
        .iter()
        .map(|(month, total)| MonthTotal {
            month: month.clone(),
            total: *total,
        })
        .collect()
}

/// Per-category count, total and average, largest total first.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryBreakdown> {
    let mut grouped: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for txn in transactions {
        let entry = grouped.entry(txn.category.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += txn.amount;
    }

    let mut rows = grouped
        .into_iter()
        .map(|(category, (count, total))| CategoryBreakdown {
            category: category.to_string(),
            count,
            total,
            average: total / count as f64,
        })
        .collect::<Vec<CategoryBreakdown>>();

    rows.sort_by(|left, right| {
        right
            .total
            .partial_cmp(&left.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| left.category.cmp(&right.category))
    });
    rows
}

pub fn daily_spending(transactions: &[Transaction]) -> Option<DailySpending> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for txn in transactions {
        *per_day.entry(txn.date).or_insert(0.0) += txn.amount;
    }

    let mut highest: Option<(NaiveDate, f64)> = None;
    let mut lowest: Option<(NaiveDate, f64)> = None;
    for (date, total) in &per_day {
        if highest.is_none_or(|(_, value)| *total > value) {
            highest = Some((*date, *total));
        }
        if lowest.is_none_or(|(_, value)| *total < value) {
            lowest = Some((*date, *total));
        }
    }

    let (Some(high), Some(low)) = (highest, lowest) else {
        return None;
    };
    let days_total = per_day.values().fold(0.0, |sum, total| sum + total);
    let average_daily = days_total / per_day.len() as f64;

    Some(DailySpending {
        highest: day_total(high),
        lowest: day_total(low),
        average_daily,
    })
}

pub fn filter_by_date(transactions: &[Transaction], filter: &DateFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| filter.contains(txn.date))
        .cloned()
        .collect()
}

fn day_total((date, total): (NaiveDate, f64)) -> DayTotal {
    DayTotal {
        date: format_iso_date(&date),
        total,
    }
}
