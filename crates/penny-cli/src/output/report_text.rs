use std::io;

use serde_json::Value;

use super::format::{
    Column, array_field, key_value_rows, money, number_field, render_table_or_blocks,
    terminal_width, text_field,
};

pub fn render_report(data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("Expense report: {}", text_field(data, "path"))];
    if let Some(window) = window_label(data) {
        lines.push(format!("  Window:  {window}"));
    }
    lines.push(String::new());

    let count = data.get("count").and_then(Value::as_u64).unwrap_or(0);
    if count == 0 {
        lines.push("  No expenses found.".to_string());
        return Ok(lines.join("\n"));
    }

    let most_common = data
        .get("most_common_category")
        .filter(|value| !value.is_null())
        .map(|value| {
            let occurrences = value.get("count").and_then(Value::as_u64).unwrap_or(0);
            format!("{} ({occurrences})", text_field(value, "category"))
        })
        .unwrap_or_else(|| "-".to_string());
    let most_expensive = data
        .get("most_expensive_month")
        .filter(|value| !value.is_null())
        .map(|value| {
            format!(
                "{} ({})",
                text_field(value, "month"),
                money(number_field(value, "total"))
            )
        })
        .unwrap_or_else(|| "-".to_string());

    let mut summary = vec![
        ("Expenses:", count.to_string()),
        ("Total spent:", money(number_field(data, "total_spent"))),
        ("Average expense:", money(number_field(data, "average_expense"))),
        ("Most common category:", most_common),
        ("Most expensive month:", most_expensive),
    ];
    if let Some(daily) = data.get("daily").filter(|value| !value.is_null()) {
        summary.push(("Highest day:", day_label(daily.get("highest"))));
        summary.push(("Lowest day:", day_label(daily.get("lowest"))));
        summary.push(("Average per day:", money(number_field(daily, "average_daily"))));
    }
    lines.extend(key_value_rows(&summary, 2));

    let month_rows = array_field(data, "total_per_month")
        .iter()
        .map(|row| {
            vec![
                text_field(row, "month"),
                money(number_field(row, "total")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.push(String::new());
    lines.push("Monthly totals".to_string());
    lines.extend(render_table_or_blocks(
        &[Column::left("Month"), Column::right("Total")],
        &month_rows,
        terminal_width(),
        "Month",
    ));

    let category_rows = array_field(data, "categories")
        .iter()
        .map(|row| {
            vec![
                text_field(row, "category"),
                row.get("count")
                    .and_then(Value::as_u64)
                    .unwrap_or(0)
                    .to_string(),
                money(number_field(row, "total")),
                money(number_field(row, "average")),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.push(String::new());
    lines.push("Categories".to_string());
    lines.extend(render_table_or_blocks(
        &[
            Column::left("Category"),
            Column::right("Count"),
            Column::right("Total"),
            Column::right("Average"),
        ],
        &category_rows,
        terminal_width(),
        "Category",
    ));

    Ok(lines.join("\n"))
}

pub fn render_budget(data: &Value) -> io::Result<String> {
    let mut lines = vec![
        format!("Budget: {}", text_field(data, "path")),
        String::new(),
    ];

    let over = data
        .get("months_over_budget")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    lines.extend(key_value_rows(
        &[
            ("Monthly income:", money(number_field(data, "monthly_income"))),
            ("Savings target:", money(number_field(data, "savings_target"))),
            ("Months over budget:", over.to_string()),
        ],
        2,
    ));
    lines.push(String::new());

    let months = array_field(data, "months");
    if months.is_empty() {
        lines.push("  No spending found.".to_string());
        return Ok(lines.join("\n"));
    }

    let rows = months
        .iter()
        .map(|row| {
            let within = row
                .get("within_budget")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            vec![
                text_field(row, "month"),
                money(number_field(row, "spending")),
                money(number_field(row, "remaining")),
                if within { "ok" } else { "over budget" }.to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table_or_blocks(
        &[
            Column::left("Month"),
            Column::right("Spending"),
            Column::right("Remaining"),
            Column::left("Status"),
        ],
        &rows,
        terminal_width(),
        "Month",
    ));

    Ok(lines.join("\n"))
}

fn window_label(data: &Value) -> Option<String> {
    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);
    match (from, to) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(format!("{start} to {end}")),
        (Some(start), None) => Some(format!("from {start}")),
        (None, Some(end)) => Some(format!("through {end}")),
    }
}

fn day_label(day: Option<&Value>) -> String {
    match day {
        Some(value) => format!(
            "{} ({})",
            text_field(value, "date"),
            money(number_field(value, "total"))
        ),
        None => "-".to_string(),
    }
}
