use std::io;

use serde_json::Value;

use super::format::{
    Column, array_field, key_value_rows, render_table_or_blocks, terminal_width, text_field,
    total_field,
};

pub fn render_calc(data: &Value) -> io::Result<String> {
    let steps = array_field(data, "steps");
    let rows = steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let outcome = match step.get("error") {
                Some(error) => format!("skipped ({})", text_field(error, "code")),
                None => total_field(step, "result"),
            };
            vec![(index + 1).to_string(), text_field(step, "step"), outcome]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec!["Calculation".to_string(), String::new()];
    lines.extend(render_table_or_blocks(
        &[Column::right("#"), Column::left("Step"), Column::right("Total")],
        &rows,
        terminal_width(),
        "Step",
    ));
    lines.push(String::new());

    let log_line = format!(
        "{} ({})",
        text_field(data, "log_path"),
        text_field(data, "log_status")
    );
    lines.extend(key_value_rows(
        &[
            ("Final total:", total_field(data, "total")),
            ("Log:", log_line),
        ],
        2,
    ));

    let failed = data.get("failed_steps").and_then(Value::as_u64).unwrap_or(0);
    if failed > 0 {
        lines.push(String::new());
        lines.push(format!(
            "  {failed} step(s) were skipped and left the total unchanged."
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_history(data: &Value) -> io::Result<String> {
    let title = data
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("Calculation Results");

    let mut lines = vec![title.to_string(), String::new()];
    let mut summary = vec![("Log:", text_field(data, "log_path"))];
    if let Some(created_at) = data.get("created_at").and_then(Value::as_str) {
        summary.push(("Started:", created_at.to_string()));
    }
    lines.extend(key_value_rows(&summary, 2));
    lines.push(String::new());

    let entries = array_field(data, "entries");
    if entries.is_empty() {
        lines.push("  No results have been logged yet.".to_string());
        return Ok(lines.join("\n"));
    }

    let rows = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            vec![
                (index + 1).to_string(),
                text_field(entry, "label"),
                total_field(entry, "value"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table_or_blocks(
        &[Column::right("#"), Column::left("Entry"), Column::right("Value")],
        &rows,
        terminal_width(),
        "Entry",
    ));

    Ok(lines.join("\n"))
}
