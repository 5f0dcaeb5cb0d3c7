use std::ffi::OsString;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let shaped = value.len() == 10
        && value
            .bytes()
            .enumerate()
            .all(|(index, byte)| match index {
                4 | 7 => byte == b'-',
                _ => byte.is_ascii_digit(),
            });
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_amount(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err("amount must be a finite number, for example 3000 or 2500.50".to_string()),
    }
}

pub const CALC_AFTER_HELP: &str = "\
Steps:
  Each step is one quoted argument: an operation followed by numbers.
  Numbers may be separated by spaces or commas.

  Operations:
    add        adds every number to the running total
    subtract   subtracts every number from the running total
    multiply   multiplies the running total by every number
               (a total of 0 is treated as 1 first)
    divide     divides the running total by every number

  The running total starts at 0 for each invocation.

Example:
  penny calc \"add 1 5\" \"subtract 3 13\" \"multiply 2 4 7\" \"divide 2\"

Log:
  Every result is appended to calculations.csv in the penny home
  ($PENNY_HOME, or ~/.penny). Run `penny history` to read it back.
";

pub const REPORT_AFTER_HELP: &str = "\
Source format:
  A CSV file with this header (column order is free, extra columns are ignored):
    Date,Amount,Category,Description
    2024-01-15,25.99,Food,Lunch

  Dates use YYYY-MM-DD. PATH defaults to ./expenses.csv.
";

pub const BUDGET_AFTER_HELP: &str = "\
Each month with spending is checked against income minus the savings target.
Defaults: --income 3000, --savings 500. PATH defaults to ./expenses.csv.
";

#[derive(Debug, Parser)]
#[command(
    name = "penny",
    version,
    about = "Running-total calculator and expense reports",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply calculation steps to a running total and log each result
    #[command(after_help = CALC_AFTER_HELP)]
    Calc {
        #[arg(required = true, value_name = "STEP")]
        steps: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the calculation log
    History {
        #[arg(long)]
        json: bool,
    },
    /// Summarize spending in an expense file
    #[command(after_help = REPORT_AFTER_HELP)]
    Report {
        #[arg(value_name = "PATH")]
        path: Option<String>,
        #[arg(long, value_parser = parse_iso_date)]
        from: Option<IsoDate>,
        #[arg(long, value_parser = parse_iso_date)]
        to: Option<IsoDate>,
        #[arg(long)]
        json: bool,
    },
    /// Check each month's spending against income and a savings target
    #[command(after_help = BUDGET_AFTER_HELP)]
    Budget {
        #[arg(value_name = "PATH")]
        path: Option<String>,
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        income: Option<f64>,
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        savings: Option<f64>,
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn json(&self) -> bool {
        match self {
            Commands::Calc { json, .. }
            | Commands::History { json }
            | Commands::Report { json, .. }
            | Commands::Budget { json, .. } => *json,
        }
    }
}

pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_amount, parse_from, parse_iso_date};

    #[test]
    fn parse_calc_collects_every_step() {
        let parsed = parse_from(["penny", "calc", "add 1 5", "divide 2", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Calc { json: true, .. }));
            if let Commands::Calc { steps, .. } = cli.command {
                assert_eq!(steps, vec!["add 1 5".to_string(), "divide 2".to_string()]);
            }
        }
    }

    #[test]
    fn calc_without_steps_is_rejected() {
        let parsed = parse_from(["penny", "calc"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn parse_report_with_window() {
        let parsed = parse_from([
            "penny",
            "report",
            "spend.csv",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Report { json: false, .. }));
            if let Commands::Report { path, from, to, .. } = cli.command {
                assert_eq!(path.as_deref(), Some("spend.csv"));
                assert_eq!(from.as_ref().map(|value| value.as_str()), Some("2024-01-01"));
                assert_eq!(to.as_ref().map(|value| value.as_str()), Some("2024-01-31"));
            }
        }
    }

    #[test]
    fn invalid_report_date_is_rejected() {
        let parsed = parse_from(["penny", "report", "--from", "2024-02-30"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn parse_budget_amounts() {
        let parsed = parse_from(["penny", "budget", "--income", "4200.50", "--savings", "0"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Budget {
                    path: None,
                    income: Some(_),
                    savings: Some(_),
                    ..
                }
            ));
            if let Commands::Budget {
                income, savings, ..
            } = cli.command
            {
                assert_eq!(income, Some(4200.5));
                assert_eq!(savings, Some(0.0));
            }
        }
    }

    #[test]
    fn iso_date_parser_checks_shape_and_calendar() {
        assert!(parse_iso_date("2024-01-15").is_ok());
        assert!(parse_iso_date("2024-1-15").is_err());
        assert!(parse_iso_date("2023-02-29").is_err());
    }

    #[test]
    fn amount_parser_rejects_non_finite_values() {
        assert_eq!(parse_amount("3000"), Ok(3000.0));
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("lots").is_err());
    }

    #[test]
    fn json_flag_is_read_for_every_command() {
        let parsed = parse_from(["penny", "history", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(cli.command.json());
        }

        let parsed = parse_from(["penny", "budget"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(!cli.command.json());
        }
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["penny", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["penny", "calc", "--help"]);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.kind(), ErrorKind::DisplayHelp);
        }
    }
}
