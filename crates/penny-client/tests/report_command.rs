mod support;

use penny_client::commands::budget::{self, BudgetRunOptions};
use penny_client::commands::report::{self, ReportRunOptions};
use serde_json::Value;
use support::penny_testkit::{REFERENCE_EXPENSES, approx, payload, temp_home_in_tmp, write_fixture};

#[test]
fn report_computes_reference_statistics() {
    let temp = temp_home_in_tmp("penny-report-reference");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let fixture = write_fixture(dir.path(), "expenses.csv", REFERENCE_EXPENSES);
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let value = payload(report::run_with_options(ReportRunOptions {
                path: Some(path.display().to_string()),
                ..ReportRunOptions::default()
            }));
            let data = &value["data"];

            assert_eq!(value["command"], "report");
            assert_eq!(data["count"], 3);
            assert!(approx(&data["total_spent"], 85.99));
            assert!(approx(&data["average_expense"], 85.99 / 3.0));
            assert_eq!(data["most_common_category"]["category"], "Food");
            assert_eq!(data["most_common_category"]["count"], 2);

            let months = data["total_per_month"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            assert_eq!(months.len(), 2);
            assert_eq!(months[0]["month"], "2024-01");
            assert!(approx(&months[0]["total"], 35.99));
            assert_eq!(months[1]["month"], "2024-02");
            assert!(approx(&months[1]["total"], 50.0));

            assert_eq!(data["most_expensive_month"]["month"], "2024-02");
            assert!(approx(&data["most_expensive_month"]["total"], 50.0));

            let month_sum = months
                .iter()
                .filter_map(|row| row["total"].as_f64())
                .sum::<f64>();
            assert!(approx(&data["total_spent"], month_sum));

            assert_eq!(data["categories"][0]["category"], "Transport");
            assert_eq!(data["daily"]["highest"]["date"], "2024-02-01");
            assert_eq!(data["transactions"].as_array().map(Vec::len), Some(3));
        }
    }
}

#[test]
fn report_applies_inclusive_date_window() {
    let temp = temp_home_in_tmp("penny-report-window");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let fixture = write_fixture(dir.path(), "expenses.csv", REFERENCE_EXPENSES);
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let value = payload(report::run_with_options(ReportRunOptions {
                path: Some(path.display().to_string()),
                from: Some("2024-01-20".to_string()),
                to: Some("2024-01-31".to_string()),
            }));
            let data = &value["data"];
            assert_eq!(data["from"], "2024-01-20");
            assert_eq!(data["count"], 1);
            assert!(approx(&data["total_spent"], 10.0));
            assert_eq!(data["most_expensive_month"]["month"], "2024-01");
        }
    }
}

#[test]
fn report_on_empty_source_has_zero_average_and_no_leaders() {
    let temp = temp_home_in_tmp("penny-report-empty");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let fixture = write_fixture(
            dir.path(),
            "expenses.csv",
            "Date,Amount,Category,Description\n",
        );
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let value = payload(report::run_with_options(ReportRunOptions {
                path: Some(path.display().to_string()),
                ..ReportRunOptions::default()
            }));
            let data = &value["data"];
            assert_eq!(data["count"], 0);
            assert!(approx(&data["average_expense"], 0.0));
            assert_eq!(data["most_common_category"], Value::Null);
            assert_eq!(data["most_expensive_month"], Value::Null);
        }
    }
}

#[test]
fn missing_source_is_distinct_from_format_error() {
    let temp = temp_home_in_tmp("penny-report-errors");
    assert!(temp.is_ok());
    if let Ok((dir, _home)) = temp {
        let missing = report::run_with_options(ReportRunOptions {
            path: Some(dir.path().join("nope.csv").display().to_string()),
            ..ReportRunOptions::default()
        });
        assert!(missing.is_err());
        if let Err(error) = missing {
            assert_eq!(error.code, "source_not_found");
            assert!(
                error
                    .recovery_steps
                    .iter()
                    .any(|step| step == "2024-01-15,25.99,Food,Lunch")
            );
        }

        let fixture = write_fixture(
            dir.path(),
            "bad.csv",
            "Date,Amount,Category,Description\n2024-01-15,twelve,Food,Lunch\n",
        );
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let malformed = report::run_with_options(ReportRunOptions {
                path: Some(path.display().to_string()),
                ..ReportRunOptions::default()
            });
            assert!(malformed.is_err());
            if let Err(error) = malformed {
                assert_eq!(error.code, "format_error");
            }
        }
    }
}

#[test]
fn budget_subtracts_spending_and_savings_per_month() {
    let temp = temp_home_in_tmp("penny-budget");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let fixture = write_fixture(
            dir.path(),
            "expenses.csv",
            "Date,Amount,Category,Description\n\
             2024-01-03,2400.00,Rent,January rent\n\
             2024-01-09,200.00,Food,Groceries\n\
             2024-02-03,1200.00,Rent,February rent\n",
        );
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let value = payload(budget::run_with_options(BudgetRunOptions {
                path: Some(path.display().to_string()),
                ..BudgetRunOptions::default()
            }));
            let data = &value["data"];
            assert!(approx(&data["monthly_income"], 3000.0));
            assert!(approx(&data["savings_target"], 500.0));
            assert_eq!(data["months_over_budget"], 1);

            let months = data["months"].as_array().cloned().unwrap_or_default();
            assert_eq!(months.len(), 2);
            assert_eq!(months[0]["month"], "2024-01");
            assert!(approx(&months[0]["remaining"], -100.0));
            assert_eq!(months[0]["within_budget"], false);
            assert!(approx(&months[1]["remaining"], 1300.0));
            assert_eq!(months[1]["within_budget"], true);

            assert!(!home.join("calculations.csv").exists());
        }
    }
}

#[test]
fn budget_rejects_non_finite_income() {
    let temp = temp_home_in_tmp("penny-budget-income");
    assert!(temp.is_ok());
    if let Ok((_dir, _home)) = temp {
        let result = budget::run_with_options(BudgetRunOptions {
            monthly_income: Some(f64::NAN),
            ..BudgetRunOptions::default()
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}
