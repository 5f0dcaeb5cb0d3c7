use std::fs;
use std::path::{Path, PathBuf};

use penny_client::SuccessEnvelope;
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub const REFERENCE_EXPENSES: &str = "Date,Amount,Category,Description
2024-01-15,25.99,Food,Lunch
2024-01-20,10.00,Food,Snack
2024-02-01,50.00,Transport,Taxi
";

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("penny-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_fixture(base: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn payload(result: penny_client::ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(json) = value {
            return json;
        }
    }
    Value::Null
}

pub fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|actual| (actual - expected).abs() < 1e-9)
}

pub fn steps(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
