use std::path::{Path, PathBuf};

use crate::state::{ensure_penny_directory, resolve_penny_home};
use crate::{ClientError, ClientResult};

pub const CALC_LOG_FILE_NAME: &str = "calculations.csv";
pub const DEFAULT_SOURCE_FILE_NAME: &str = "expenses.csv";

/// Resolved locations of the calculator's state.
///
/// Only `calc` and `history` build this value; tests resolve it against a
/// temporary home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PennyConfig {
    pub home: PathBuf,
    pub log_path: PathBuf,
}

impl PennyConfig {
    pub fn resolve(home_override: Option<&Path>) -> ClientResult<Self> {
        let home = resolve_penny_home(home_override)?;
        ensure_penny_directory(&home)?;

        Ok(Self {
            log_path: home.join(CALC_LOG_FILE_NAME),
            home,
        })
    }
}

/// Absolute path of the expense file for `report` and `budget`.
///
/// Reads only the working directory; the penny home is never resolved or
/// created here.
pub fn resolve_source_path(path: Option<&str>) -> ClientResult<PathBuf> {
    let candidate = Path::new(path.unwrap_or(DEFAULT_SOURCE_FILE_NAME));
    if candidate.is_absolute() {
        return Ok(candidate.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(candidate))
        .map_err(|error| ClientError::source_unreadable(candidate, &error.to_string()))
}
