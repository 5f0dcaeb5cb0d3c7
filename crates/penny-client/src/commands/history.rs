use std::path::Path;

use crate::ClientResult;
use crate::calculator::read_history;
use crate::config::PennyConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::HistoryData;

#[derive(Debug, Default)]
pub struct HistoryRunOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(HistoryRunOptions {
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: HistoryRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = PennyConfig::resolve(options.home_override)?;
    let history = read_history(&config.log_path)?;

    let data = HistoryData {
        log_path: config.log_path.display().to_string(),
        title: history.title,
        created_at: history.created_at,
        entries: history.entries,
    };

    success("history", data)
}
