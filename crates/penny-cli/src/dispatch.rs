use penny_client::commands;
use penny_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Calc { steps, .. } => commands::calc::run(steps.clone()),
        Commands::History { .. } => commands::history::run(),
        Commands::Report { path, from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::report::run(path.clone(), from_value, to_value)
        }
        Commands::Budget {
            path,
            income,
            savings,
            ..
        } => commands::budget::run(path.clone(), *income, *savings),
    }
}
