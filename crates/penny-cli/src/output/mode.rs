use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    if command.json() {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

/// Used when clap rejects the arguments and no `Commands` value exists.
pub fn infer_requested_output_mode(raw_args: &[String]) -> OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
