pub mod calculator;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod expenses;
pub mod state;

pub use calculator::Accumulator;
pub use config::{PennyConfig, resolve_source_path};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
