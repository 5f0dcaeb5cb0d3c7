pub mod budget;
pub mod calc;
pub mod common;
pub mod history;
pub mod report;
