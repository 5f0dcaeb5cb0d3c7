pub mod date;
pub mod parse;
pub mod stats;

use chrono::NaiveDate;

pub use parse::{load_expenses, parse_expenses};

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn month_key(&self) -> String {
        date::month_key(&self.date)
    }
}
