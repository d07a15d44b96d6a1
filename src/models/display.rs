use serde::{Deserialize, Serialize};
use std::fmt;

/// A number as it appears in a report: whole counts get thousands
/// separators, fractional metrics get three decimals as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DisplayValue {
    Integer(i64),
    Fixed(f64),
}

impl From<u32> for DisplayValue {
    fn from(value: u32) -> Self {
        DisplayValue::Integer(i64::from(value))
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        DisplayValue::Fixed(value)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            DisplayValue::Integer(value) => value.to_string(),
            DisplayValue::Fixed(value) => format!("{value:.3}"),
        };
        f.write_str(&group_thousands(&raw))
    }
}

fn group_thousands(raw: &str) -> String {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (whole, fraction) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(raw.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped}{fraction}")
}
