use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::display::DisplayValue;
use crate::config::Qualification;

pub const WEIGHTED_SENTINEL: f64 = -0.00001;
pub const FILTERED_SENTINEL: f64 = -0.000_001;

const DATE_FORMAT: &str = "%B %-d, %Y";

/// One achievement streak as listed on a gamer's streak page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub start_date: NaiveDate,
    pub length: u32,
    pub achievement_count: u32,
    /// Absolute link found in the date cell, if any.
    pub link: Option<String>,
}

impl StreakRecord {
    pub fn new(start_date: NaiveDate, length: u32, achievement_count: u32) -> Self {
        Self {
            start_date,
            length,
            achievement_count,
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(u64::from(self.length)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Achievements per day. Zero-length streaks report 0.0.
    pub fn average_per_day(&self) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        f64::from(self.achievement_count) / f64::from(self.length)
    }

    pub fn qualifies(&self, rules: &Qualification) -> bool {
        self.length > 0
            && self.length >= rules.min_length
            && self.achievement_count >= rules.min_count
    }

    pub fn weighted_average(&self, rules: &Qualification) -> f64 {
        if !self.qualifies(rules) {
            return WEIGHTED_SENTINEL;
        }
        (1.02 * f64::from(self.achievement_count)) / (f64::from(self.length) * 0.98)
    }

    pub fn filtered_average(&self, rules: &Qualification) -> f64 {
        if !self.qualifies(rules) {
            return FILTERED_SENTINEL;
        }
        self.average_per_day()
    }

    pub fn describe(&self, rules: &Qualification) -> String {
        let dates = format!(
            "{} to {}",
            self.start_date.format(DATE_FORMAT),
            self.end_date().format(DATE_FORMAT)
        );
        format!(
            "{:<40}: {} achievements in {} days (avg: {:.3} weighted: {:.3})",
            dates,
            DisplayValue::from(self.achievement_count),
            DisplayValue::from(self.length),
            self.average_per_day(),
            self.weighted_average(rules),
        )
    }
}

impl fmt::Display for StreakRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(&Qualification::default()))
    }
}
