use serde::{Deserialize, Serialize};

use super::streak::StreakRecord;

pub const UNKNOWN_GAMER: &str = "Unknown - No Such Gamer";

/// Result of parsing one streak page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPage {
    pub gamertag: String,
    pub streaks: Vec<StreakRecord>,
    pub skipped_rows: usize,
}

impl ParsedPage {
    pub fn unknown() -> Self {
        Self {
            gamertag: UNKNOWN_GAMER.to_string(),
            streaks: Vec::new(),
            skipped_rows: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.gamertag == UNKNOWN_GAMER && self.streaks.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    AchievementCount,
    Length,
    AveragePerDay,
    WeightedAverage,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 4] = [
        RankingMetric::AchievementCount,
        RankingMetric::Length,
        RankingMetric::AveragePerDay,
        RankingMetric::WeightedAverage,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RankingMetric::AchievementCount => "Most achievements",
            RankingMetric::Length => "Longest streaks",
            RankingMetric::AveragePerDay => "Best average per day",
            RankingMetric::WeightedAverage => "Best weighted average",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub identifier: String,
    pub homepage: String,
    pub best_by_count: Vec<StreakRecord>,
    pub best_by_length: Vec<StreakRecord>,
    pub best_by_average: Vec<StreakRecord>,
    pub best_by_weighted: Vec<StreakRecord>,
}

impl PlayerRanking {
    pub fn best_by(&self, metric: RankingMetric) -> &[StreakRecord] {
        match metric {
            RankingMetric::AchievementCount => &self.best_by_count,
            RankingMetric::Length => &self.best_by_length,
            RankingMetric::AveragePerDay => &self.best_by_average,
            RankingMetric::WeightedAverage => &self.best_by_weighted,
        }
    }
}

/// Two gamers ranked side by side, ready for the report renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub first: PlayerRanking,
    pub second: PlayerRanking,
    pub num_to_display: usize,
}
