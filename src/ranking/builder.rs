use crate::{
    config::{Qualification, SiteSettings},
    models::{PlayerRanking, RankingMetric, StreakRecord},
};
use url::form_urlencoded;

pub struct RankingBuilder {
    rules: Qualification,
    origin: String,
}

impl RankingBuilder {
    pub fn new(rules: Qualification, site: &SiteSettings) -> Self {
        Self {
            rules,
            origin: site.origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn build(&self, identifier: &str, streaks: &[StreakRecord], num_to_display: usize) -> PlayerRanking {
        PlayerRanking {
            identifier: identifier.to_string(),
            homepage: self.homepage(identifier),
            best_by_count: self.top_n(streaks, RankingMetric::AchievementCount, num_to_display),
            best_by_length: self.top_n(streaks, RankingMetric::Length, num_to_display),
            best_by_average: self.top_n(streaks, RankingMetric::AveragePerDay, num_to_display),
            best_by_weighted: self.top_n(streaks, RankingMetric::WeightedAverage, num_to_display),
        }
    }

    pub fn homepage(&self, identifier: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(identifier.as_bytes()).collect();
        format!("{}/gamer/{}", self.origin, encoded)
    }

    pub fn metric_value(&self, streak: &StreakRecord, metric: RankingMetric) -> f64 {
        match metric {
            RankingMetric::AchievementCount => f64::from(streak.achievement_count),
            RankingMetric::Length => f64::from(streak.length),
            RankingMetric::AveragePerDay => streak.average_per_day(),
            RankingMetric::WeightedAverage => streak.weighted_average(&self.rules),
        }
    }

    /// Highest `n` streaks by `metric`. `sort_by` is stable, so equal values
    /// keep their document order.
    pub fn top_n(&self, streaks: &[StreakRecord], metric: RankingMetric, n: usize) -> Vec<StreakRecord> {
        let mut ranked: Vec<&StreakRecord> = streaks.iter().collect();
        ranked.sort_by(|a, b| {
            self.metric_value(b, metric)
                .total_cmp(&self.metric_value(a, metric))
        });

        ranked.into_iter().take(n).cloned().collect()
    }
}
