pub mod models;
pub mod config;
pub mod parsing;
pub mod ranking;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod api;

pub use models::{StreakRecord, PlayerRanking, Comparison, ParsedPage, StreakError, Result};
pub use config::{Settings, Qualification, RowPolicy};
pub use parsing::PageParser;
pub use ranking::RankingBuilder;
pub use pipeline::Analyzer;
