pub mod builder;

pub use builder::RankingBuilder;
