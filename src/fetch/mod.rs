pub mod source;

pub use source::{FileStreakSource, HttpStreakSource, StreakSource};
#[cfg(test)]
pub use source::MockStreakSource;
