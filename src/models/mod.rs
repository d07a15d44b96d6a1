pub mod display;
pub mod error;
pub mod ranking;
pub mod streak;

pub use display::*;
pub use error::*;
pub use ranking::*;
pub use streak::*;
