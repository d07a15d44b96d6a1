pub mod page;

pub use page::PageParser;
