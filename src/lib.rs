pub mod collector;
pub mod report;
pub mod source;

pub use collector::{collect_and_save, Collector, Page, PostSource, View};
