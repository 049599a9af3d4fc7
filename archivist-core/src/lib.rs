pub mod categorize;
pub mod config;
pub mod dataset;
pub mod error;
pub mod error_utils;
pub mod quality;
pub mod replies;
pub mod types;

pub use categorize::*;
pub use config::*;
pub use dataset::*;
pub use error::*;
pub use error_utils::*;
pub use quality::*;
pub use replies::*;
pub use types::*;
