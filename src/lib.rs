pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod styling;

pub use error::ReportError;
pub use report::{Timeline, build_timeline};
