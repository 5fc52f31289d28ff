pub mod application;
pub mod infrastructure;

pub use application::{DemoConfig, DemoReport, ReplayConfig, ReplayFile};
pub use infrastructure::{CliError, LogConfig, Result};
