pub mod demo;
pub mod replay;
pub mod schema;

pub use demo::{DemoConfig, DemoReport, run_demo};
pub use replay::{Frame, ReplayConfig, ReplayFile, play};
pub use schema::{SCHEMA_NAMES, schema_by_name, write_all};
