pub mod deps;
pub mod logger;
pub mod process;

pub use deps::{check_tool, resolve_tool};
pub use logger::init_logging;
pub use process::run_tool;
