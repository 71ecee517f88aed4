pub mod config;
pub mod load;
pub mod process;
pub mod render;
pub mod table;

pub use config::Config;
pub use process::{run, RunSummary};
pub use table::{AgeTable, NormalizedTable};
