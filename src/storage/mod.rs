pub mod run_log;

pub use run_log::{append_run, RunLog};
