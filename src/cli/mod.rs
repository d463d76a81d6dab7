pub mod args;
pub mod prompt;
