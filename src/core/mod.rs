pub mod errors;
pub mod events;
pub mod hosts;
pub mod models;
pub mod prober;
pub mod scheduler;
pub mod state;
