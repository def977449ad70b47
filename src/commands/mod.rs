//! Command implementations

pub mod notify;

pub use notify::{run as notify_run, Outcome};
