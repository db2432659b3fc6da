//! Driving the external sqlmap binary
//!
//! - command: argument construction for one run
//! - runner: process spawning and output capture
//! - output: scraping results out of the console transcript

pub mod command;
pub mod output;
pub mod runner;

pub use command::{Invocation, SqlmapSettings};
pub use runner::{ScanRunner, SqlmapRunner};
