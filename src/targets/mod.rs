pub mod loader;

pub use loader::{load_targets, parse_target_line};

/// A URL and the parameter sqlmap should test on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub param: String,
}
