pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
#[cfg(test)]
pub mod test_helpers;
pub mod validation;

pub use error::{Result, VerifyError};
