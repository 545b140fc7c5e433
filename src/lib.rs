pub mod aggregators;
pub mod cli;
pub mod error;
pub mod models;
pub mod parsers;
pub mod readers;
pub mod reports;
pub mod utils;

pub use error::{ProcessingError, Result};
