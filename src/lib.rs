// Core sifting: records, domain grouping, classification and reporting
pub mod core;

// CSV I/O, prompt handling and logging setup
pub mod utils;

pub mod config;
pub mod constants;

// Re-export main types for convenience
pub use config::Config;
pub use crate::core::classifier::{classify, Classification, Classifier};
pub use crate::core::error::{SiftError, SiftResult};
pub use crate::core::pipeline::{SiftOutcome, SiftStats, Sifter};
pub use crate::core::record::{CredentialRecord, CredentialTable, GroupedRecord, Schema};
