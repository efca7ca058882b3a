pub mod classifier;
pub mod domain;
pub mod error;
pub mod filter;
pub mod index;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod restore;
