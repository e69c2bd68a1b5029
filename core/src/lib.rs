//! fraudgen-core: deterministic synthetic transaction data for
//! fraud-detection experiments.
//!
//! Entry point is [`generator::DatasetGenerator`]; everything else is a
//! stage it drives.

pub mod config;
pub mod error;
pub mod fraud_selection;
pub mod generator;
pub mod risk;
pub mod rng;
pub mod row_synthesis;
pub mod sampler;
pub mod serializer;
pub mod types;
