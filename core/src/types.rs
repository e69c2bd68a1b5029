//! Shared primitive types used across the generation pipeline.

/// A merchant number drawn from the pool `1..=merchant_pool_size`.
pub type MerchantNum = u32;

/// A customer number drawn from the pool `1..=customer_pool_size`.
pub type CustomerNum = u32;

/// Hour of day, always in `0..=23`.
pub type Hour = u8;

/// Index of a row in generation order.
pub type RowIndex = usize;
