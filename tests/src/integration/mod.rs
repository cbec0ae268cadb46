//! Integration tests across the broker, its stores and its types.

pub mod concurrency;
pub mod flows;
pub mod persistence;
