//! # Data Broker Test Suite
//!
//! Unified test crate for flows that cross module boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs        # put / iterate / get / delete end to end
//! │   ├── persistence.rs  # file store reopen, corruption, locking
//! │   └── concurrency.rs  # blocked readers, producers and consumers
//! └── benches/
//!     └── broker_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dbr-tests
//!
//! # By category
//! cargo test -p dbr-tests integration::persistence::
//!
//! # Benchmarks
//! cargo bench -p dbr-tests
//! ```

pub mod integration;
