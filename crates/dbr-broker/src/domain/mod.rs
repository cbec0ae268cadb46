//! # Domain Layer
//!
//! Pure domain logic for the data broker. No I/O happens here.
//!
//! ## Modules
//!
//! - `namespace` - Namespace entity, tuple queues, handles
//! - `iterator` - Cursor table for key iteration
//! - `requests` - Async request tags and fetch descriptors
//! - `state` - `query` results
//! - `value_objects` - Broker configuration
//! - `validation` - Argument checks and hard limits
//! - `errors` - Domain error types

pub mod errors;
pub mod iterator;
pub mod namespace;
pub mod requests;
pub mod state;
pub mod validation;
pub mod value_objects;
