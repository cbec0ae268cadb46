//! # Ports Layer
//!
//! Port traits for the data broker.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (the broker API)
//! - `outbound.rs` - Driven ports (storage, checksums, serialization)

pub mod inbound;
pub mod outbound;
