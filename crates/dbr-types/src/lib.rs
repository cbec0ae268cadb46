//! # Data Broker Shared Types
//!
//! Value types shared by the broker engine and everything that talks to it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: status codes and their messages live here.
//! - **Sentinels as constants**: `Group::EMPTY`, `Cursor::NEW`, `Cursor::DONE`
//!   and `Flags::NONE` are associated constants, never magic numbers.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
