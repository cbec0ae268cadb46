//! # Data Broker Engine
//!
//! An embeddable data broker: named namespaces holding FIFO queues of byte
//! values ("tuples") addressed by `(group, key)`.
//!
//! ## Operations
//!
//! | Area | Calls |
//! |------|-------|
//! | Lifecycle | `create`, `attach`, `detach`, `delete`, `query` |
//! | Tuples | `put`, `put_gather`, `get`, `read`, `get_into`, `read_into`, `read_scatter`, `remove`, `move_tuple` |
//! | Keys | `directory`, `iterator` |
//! | Async | `put_a`, `get_a`, `read_a`, `test`, `cancel` |
//!
//! `get` is destructive, `read` is not. Both block until a tuple shows up or
//! the configured timeout passes, unless `Flags::NOWAIT` is given.
//!
//! ## Persistence
//!
//! Namespaces created with a persistent `PersistLevel` are written through
//! to a `NamespaceStore` after every mutation. Volatile namespaces live only
//! as long as the `DataBroker` value.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (namespace entity, cursors, request tags)
//! - `ports/` - Port traits (inbound API, outbound store)
//! - `adapters/` - Store, checksum, serializer and lock implementations
//! - `service/` - `DataBroker`, the application service implementing the API
//!
//! ## Usage
//!
//! ```
//! use dbr_broker::{BrokerConfig, DataBroker, DataBrokerApi};
//! use dbr_types::{Flags, Group, GroupList, PersistLevel};
//!
//! let broker = DataBroker::new_in_memory(BrokerConfig::default());
//! let handle = broker
//!     .create("jobs", PersistLevel::VolatileSimple, GroupList::new())
//!     .unwrap();
//!
//! broker.put(&handle, b"payload", "job:1", Group::EMPTY).unwrap();
//! let value = broker
//!     .get(&handle, "job:1", "", Group::EMPTY, Flags::NOWAIT)
//!     .unwrap();
//! assert_eq!(value, b"payload");
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use domain::errors::{BrokerError, SerializationError, StoreError};
pub use domain::namespace::{Namespace, NamespaceHandle};
pub use domain::requests::Completion;
pub use domain::state::NamespaceState;
pub use domain::validation::limits;
pub use domain::value_objects::BrokerConfig;
pub use ports::inbound::DataBrokerApi;
pub use ports::outbound::{ChecksumProvider, NamespaceStore, SnapshotSerializer};
pub use service::DataBroker;

pub use adapters::InMemoryNamespaceStore;
#[cfg(feature = "file-store")]
pub use adapters::FileNamespaceStore;
