//! Audit trail adapters implementing the version log port.

mod memory;

pub use memory::InMemoryVersionLog;
