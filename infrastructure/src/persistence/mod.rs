//! Storage adapters implementing the persistence port.

mod memory;

pub use memory::InMemoryStore;
