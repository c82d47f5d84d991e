//! Storage backends
//!
//! The in-memory store is the only backend; persistence engines are out of
//! scope. Everything sits behind the repository ports, so a real backend
//! could slot in without touching the service layer.

pub mod in_memory;

pub use in_memory::InMemoryStore;
