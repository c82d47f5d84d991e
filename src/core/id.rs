//! Identity generation
//!
//! New authors and courses receive their identifiers from this port, never
//! from callers. The repository calls it exactly once per created entity,
//! which keeps id assignment observable in tests.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Supplies globally-unique opaque identifiers on demand
pub trait IdProvider: Send + Sync {
    fn new_id(&self) -> Uuid;
}

/// Random version 4 identifiers
#[derive(Debug, Clone, Default)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic identifiers counting up from 1
///
/// Lets tests assert exactly which ids were handed out and how many times
/// the generator was consulted.
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    next: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdProvider for SequentialIdProvider {
    fn new_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(n as u128)
    }
}
