//! # Identifier Generator
//!
//! Mints identifiers for persisted entities and line items.
//!
//! ## Format
//! ```text
//! id_1718000000123_k3j9x0qzp
//!    └─────┬─────┘ └───┬───┘
//!    monotonic ms   9 base-36 chars
//!                   (from a UUID v4)
//! ```
//!
//! Identifiers are unique within the lifetime of one generator. The
//! millisecond part never repeats or goes backwards: two ids minted in the
//! same millisecond get consecutive values. There is no global uniqueness
//! guarantee across processes.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::types::EntityId;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Process-local identifier generator.
///
/// Shared by reference; minting takes `&self`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator with an empty clock history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints the next identifier.
    pub fn next_id(&self) -> EntityId {
        let millis = self.tick(wall_clock_millis());
        EntityId::from(format!("id_{}_{}", millis, random_suffix()))
    }

    /// Advances the monotonic clock to `now`, or one past the last value.
    fn tick(&self, now: u64) -> u64 {
        let mut last = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = now.max(last.saturating_add(1));
            match self.last_millis.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(observed) => last = observed,
            }
        }
    }
}

fn wall_clock_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

fn random_suffix() -> String {
    let mut value = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(value % 36) as usize] as char);
        value /= 36;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = IdGenerator::new().next_id();
        let parts: Vec<&str> = id.as_str().split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "id");
        assert!(parts[1].parse::<u64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let ids = IdGenerator::new();
        assert_eq!(ids.tick(100), 100);
        assert_eq!(ids.tick(100), 101);
        assert_eq!(ids.tick(50), 102);
        assert_eq!(ids.tick(500), 500);
    }

    #[test]
    fn test_ids_are_unique_in_a_burst() {
        let ids = IdGenerator::new();
        let minted: HashSet<EntityId> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(minted.len(), 1_000);
    }
}
