// src/domain/session.rs

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed out when a request starts. Higher is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Orders overlapping requests so a slow, older completion can't replace the
/// result of a newer one.
///
/// `begin` issues tickets; `accept` lets a completion through only if nothing
/// newer has been accepted already.
#[derive(Debug, Default)]
pub struct Generations {
    issued: AtomicU64,
    accepted: AtomicU64,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` and records `ticket` if it is newer than the last
    /// accepted completion. Returns `false` for stale completions.
    pub fn accept(&self, ticket: Generation) -> bool {
        self.accepted
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (ticket.0 > current).then_some(ticket.0)
            })
            .is_ok()
    }

    pub fn latest_accepted(&self) -> u64 {
        self.accepted.load(Ordering::SeqCst)
    }
}
