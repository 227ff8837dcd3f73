//! Depletable resources: hit points, magic points, sanity.
//!
//! A resource is a current/max pair where current is always clamped to
//! `[0, max]`. Lowering the max (a POW drop, say) drags current down with
//! it; raising the max never raises current on its own.

use serde::{Deserialize, Serialize};

/// A clamped current/max resource pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Current value, always in `[0, max]`.
    pub current: u32,
    /// Maximum value.
    pub max: u32,
}

impl Resource {
    /// Create a resource starting at its maximum.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Set a new maximum, clamping current down if it now exceeds it.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    /// Set the current value directly, clamped to `[0, max]`.
    pub fn set_current(&mut self, current: u32) {
        self.current = current.min(self.max);
    }

    /// Apply a signed delta to current, clamping to bounds. Returns the
    /// new current value.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.current) + i64::from(delta);
        self.current = next.clamp(0, i64::from(self.max)) as u32;
        self.current
    }

    /// Refill current to the maximum.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Returns true if the resource has hit zero.
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
