//! Viewport observation for infinite scroll.
//!
//! The sentinel is an explicit owned resource with an acquire/release
//! contract. A controller owns exactly one sentinel, the sentinel watches at
//! most one row index at a time, and re-observation releases the previous
//! target first, so a stale target can never fire a second page advance.

use std::ops::Range;

/// Watches a single list row for viewport visibility.
#[derive(Debug, Default)]
pub struct ScrollSentinel {
    target: Option<usize>,
}

impl ScrollSentinel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a row index, releasing any previous target.
    pub fn observe(&mut self, index: usize) {
        if let Some(prev) = self.target.replace(index) {
            if prev != index {
                tracing::trace!(prev, index, "Scroll sentinel re-targeted");
            }
        }
    }

    /// Release the current target. Idempotent.
    pub fn disconnect(&mut self) {
        self.target = None;
    }

    /// The observed row index, if any.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// True when the observed row lies inside the visible row range.
    pub fn is_triggered(&self, visible: &Range<usize>) -> bool {
        self.target.is_some_and(|t| visible.contains(&t))
    }
}
