//! Identity set for cycle detection.
//!
//! Holds the addresses of the shared nodes that are ancestors of the value
//! currently being encoded. An address is inserted when the encoder descends
//! into a node and removed when it leaves, whatever the outcome.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub(crate) struct VisitedSet {
    active: HashSet<usize>,
}

impl VisitedSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `address`; returns `false` if it is already on the path.
    pub(crate) fn enter(&mut self, address: usize) -> bool {
        self.active.insert(address)
    }

    pub(crate) fn leave(&mut self, address: usize) {
        self.active.remove(&address);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reentry_is_refused_until_left() {
        let mut visited = VisitedSet::new();
        assert!(visited.enter(0x1000));
        assert!(!visited.enter(0x1000));
        assert!(visited.enter(0x2000));

        visited.leave(0x1000);
        assert!(visited.enter(0x1000));

        visited.leave(0x1000);
        visited.leave(0x2000);
        assert!(visited.is_empty());
    }
}
