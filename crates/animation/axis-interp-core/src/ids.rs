//! Identifiers and a simple allocator for axes managed by the driver.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AxisId(pub u32);

/// Monotonic allocator for AxisId. IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_axis: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_axis(&mut self) -> AxisId {
        let id = AxisId(self.next_axis);
        self.next_axis = self.next_axis.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
