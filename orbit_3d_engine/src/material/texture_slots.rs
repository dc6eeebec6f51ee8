/// Texture unit counter shared by the components of one material.
///
/// Every component that binds a texture takes the next unit, so the call
/// order of the components decides which texture lands on which unit.
/// The counter goes back to its starting unit when the material is
/// (re)bound or unbound.
///
/// # Example
///
/// ```ignore
/// let slots = TextureSlots::new(1, 16);
/// let a = slots.acquire()?;  // 1
/// let b = slots.acquire()?;  // 2
/// slots.reset();
/// let c = slots.acquire()?;  // 1
/// ```

use std::cell::Cell;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct TextureSlots {
    first: u32,
    next: Cell<u32>,
    max_units: u32,
}

impl TextureSlots {
    /// Counter starting at `first`, limited to `max_units` units in total
    pub fn new(first: u32, max_units: u32) -> Self {
        Self {
            first,
            next: Cell::new(first),
            max_units,
        }
    }

    /// Take the next free texture unit
    ///
    /// # Errors
    ///
    /// `InvalidArgument` (logged) when every unit is taken.
    pub fn acquire(&self) -> Result<u32> {
        let slot = self.next.get();
        if slot >= self.max_units {
            crate::engine_bail_warn!(
                "orbit3d::Material",
                "Out of texture units (first {}, max {})", self.first, self.max_units
            );
        }
        self.next.set(slot + 1);
        Ok(slot)
    }

    /// Back to the starting unit
    pub fn reset(&self) {
        self.next.set(self.first);
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    /// Unit the next `acquire` returns
    pub fn peek(&self) -> u32 {
        self.next.get()
    }

    /// Number of units taken since the last reset
    pub fn in_use(&self) -> u32 {
        self.next.get() - self.first
    }
}

impl Default for TextureSlots {
    fn default() -> Self {
        Self::new(0, 16)
    }
}

#[cfg(test)]
#[path = "texture_slots_tests.rs"]
mod tests;
