use std::cell::Cell;

/// Number of outline groups the task wires up.
pub const MAX_OUTLINE_COUNT: usize = 8;

/// Per-group blur pixel widths shared between effect jobs (writers) and mask jobs
/// (readers).
///
/// Owned by the task and handed to jobs at construction. Jobs run on one thread in
/// declaration order, so plain `Cell` slots are enough.
#[derive(Debug, Default)]
pub struct SharedOutlineParameters {
    blur_pixel_widths: [Cell<u32>; MAX_OUTLINE_COUNT],
}

impl SharedOutlineParameters {
    /// All slots zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blur width last published for `group`; zero for out-of-range groups.
    pub fn blur_pixel_width(&self, group: usize) -> u32 {
        self.blur_pixel_widths.get(group).map_or(0, Cell::get)
    }

    pub(crate) fn set_blur_pixel_width(&self, group: usize, width: u32) {
        if let Some(slot) = self.blur_pixel_widths.get(group) {
            slot.set(width);
        }
    }

    /// Copy of every slot.
    pub fn snapshot(&self) -> [u32; MAX_OUTLINE_COUNT] {
        std::array::from_fn(|i| self.blur_pixel_widths[i].get())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/outline/params.rs"]
mod tests;
