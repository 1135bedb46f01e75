//! Press-edge detector for active-low push buttons.
//!
//! Polled once per control cycle.  The 100 ms poll interval is longer than
//! the contact bounce of the board's tact switches, so no extra filtering
//! is needed: an edge is a low reading whose previous reading was high.

/// Edge detector for one button.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    /// Previous pin level (`true` = high / released).
    previous_high: bool,
}

impl EdgeDetector {
    /// The previous level starts low, so a button held through power-up
    /// produces no edge until it has been released once.
    pub const fn new() -> Self {
        Self {
            previous_high: false,
        }
    }

    /// Feed the current pin level.  Returns `true` on a press edge.
    pub fn update(&mut self, level_high: bool) -> bool {
        let pressed = !level_high && self.previous_high;
        self.previous_high = level_high;
        pressed
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
