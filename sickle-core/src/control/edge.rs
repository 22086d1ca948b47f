//! Rising edge detection for polled inputs

/// Tracks the previous sample of a polled input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    /// Create a detector seeded with an initial level
    pub const fn new(initial: bool) -> Self {
        Self { previous: initial }
    }

    /// Feed a new sample; returns true on a false-to-true transition
    pub fn update(&mut self, level: bool) -> bool {
        let rising = level && !self.previous;
        self.previous = level;
        rising
    }

    /// Overwrite the previous sample without reporting an edge
    pub fn reset(&mut self, level: bool) {
        self.previous = level;
    }
}
