use serde::{Deserialize, Serialize};

/// Snapping grid size, doubled and halved within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSize {
    pub size: u32,
    pub min: u32,
    pub max: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            size: 16,
            min: 1,
            max: 128,
        }
    }
}

impl GridSize {
    /// Builds a grid with `size` clamped into the range. A zero `min` is
    /// raised to 1.
    pub fn new(size: u32, min: u32, max: u32) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        Self {
            size: size.clamp(min, max),
            min,
            max,
        }
    }

    pub fn get(&self) -> u32 {
        self.size
    }

    pub fn as_f32(&self) -> f32 {
        self.size as f32
    }

    /// Doubles the size unless already at the maximum. Returns whether it changed.
    pub fn increase(&mut self) -> bool {
        if self.size < self.max {
            self.size = (self.size << 1).min(self.max);
            true
        } else {
            false
        }
    }

    /// Halves the size unless already at the minimum. Returns whether it changed.
    pub fn decrease(&mut self) -> bool {
        if self.size > self.min {
            self.size = (self.size >> 1).max(self.min);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_stops_at_max() {
        let mut grid = GridSize::default();
        assert!(grid.increase());
        assert!(grid.increase());
        assert!(grid.increase());
        assert_eq!(grid.get(), 128);
        assert!(!grid.increase());
        assert_eq!(grid.get(), 128);
    }

    #[test]
    fn halving_stops_at_min() {
        let mut grid = GridSize::new(4, 1, 128);
        assert!(grid.decrease());
        assert!(grid.decrease());
        assert!(!grid.decrease());
        assert_eq!(grid.get(), 1);
    }

    #[test]
    fn new_clamps_size() {
        assert_eq!(GridSize::new(500, 1, 128).get(), 128);
        assert_eq!(GridSize::new(0, 0, 128).get(), 1);
        let odd = GridSize::new(20, 5, 50);
        let mut g = odd;
        g.increase();
        g.increase();
        assert_eq!(g.get(), 50);
    }
}
