//! Square regions and the quadrant convention used by the quadtree.
//!
//! Child layout of a subdivided region:
//!
//! ```text
//! +--------+--------+
//! | NW = 0 | NE = 1 |
//! +--------+--------+
//! | SW = 2 | SE = 3 |
//! +--------+--------+
//! ```
//!
//! A point exactly on the vertical midline belongs to the West half and a point
//! exactly on the horizontal midline belongs to the North half. Insertion and
//! traversal both go through [`Region::quadrant_of`], so the tie-break is the
//! same everywhere.

use crate::simulation::error::{Result, SimError};
use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    pub fn index(self) -> usize {
        self as usize
    }

    fn is_east(self) -> bool {
        matches!(self, Quadrant::NE | Quadrant::SE)
    }

    fn is_north(self) -> bool {
        matches!(self, Quadrant::NW | Quadrant::NE)
    }
}

/// Axis-aligned square with origin `(x, y)` at its south-west corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SimError::DegenerateRegion { width });
        }
        Ok(Self { x, y, width })
    }

    pub fn midpoint(&self) -> NVec2 {
        let half = self.width / 2.0;
        NVec2::new(self.x + half, self.y + half)
    }

    /// Which child quadrant `p` falls into (`<=` goes West, `>=` goes North).
    pub fn quadrant_of(&self, p: &NVec2) -> Quadrant {
        let mid = self.midpoint();
        let west = p.x <= mid.x;
        let north = p.y >= mid.y;
        match (west, north) {
            (true, true) => Quadrant::NW,
            (false, true) => Quadrant::NE,
            (true, false) => Quadrant::SW,
            (false, false) => Quadrant::SE,
        }
    }

    /// The half-width child region for `q`.
    pub fn child(&self, q: Quadrant) -> Region {
        let half = self.width / 2.0;
        Region {
            x: if q.is_east() { self.x + half } else { self.x },
            y: if q.is_north() { self.y + half } else { self.y },
            width: half,
        }
    }

    /// All four children, indexed NW, NE, SW, SE.
    pub fn subdivide(&self) -> [Region; 4] {
        Quadrant::ALL.map(|q| self.child(q))
    }

    /// Closed-interval containment test.
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.width
    }
}
