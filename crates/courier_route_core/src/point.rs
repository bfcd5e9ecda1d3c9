use std::fmt;

/// Planar coordinate of a graph node or a cluster centroid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance.
    #[inline]
    pub fn dist(self, rhs: &Self) -> f64 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when both axes moved strictly less than `tolerance`.
    pub(crate) fn within(self, rhs: &Self, tolerance: f64) -> bool {
        (self.x - rhs.x).abs() < tolerance && (self.y - rhs.y).abs() < tolerance
    }

    /// Key used to compare coordinates for exact equality, `-0.0` folded into `0.0`.
    pub(crate) fn bits(self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }

    pub(crate) fn mean<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Point> {
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut n = 0usize;
        for p in points {
            sx += p.x;
            sy += p.y;
            n += 1;
        }
        (n > 0).then(|| Point::new(sx / n as f64, sy / n as f64))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "({},{})", b1.format(self.x), b2.format(self.y))
    }
}
