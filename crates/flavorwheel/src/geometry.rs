use std::f64::consts::TAU;

pub const MARGIN: f64 = 20.0;
pub const INNER_RATIO: f64 = 0.4;
pub const HUB_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A pointer position relative to the wheel center. `angle` is always in `[0, TAU)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub distance: f64,
    pub angle: f64,
}

impl Polar {
    pub fn new(distance: f64, angle: f64) -> Self {
        Self {
            distance,
            angle: normalize_angle(angle),
        }
    }
}

/// Folds `atan2` output (`(-PI, PI]`) into `[0, TAU)`.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle < 0.0 { angle + TAU } else { angle }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub hub_radius: f64,
}

impl WheelGeometry {
    pub fn for_surface(width: f64, height: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        let outer_radius = (center.x.min(center.y) - MARGIN).max(0.0);
        let inner_radius = outer_radius * INNER_RATIO;

        Self {
            center,
            outer_radius,
            inner_radius,
            hub_radius: inner_radius * HUB_RATIO,
        }
    }

    pub fn square(side: f64) -> Self {
        Self::for_surface(side, side)
    }

    pub fn locate(&self, cursor: Point) -> Polar {
        let (dx, dy) = (cursor.x - self.center.x, cursor.y - self.center.y);
        Polar::new(dx.hypot(dy), dy.atan2(dx))
    }

    /// Inverse of [`locate`](Self::locate), used to place labels.
    pub fn point_at(&self, radius: f64, angle: f64) -> Point {
        Point::new(
            self.center.x + radius * angle.cos(),
            self.center.y + radius * angle.sin(),
        )
    }

    pub fn in_hub(&self, polar: Polar) -> bool {
        polar.distance < self.hub_radius
    }

    pub fn in_outer_ring(&self, polar: Polar) -> bool {
        (self.inner_radius..self.outer_radius).contains(&polar.distance)
    }

    pub fn in_inner_ring(&self, polar: Polar) -> bool {
        (self.hub_radius..self.inner_radius).contains(&polar.distance)
    }

    pub fn outer_label_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    pub fn inner_label_radius(&self) -> f64 {
        (self.hub_radius + self.inner_radius) / 2.0
    }
}

/// Index of the equal slice of `span` that `offset` falls into, for `count` slices.
/// Clamped so a value at or past the far edge lands in the last slice.
pub fn slice_index(offset: f64, span: f64, count: usize) -> usize {
    let step = span / count as f64;
    ((offset / step).floor().max(0.0) as usize).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_radii_for_300px_surface() {
        let geometry = WheelGeometry::square(300.0);
        assert_eq!(geometry.center, Point::new(150.0, 150.0));
        assert_eq!(geometry.outer_radius, 130.0);
        assert_eq!(geometry.inner_radius, 52.0);
        assert_eq!(geometry.hub_radius, 26.0);
    }

    #[test]
    fn test_non_square_surface_uses_shorter_side() {
        let geometry = WheelGeometry::for_surface(500.0, 300.0);
        assert_eq!(geometry.center, Point::new(250.0, 150.0));
        assert_eq!(geometry.outer_radius, 130.0);
    }

    #[test]
    fn test_tiny_surface_has_no_rings() {
        let geometry = WheelGeometry::square(30.0);
        assert_eq!(geometry.outer_radius, 0.0);
        assert_eq!(geometry.hub_radius, 0.0);
    }

    #[test]
    fn test_locate_normalizes_angle() {
        let geometry = WheelGeometry::square(300.0);

        let east = geometry.locate(Point::new(210.0, 150.0));
        assert_eq!(east.distance, 60.0);
        assert_eq!(east.angle, 0.0);

        let south = geometry.locate(Point::new(150.0, 200.0));
        assert_eq!(south.angle, FRAC_PI_2);

        let north = geometry.locate(Point::new(150.0, 100.0));
        assert!((north.angle - 3.0 * FRAC_PI_2).abs() < 1e-12);

        let west = geometry.locate(Point::new(90.0, 150.0));
        assert_eq!(west.angle, PI);
    }

    #[test]
    fn test_ring_bounds_are_half_open() {
        let geometry = WheelGeometry::square(300.0);
        assert!(geometry.in_outer_ring(Polar::new(52.0, 0.0)));
        assert!(!geometry.in_outer_ring(Polar::new(130.0, 0.0)));
        assert!(geometry.in_inner_ring(Polar::new(26.0, 0.0)));
        assert!(!geometry.in_inner_ring(Polar::new(52.0, 0.0)));
        assert!(geometry.in_hub(Polar::new(25.9, 0.0)));
    }

    #[test]
    fn test_slice_index_clamps_far_edge() {
        assert_eq!(slice_index(0.0, TAU, 8), 0);
        assert_eq!(slice_index(TAU, TAU, 8), 7);
        assert_eq!(slice_index(FRAC_PI_2, TAU, 4), 1);
        assert_eq!(slice_index(-1e-15, TAU, 4), 0);
    }
}
