use imageproc::point::Point;

/// Bounding box in the original image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Build a box from an exclusive `[min, max)` extent
    pub fn from_extent(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x),
            height: max_y.saturating_sub(min_y),
        }
    }

    /// First column to the right of the box
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// First row below the box
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Closed outer border of a connected white region
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<u32>>,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Contour {
    /// Build a contour from its boundary points. Returns `None` for an empty border.
    pub fn from_points(points: Vec<Point<u32>>) -> Option<Self> {
        let first = *points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            points,
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Polygon area enclosed by the boundary points (shoelace formula).
    ///
    /// Points are pixel centres, so a filled `w x h` block encloses `(w-1)(h-1)`.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0i64;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
        }
        twice_area.abs() as f64 / 2.0
    }

    /// Pixel extent of the contour
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x: self.min_x,
            y: self.min_y,
            width: self.width(),
            height: self.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: u32, y0: u32, side: u32) -> Contour {
        let last = side - 1;
        let mut points = Vec::new();
        for x in 0..last {
            points.push(Point::new(x0 + x, y0));
        }
        for y in 0..last {
            points.push(Point::new(x0 + last, y0 + y));
        }
        for x in (1..=last).rev() {
            points.push(Point::new(x0 + x, y0 + last));
        }
        for y in (1..=last).rev() {
            points.push(Point::new(x0, y0 + y));
        }
        Contour::from_points(points).unwrap()
    }

    #[test]
    fn square_contour_extent_and_area() {
        let c = square(10, 20, 5);
        assert_eq!(
            c.bounding_box(),
            BoundingBox {
                x: 10,
                y: 20,
                width: 5,
                height: 5,
            }
        );
        assert_eq!(c.area(), 16.0);
    }

    #[test]
    fn empty_points_have_no_contour() {
        assert!(Contour::from_points(Vec::new()).is_none());
    }

    #[test]
    fn box_containment_is_inclusive_of_edges() {
        let outer = BoundingBox::from_extent(0, 0, 10, 10);
        assert!(outer.contains(&BoundingBox {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        }));
        assert!(!outer.contains(&BoundingBox {
            x: 1,
            y: 1,
            width: 10,
            height: 2,
        }));
    }
}
