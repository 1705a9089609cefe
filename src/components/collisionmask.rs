//! Pixel-accurate collision masks.
//!
//! A [`CollisionMask`] is a row-major grid of solid/empty cells, one per
//! pixel of the sprite it stands for. Two masks overlap when at least one
//! solid cell of each lands on the same pixel once the second mask is shifted
//! by an integer offset.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    pub width: usize,
    pub height: usize,
    cells: Vec<bool>,
}

impl CollisionMask {
    /// Fully solid mask.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![true; width * height],
        }
    }

    /// Solid disc of the given radius inside a `2r x 2r` square.
    pub fn circle(radius: usize) -> Self {
        let side = radius * 2;
        let r = radius as f32;
        let mut cells = vec![false; side * side];
        for y in 0..side {
            for x in 0..side {
                let dx = x as f32 + 0.5 - r;
                let dy = y as f32 + 0.5 - r;
                cells[y * side + x] = dx * dx + dy * dy <= r * r;
            }
        }
        Self {
            width: side,
            height: side,
            cells,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// True when any solid cell of `other`, shifted by `(dx, dy)` relative to
    /// this mask's origin, coincides with a solid cell of `self`.
    pub fn overlaps(&self, other: &CollisionMask, dx: i32, dy: i32) -> bool {
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width as i32).min(self.width as i32);
        let y1 = (dy + other.height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x as usize, y as usize)
                    && other.get((x - dx) as usize, (y - dy) as usize)
                {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_has_empty_corners() {
        let c = CollisionMask::circle(10);
        assert_eq!(c.width, 20);
        assert!(!c.get(0, 0));
        assert!(c.get(10, 10));
    }

    #[test]
    fn bounding_box_overlap_is_not_enough() {
        let circle = CollisionMask::circle(10);
        let dot = CollisionMask::filled(2, 2);
        // inside the square, outside the disc
        assert!(!circle.overlaps(&dot, 0, 0));
        assert!(circle.overlaps(&dot, 9, 9));
    }

    #[test]
    fn disjoint_offsets_do_not_overlap() {
        let a = CollisionMask::filled(4, 4);
        let b = CollisionMask::filled(4, 4);
        assert!(a.overlaps(&b, 3, -3));
        assert!(!a.overlaps(&b, 4, 0));
        assert!(!a.overlaps(&b, -4, 0));
    }
}
