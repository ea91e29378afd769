//! Axis-aligned bounding boxes.
//!
//! Every spatial question in the game — movement probes, bullet hits, pickup
//! consumption, spawn rejection — reduces to [`Aabb::overlaps`].  The test is
//! **inclusive**: boxes sharing only an edge or a corner count as overlapping,
//! which is what makes the one-unit adjacency probes in the movement and
//! contact-damage code fire exactly when two bodies touch.

use bevy::prelude::*;

/// Closed axis-aligned box, `min` ≤ `max` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given full extents centered at `center`.
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive overlap test: touching edges and corners count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// The same box translated by `delta`.
    pub fn offset(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// The box grown by `margin` on every side.
    pub fn padded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_from_center_and_size() {
        let b = Aabb::from_center_size(Vec2::new(10.0, -2.0), Vec2::new(4.0, 8.0));
        assert_eq!(b.min, Vec2::new(8.0, -6.0));
        assert_eq!(b.max, Vec2::new(12.0, 2.0));
        assert_eq!(b.center(), Vec2::new(10.0, -2.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 8.0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center_size(Vec2::new(7.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn box_overlaps_itself() {
        let a = Aabb::from_center_size(Vec2::new(3.0, 4.0), Vec2::splat(2.0));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn touching_edges_count_as_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        let edge = Aabb::from_center_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let corner = Aabb::from_center_size(Vec2::new(10.0, 10.0), Vec2::splat(10.0));
        assert!(a.overlaps(&edge));
        assert!(a.overlaps(&corner));
    }

    #[test]
    fn separated_boxes_do_not_overlap() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center_size(Vec2::new(10.1, 0.0), Vec2::splat(10.0));
        let c = Aabb::from_center_size(Vec2::new(0.0, -10.1), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn offset_translates_both_corners() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(2.0));
        let moved = a.offset(Vec2::new(1.0, -3.0));
        assert_eq!(moved.min, Vec2::new(0.0, -4.0));
        assert_eq!(moved.max, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn padding_grows_every_side() {
        let a = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(2.0));
        let grown = a.padded(3.0);
        assert_eq!(grown.min, Vec2::splat(-4.0));
        assert_eq!(grown.max, Vec2::splat(4.0));
    }
}
