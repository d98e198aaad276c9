use crate::Vec2;
use std::ops::{Add, Sub};

/// Axis-aligned rectangle stored as origin + size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T> Rect<T> {
    pub const fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl Rect<f32> {
    pub fn area(&self) -> f32 {
        self.size.x.max(0.0) * self.size.y.max(0.0)
    }

    /// Intersection over union, 0.0 for disjoint or degenerate boxes.
    pub fn iou(&self, other: &Rect<f32>) -> f32 {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        let w = a_max.x.min(b_max.x) - a_min.x.max(b_min.x);
        let h = a_max.y.min(b_max.y) - a_min.y.max(b_min.y);
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        let inter = w * h;
        let union = self.area() + other.area() - inter;
        if union <= 0.0 { 0.0 } else { inter / union }
    }

    /// Round outward to integer pixel coordinates.
    pub fn to_pixels(&self) -> Rect<i32> {
        let min = self.min();
        let max = self.max();
        Rect::from_min_max(
            Vec2::new(min.x.floor() as i32, min.y.floor() as i32),
            Vec2::new(max.x.ceil() as i32, max.y.ceil() as i32),
        )
    }
}

impl Rect<i32> {
    /// Grow by `amount` pixels on every side, saturating at the `i32` range.
    pub fn pad(&self, amount: i32) -> Rect<i32> {
        let grow = amount.saturating_mul(2);
        Rect::new(
            Vec2::new(
                self.origin.x.saturating_sub(amount),
                self.origin.y.saturating_sub(amount),
            ),
            Vec2::new(
                self.size.x.saturating_add(grow),
                self.size.y.saturating_add(grow),
            ),
        )
    }
}
