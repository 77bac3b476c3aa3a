//! Axis-aligned rectangular regions that bound scene entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle in canvas units (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Bounce a moving point off the edges: velocity components pointing out
    /// of the region are flipped and the position is clamped back inside.
    pub fn reflect(&self, pos: &mut Vec2, vel: &mut Vec2) {
        if (pos.x < self.x && vel.x < 0.0) || (pos.x > self.right() && vel.x > 0.0) {
            vel.x = -vel.x;
        }
        if (pos.y < self.y && vel.y < 0.0) || (pos.y > self.bottom() && vel.y > 0.0) {
            vel.y = -vel.y;
        }
        *pos = self.clamp_point(*pos);
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite edge.
    pub fn wrap_point(&self, p: Vec2) -> Vec2 {
        let mut out = p;
        if out.x > self.right() {
            out.x = self.x;
        } else if out.x < self.x {
            out.x = self.right();
        }
        if out.y > self.bottom() {
            out.y = self.y;
        } else if out.y < self.y {
            out.y = self.bottom();
        }
        out
    }
}
