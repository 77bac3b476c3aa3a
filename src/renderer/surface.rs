//! The drawing capability every scene draws through
//!
//! Immediate-mode 2D: shapes, linear/radial gradients and text. The browser
//! implements it over a Canvas 2D context; the recorder implements it for
//! headless runs and tests.

use glam::Vec2;

use super::color::Color;
use crate::sim::Region;

/// How new pixels combine with existing ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    #[default]
    Normal,
    /// Colors add up (glows)
    Additive,
}

impl Blend {
    pub fn as_css(&self) -> &'static str {
        match self {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<(f32, Color)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: Vec<(f32, Color)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    pub fn linear(start: Vec2, end: Vec2, stops: &[(f32, Color)]) -> Self {
        Paint::Linear(LinearGradient {
            start,
            end,
            stops: stops.to_vec(),
        })
    }

    pub fn radial(center: Vec2, inner_radius: f32, outer_radius: f32, stops: &[(f32, Color)]) -> Self {
        Paint::Radial(RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: stops.to_vec(),
        })
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

impl LineCap {
    pub fn as_css(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f32) -> Self {
        Self {
            paint: paint.into(),
            width,
            cap: LineCap::Butt,
        }
    }

    pub fn round(mut self) -> Self {
        self.cap = LineCap::Round;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Font {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    /// Centered both ways (ion "+" labels)
    pub fn centered(size: f32) -> Self {
        Self {
            size,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }

    pub fn css(&self) -> String {
        format!("{}px system-ui", self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Clockwise arc from `start` to `end` radians
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
    },
    RoundRect {
        rect: Region,
        radius: f32,
    },
    Close,
}

/// A path built up from segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::new().arc(center, radius, 0.0, std::f32::consts::TAU)
    }

    pub fn round_rect(rect: Region, radius: f32) -> Self {
        let mut path = Self::new();
        path.ops.push(PathOp::RoundRect { rect, radius });
        path
    }

    /// Closed polygon through `points`
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut path = Self::new();
        for (i, p) in points.iter().enumerate() {
            path.ops.push(if i == 0 {
                PathOp::MoveTo(*p)
            } else {
                PathOp::LineTo(*p)
            });
        }
        path.close()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.ops.push(PathOp::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.ops.push(PathOp::LineTo(p));
        self
    }

    pub fn arc(mut self, center: Vec2, radius: f32, start: f32, end: f32) -> Self {
        self.ops.push(PathOp::Arc {
            center,
            radius,
            start,
            end,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.ops.push(PathOp::Close);
        self
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Immediate-mode 2D drawing surface
pub trait Surface {
    /// Logical size in canvas units
    fn size(&self) -> Vec2;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    fn set_alpha(&mut self, alpha: f32);
    fn set_blend(&mut self, blend: Blend);
    /// Empty slice for solid lines
    fn set_line_dash(&mut self, segments: &[f32]);

    fn fill_rect(&mut self, rect: Region, paint: &Paint);
    fn stroke_rect(&mut self, rect: Region, stroke: &Stroke);
    fn fill_path(&mut self, path: &Path, paint: &Paint);
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);
    /// Intersect the clip region with `path` until the next `restore`
    fn clip(&mut self, path: &Path);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &Font, paint: &Paint);

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.fill_path(&Path::circle(center, radius), paint);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.stroke_path(&Path::circle(center, radius), stroke);
    }
}
