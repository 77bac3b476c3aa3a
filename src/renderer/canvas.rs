//! Canvas 2D implementation of [`Surface`] (browser only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Blend, Font, Paint, Path, PathOp, Stroke, Surface, TextAlign, TextBaseline};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::{LabError, Result};
use crate::sim::Region;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    /// Size the canvas to the lab's logical resolution and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| LabError::Canvas(format!("{e:?}")))?
            .ok_or_else(|| LabError::Canvas("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| LabError::Canvas("not a 2d context".into()))?;

        log::info!("canvas2d surface: {}x{}", CANVAS_WIDTH, CANVAS_HEIGHT);

        Ok(Self {
            ctx,
            size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        })
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, stops) = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear(g) => (
                self.ctx.create_linear_gradient(
                    g.start.x as f64,
                    g.start.y as f64,
                    g.end.x as f64,
                    g.end.y as f64,
                ),
                &g.stops,
            ),
            Paint::Radial(g) => (
                self.ctx
                    .create_radial_gradient(
                        g.center.x as f64,
                        g.center.y as f64,
                        g.inner_radius as f64,
                        g.center.x as f64,
                        g.center.y as f64,
                        g.outer_radius as f64,
                    )
                    .ok()?,
                &g.stops,
            ),
        };
        for (offset, color) in stops {
            let _ = gradient.add_color_stop(offset.clamp(0.0, 1.0), &color.to_css());
        }
        Some(gradient)
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            _ => {
                if let Some(gradient) = self.gradient(paint) {
                    self.ctx.set_fill_style_canvas_gradient(&gradient);
                }
            }
        }
    }

    fn set_stroke(&self, stroke: &Stroke) {
        match &stroke.paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.to_css()),
            paint => {
                if let Some(gradient) = self.gradient(paint) {
                    self.ctx.set_stroke_style_canvas_gradient(&gradient);
                }
            }
        }
        self.ctx.set_line_width(stroke.width as f64);
        self.ctx.set_line_cap(stroke.cap.as_css());
    }

    fn trace(&self, path: &Path) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for op in path.ops() {
            match *op {
                PathOp::MoveTo(p) => ctx.move_to(p.x as f64, p.y as f64),
                PathOp::LineTo(p) => ctx.line_to(p.x as f64, p.y as f64),
                PathOp::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => {
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        radius.max(0.0) as f64,
                        start as f64,
                        end as f64,
                    );
                }
                PathOp::RoundRect { rect, radius } => self.trace_round_rect(rect, radius),
                PathOp::Close => ctx.close_path(),
            }
        }
    }

    fn trace_round_rect(&self, rect: Region, radius: f32) {
        let ctx = &self.ctx;
        let r = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0) as f64;
        let (x, y, right, bottom) = (
            rect.x as f64,
            rect.y as f64,
            rect.right() as f64,
            rect.bottom() as f64,
        );
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(right, y, right, bottom, r);
        let _ = ctx.arc_to(right, bottom, x, bottom, r);
        let _ = ctx.arc_to(x, bottom, x, y, r);
        let _ = ctx.arc_to(x, y, right, y, r);
        ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_blend(&mut self, blend: Blend) {
        let _ = self.ctx.set_global_composite_operation(blend.as_css());
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        let array: js_sys::Array = segments.iter().map(|s| JsValue::from_f64(*s as f64)).collect();
        let _ = self.ctx.set_line_dash(&array);
    }

    fn fill_rect(&mut self, rect: Region, paint: &Paint) {
        self.set_fill(paint);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn stroke_rect(&mut self, rect: Region, stroke: &Stroke) {
        self.set_stroke(stroke);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.set_fill(paint);
        self.trace(path);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.set_stroke(stroke);
        self.trace(path);
        self.ctx.stroke();
    }

    fn clip(&mut self, path: &Path) {
        self.trace(path);
        self.ctx.clip();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &Font, paint: &Paint) {
        self.set_fill(paint);
        self.ctx.set_font(&font.css());
        self.ctx.set_text_align(match font.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline(match font.baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        });
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
