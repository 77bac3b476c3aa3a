//! Painters shared by several scenes

use glam::Vec2;

use super::color::{Color, palette};
use super::surface::{Blend, Font, Paint, Stroke, Surface};
use crate::sim::Region;

/// Flat night-sky background over the whole surface
pub fn fill_background(surface: &mut dyn Surface) {
    let size = surface.size();
    let paint = Paint::linear(
        Vec2::ZERO,
        Vec2::new(0.0, size.y),
        &[(0.0, palette::NIGHT), (1.0, palette::NIGHT)],
    );
    surface.fill_rect(Region::new(0.0, 0.0, size.x, size.y), &paint);
}

/// Look of a lattice ion
#[derive(Debug, Clone, Copy)]
pub struct IonStyle {
    pub core_radius: f32,
    pub glow_radius: f32,
    /// Alpha of the glow's outer edge
    pub glow_fade: f32,
    pub label_size: f32,
    /// Core color; plain gray or a heat tint
    pub core: Color,
}

impl IonStyle {
    pub const fn new(core_radius: f32, glow_radius: f32, glow_fade: f32, label_size: f32) -> Self {
        Self {
            core_radius,
            glow_radius,
            glow_fade,
            label_size,
            core: palette::GRAY_200,
        }
    }

    pub fn tinted(mut self, core: Color) -> Self {
        self.core = core;
        self
    }
}

/// A glowing ion with a "+" label
pub fn draw_ion(surface: &mut dyn Surface, pos: Vec2, style: &IonStyle) {
    let glow = Paint::radial(
        pos,
        1.0,
        style.glow_radius,
        &[
            (0.0, palette::ION_GLOW),
            (1.0, Color::rgba(148, 163, 184, style.glow_fade)),
        ],
    );
    surface.fill_circle(pos, style.glow_radius, &glow);
    surface.fill_circle(pos, style.core_radius, &style.core.into());
    surface.fill_text(
        "+",
        pos + Vec2::new(0.0, 0.5),
        &Font::centered(style.label_size),
        &palette::SLATE_900.into(),
    );
}

/// Electrons as additive glows with a bright core
pub fn draw_electrons(
    surface: &mut dyn Surface,
    positions: impl Iterator<Item = Vec2>,
    glow: Color,
    halo: Color,
    core: Color,
) {
    const RADIUS: f32 = 4.0;
    const GLOW_SCALE: f32 = 2.3;

    surface.save();
    surface.set_blend(Blend::Additive);
    for pos in positions {
        let paint = Paint::radial(
            pos,
            0.5,
            RADIUS * GLOW_SCALE,
            &[(0.0, glow), (0.6, halo), (1.0, halo.with_alpha(0.0))],
        );
        surface.fill_circle(pos, RADIUS * GLOW_SCALE, &paint);
        surface.fill_circle(pos, RADIUS, &core.into());
    }
    surface.restore();
}

/// Caption box in the top-left corner: a title and up to a few lines
pub fn draw_caption(surface: &mut dyn Surface, width: f32, title: &str, lines: &[&str]) {
    let height = 38.0 + 16.0 * lines.len() as f32;
    let rect = Region::new(24.0, 22.0, width, height);
    surface.fill_rect(rect, &Color::rgba(15, 23, 42, 0.9).into());
    surface.stroke_rect(rect, &Stroke::new(palette::OUTLINE, 1.0));

    surface.fill_text(title, Vec2::new(38.0, 45.0), &Font::new(14.0), &palette::GRAY_200.into());
    for (i, line) in lines.iter().enumerate() {
        surface.fill_text(
            line,
            Vec2::new(38.0, 64.0 + 16.0 * i as f32),
            &Font::new(12.0),
            &palette::GRAY_400.into(),
        );
    }
}
