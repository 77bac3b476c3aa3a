//! Hammer and anvil scene drawing

use glam::Vec2;

use super::color::{Color, palette};
use super::common::{IonStyle, draw_caption, draw_ion, fill_background};
use super::surface::{Paint, Path, Stroke, Surface};
use crate::sim::hammer::{HammerPhase, HammerScene};
use crate::sim::{Region, ease_out_cubic, lerp};

const ION_STYLE: IonStyle = IonStyle::new(8.0, 17.6, 0.1, 10.0);

/// Anvil top surface after the anvil's own 40 unit offset
const ANVIL_TOP_Y: f32 = 340.0;
const SLAB_GAP: f32 = 12.0;
const SLAB_BASE_HEIGHT: f32 = 110.0;
const HAMMER_X: f32 = 430.0;

pub fn draw(scene: &HammerScene, surface: &mut dyn Surface) {
    fill_background(surface);
    draw_anvil(surface);
    draw_metal(scene, surface);
    draw_hammer(scene, surface);
    draw_caption(
        surface,
        310.0,
        "Layers of ions",
        &["can slide but the metallic", "bonding holds the lattice together."],
    );
}

fn draw_anvil(surface: &mut dyn Surface) {
    surface.save();
    surface.translate(Vec2::new(0.0, 40.0));

    let foot = Path::polygon(&[
        Vec2::new(120.0, 330.0),
        Vec2::new(780.0, 330.0),
        Vec2::new(740.0, 380.0),
        Vec2::new(160.0, 380.0),
    ]);
    surface.fill_path(&foot, &palette::NIGHT.into());

    let top = Paint::linear(
        Vec2::new(0.0, 300.0),
        Vec2::new(0.0, 350.0),
        &[(0.0, palette::SLATE_800), (1.0, palette::NIGHT)],
    );
    surface.fill_rect(Region::new(110.0, 300.0, 700.0, 40.0), &top);

    let body = Paint::linear(
        Vec2::new(0.0, 340.0),
        Vec2::new(0.0, 420.0),
        &[(0.0, palette::NIGHT), (1.0, Color::BLACK)],
    );
    surface.fill_rect(Region::new(200.0, 340.0, 520.0, 80.0), &body);

    surface.restore();
}

/// The slab gets lower and wider as the lattice deforms
fn draw_metal(scene: &HammerScene, surface: &mut dyn Surface) {
    let size = surface.size();
    let mid_x = size.x / 2.0;
    let base_half_width = (size.x - 380.0) / 2.0;

    let deformation = scene.deformation();
    let height = SLAB_BASE_HEIGHT - 34.0 * deformation;
    let bottom = ANVIL_TOP_Y - SLAB_GAP;
    let top = bottom - height;
    let half_width = base_half_width + 42.0 * deformation;
    let left = mid_x - half_width;
    let right = mid_x + half_width;

    surface.save();
    let slab = Path::polygon(&[
        Vec2::new(left, top),
        Vec2::new(right, top),
        Vec2::new(right + 10.0, bottom),
        Vec2::new(left - 10.0, bottom),
    ]);
    let fill = Paint::linear(
        Vec2::new(left, top),
        Vec2::new(right, bottom),
        &[
            (0.0, Color::hex(0x1f2937)),
            (0.5, palette::SLATE_600),
            (1.0, Color::hex(0x111827)),
        ],
    );
    surface.fill_path(&slab, &fill);
    surface.clip(&slab);

    for ion in &scene.ions {
        draw_ion(surface, ion.pos, &ION_STYLE);
    }
    surface.restore();

    surface.stroke_rect(
        Region::new(left, top, right - left, bottom - top),
        &Stroke::new(Color::rgba(148, 163, 184, 0.9), 3.0),
    );
}

fn draw_hammer(scene: &HammerScene, surface: &mut dyn Surface) {
    let t = scene.phase_time.clamp(0.0, 1.3);
    let mut hammer_y = lerp(-200.0, 110.0, ease_out_cubic(t.min(1.0)));

    let striking = scene.phase == HammerPhase::Strike;
    if striking && scene.phase_time > 0.4 {
        let rebound = (1.2 - (scene.phase_time - 0.4) * 3.0).max(0.0);
        hammer_y -= rebound * 14.0;
    }
    let swing_x = HAMMER_X + (scene.time * 1.2).sin() * 8.0;

    surface.save();
    surface.translate(Vec2::new(swing_x, hammer_y));
    surface.fill_rect(Region::new(-10.0, -10.0, 20.0, 140.0), &Color::hex(0x0b1120).into());
    surface.fill_rect(Region::new(-9.0, -9.0, 18.0, 138.0), &palette::SLATE_800.into());

    let head = Paint::linear(
        Vec2::new(-70.0, 0.0),
        Vec2::new(70.0, 0.0),
        &[
            (0.0, palette::SLATE_500),
            (0.5, Color::hex(0xcbd5f5)),
            (1.0, palette::SLATE_600),
        ],
    );
    surface.fill_path(&Path::round_rect(Region::new(-70.0, -30.0, 140.0, 40.0), 10.0), &head);
    surface.restore();

    if striking && scene.phase_time > 0.2 && scene.phase_time < 0.9 {
        let impact = (scene.phase_time - 0.2) / 0.7;
        surface.save();
        surface.set_alpha((1.0 - impact) * 0.8);
        let ring = Stroke::new(palette::AMBER, 2.0);
        for i in 0..3 {
            surface.stroke_circle(Vec2::new(HAMMER_X, 180.0), 60.0 + i as f32 * 10.0 * impact, &ring);
        }
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::{CommandRecorder, DrawCommand};

    #[test]
    fn test_ions_are_clipped_to_slab() {
        let scene = HammerScene::new();
        let mut rec = CommandRecorder::default();
        draw(&scene, &mut rec);
        assert!(rec.is_balanced());

        let clip = rec
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Clip(_)))
            .expect("slab clip");
        let first_label = rec
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { text, .. } if text == "+"))
            .expect("ion label");
        assert!(clip < first_label);
    }

    #[test]
    fn test_impact_rings_only_during_strike() {
        let mut scene = HammerScene::new();
        let mut rec = CommandRecorder::default();
        draw(&scene, &mut rec);
        let idle_alpha = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Alpha(_)))
            .count();
        assert_eq!(idle_alpha, 0);

        scene.phase = HammerPhase::Strike;
        scene.phase_time = 0.5;
        rec.clear();
        draw(&scene, &mut rec);
        assert!(rec.commands().iter().any(|c| matches!(c, DrawCommand::Alpha(_))));
    }
}
