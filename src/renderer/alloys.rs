//! Alloy lattice and blade collision drawing

use glam::Vec2;

use super::color::{Color, palette};
use super::common::{IonStyle, draw_caption, draw_ion, fill_background};
use super::surface::{Font, Paint, Path, Stroke, Surface};
use crate::sim::Region;
use crate::sim::alloys::{
    AlloyScene, BLADE_LENGTH, BLADE_Y, CONTACT_X, LATTICE_COLS, LATTICE_GAP, LATTICE_ORIGIN,
    LATTICE_ROWS, MAX_SHEAR, MIN_SHEAR,
};

const ION_STYLE: IonStyle = IonStyle::new(9.0, 15.0, 0.08, 10.0);
const CARBON_RADIUS: f32 = 5.0;
const BLADE_HALF_HEIGHT: f32 = 16.0;
/// How much of the pure blade is left once it shatters
const STUMP_LENGTH: f32 = 70.0;

const STEEL_LIGHT: Color = Color::hex(0xcbd5e1);
const IRON_LIGHT: Color = Color::hex(0xa8a29e);

pub fn draw(scene: &AlloyScene, surface: &mut dyn Surface) {
    fill_background(surface);
    draw_lattice(scene, surface);
    draw_blades(scene, surface);
    draw_fragments(scene, surface);
    draw_gauge(scene, surface);
    draw_caption(
        surface,
        330.0,
        "Carbon atoms distort the lattice",
        &["so layers of iron ions cannot slide", "as easily: the alloy is harder."],
    );
}

fn draw_lattice(scene: &AlloyScene, surface: &mut dyn Surface) {
    let span = LATTICE_GAP * Vec2::new((LATTICE_COLS - 1) as f32, (LATTICE_ROWS - 1) as f32);
    let frame = Region::new(
        LATTICE_ORIGIN.x - 30.0,
        LATTICE_ORIGIN.y - 26.0,
        span.x + 60.0,
        span.y + 52.0,
    );
    surface.fill_rect(frame, &Color::rgba(30, 41, 59, 0.35).into());
    surface.stroke_rect(frame, &Stroke::new(palette::OUTLINE, 1.0));

    for ion in &scene.ions {
        draw_ion(surface, ion.pos, &ION_STYLE);
    }

    for atom in &scene.carbon {
        let halo = Paint::radial(
            atom.pos,
            1.0,
            CARBON_RADIUS * 2.0,
            &[
                (0.0, Color::rgba(250, 204, 21, 0.55)),
                (1.0, Color::rgba(250, 204, 21, 0.0)),
            ],
        );
        surface.fill_circle(atom.pos, CARBON_RADIUS * 2.0, &halo);
        surface.fill_circle(atom.pos, CARBON_RADIUS, &palette::CARBON.into());
        surface.stroke_circle(atom.pos, CARBON_RADIUS, &Stroke::new(palette::AMBER, 1.0));
    }
}

/// Horizontal blade pointing at `tip`, extending `length` away from it
fn blade_path(tip: f32, length: f32, facing_right: bool) -> Path {
    let back = if facing_right { tip - length } else { tip + length };
    let shoulder = if facing_right { tip - 24.0 } else { tip + 24.0 };
    Path::polygon(&[
        Vec2::new(back, BLADE_Y - BLADE_HALF_HEIGHT),
        Vec2::new(shoulder, BLADE_Y - BLADE_HALF_HEIGHT),
        Vec2::new(tip, BLADE_Y),
        Vec2::new(shoulder, BLADE_Y + BLADE_HALF_HEIGHT),
        Vec2::new(back, BLADE_Y + BLADE_HALF_HEIGHT),
    ])
}

/// Top-lit metal, shaded toward the lower edge
fn blade_paint(light: Color) -> Paint {
    Paint::linear(
        Vec2::new(0.0, BLADE_Y - BLADE_HALF_HEIGHT),
        Vec2::new(0.0, BLADE_Y + BLADE_HALF_HEIGHT),
        &[(0.0, light), (0.5, palette::SLATE_500), (1.0, palette::SLATE_800)],
    )
}

fn draw_blades(scene: &AlloyScene, surface: &mut dyn Surface) {
    let outline = Stroke::new(palette::OUTLINE, 1.5);

    // Alloy blade, with one line per fold
    let tip = scene.alloy_tip_x();
    let path = blade_path(tip, BLADE_LENGTH, true);
    surface.fill_path(&path, &blade_paint(STEEL_LIGHT));
    surface.stroke_path(&path, &outline);

    let folds = scene.fold_count();
    if folds > 0 {
        let fold_stroke = Stroke::new(Color::rgba(15, 23, 42, 0.45), 1.0);
        let step = 2.0 * BLADE_HALF_HEIGHT / (folds + 1) as f32;
        let mut lines = Path::new();
        for i in 1..=folds {
            let y = BLADE_Y - BLADE_HALF_HEIGHT + step * i as f32;
            lines = lines
                .move_to(Vec2::new(tip - BLADE_LENGTH + 6.0, y))
                .line_to(Vec2::new(tip - 30.0, y));
        }
        surface.stroke_path(&lines, &fold_stroke);
    }
    label(surface, Vec2::new(tip - BLADE_LENGTH / 2.0, BLADE_Y + 34.0), "steel (alloy)");

    // Pure iron blade: a jagged stump once it has shattered
    let tip = scene.pure_tip_x();
    if scene.pure_blade_broken() {
        let back = tip + BLADE_LENGTH;
        let edge = back - STUMP_LENGTH;
        let stump = Path::polygon(&[
            Vec2::new(back, BLADE_Y - BLADE_HALF_HEIGHT),
            Vec2::new(edge + 6.0, BLADE_Y - BLADE_HALF_HEIGHT),
            Vec2::new(edge - 8.0, BLADE_Y - 6.0),
            Vec2::new(edge + 4.0, BLADE_Y + 2.0),
            Vec2::new(edge - 5.0, BLADE_Y + BLADE_HALF_HEIGHT),
            Vec2::new(back, BLADE_Y + BLADE_HALF_HEIGHT),
        ]);
        surface.fill_path(&stump, &blade_paint(IRON_LIGHT));
        surface.stroke_path(&stump, &outline);
    } else {
        let path = blade_path(tip, BLADE_LENGTH, false);
        surface.fill_path(&path, &blade_paint(IRON_LIGHT));
        surface.stroke_path(&path, &outline);
    }
    label(surface, Vec2::new(tip + BLADE_LENGTH / 2.0, BLADE_Y + 34.0), "pure iron");

    if scene.approach() > 0.98 {
        let flash = Paint::radial(
            Vec2::new(CONTACT_X, BLADE_Y),
            2.0,
            40.0,
            &[(0.0, Color::rgba(254, 240, 138, 0.9)), (1.0, Color::rgba(254, 240, 138, 0.0))],
        );
        surface.fill_circle(Vec2::new(CONTACT_X, BLADE_Y), 40.0, &flash);
    }
}

fn draw_fragments(scene: &AlloyScene, surface: &mut dyn Surface) {
    for f in &scene.fragments {
        surface.save();
        surface.translate(f.pos);
        surface.rotate(f.angle);
        surface.set_alpha(f.life_fraction());
        let s = f.size;
        let shard = Path::polygon(&[
            Vec2::new(-s, -s * 0.4),
            Vec2::new(s, 0.0),
            Vec2::new(-s * 0.3, s * 0.6),
        ]);
        surface.fill_path(&shard, &IRON_LIGHT.into());
        surface.restore();
    }
}

/// Carbon percent and shear strength readout (top right)
fn draw_gauge(scene: &AlloyScene, surface: &mut dyn Surface) {
    let x = surface.size().x - 254.0;
    let panel = Region::new(x, 22.0, 230.0, 70.0);
    surface.fill_rect(panel, &Color::rgba(15, 23, 42, 0.9).into());
    surface.stroke_rect(panel, &Stroke::new(palette::OUTLINE, 1.0));

    let text = format!(
        "Carbon {:.1}%  ·  folds {}",
        scene.carbon_percent(),
        scene.fold_count()
    );
    surface.fill_text(&text, Vec2::new(x + 14.0, 45.0), &Font::new(13.0), &palette::GRAY_200.into());

    let fill = (scene.shear_strength() - MIN_SHEAR) / (MAX_SHEAR - MIN_SHEAR);
    let track = Region::new(x + 14.0, 62.0, 202.0, 10.0);
    surface.fill_rect(track, &palette::SLATE_800.into());
    surface.fill_rect(
        Region::new(track.x, track.y, track.w * fill.clamp(0.0, 1.0), track.h),
        &Paint::linear(
            track.min(),
            Vec2::new(track.right(), track.y),
            &[(0.0, palette::GREEN), (1.0, palette::AMBER)],
        ),
    );
    surface.fill_text(
        &format!("shear strength {:.2}", scene.shear_strength()),
        Vec2::new(x + 14.0, 86.0),
        &Font::new(11.0),
        &palette::GRAY_400.into(),
    );
}

fn label(surface: &mut dyn Surface, pos: Vec2, text: &str) {
    surface.fill_text(text, pos, &Font::centered(12.0), &palette::GRAY_400.into());
}
