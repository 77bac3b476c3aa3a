//! Wire and battery scene drawing

use glam::Vec2;

use super::color::{Color, palette};
use super::common::{IonStyle, draw_caption, draw_electrons, draw_ion, fill_background};
use super::surface::{Font, Paint, Path, Stroke, Surface};
use crate::sim::Region;
use crate::sim::wire::{WIRE_CENTER_Y, WIRE_END_X, WIRE_START_X, WireScene};

const ION_STYLE: IonStyle = IonStyle::new(6.0, 12.0, 0.15, 9.0);
const CELL_INSET: f32 = 75.0;
const ARROW_COUNT: usize = 8;

pub fn draw(scene: &WireScene, surface: &mut dyn Surface) {
    fill_background(surface);
    draw_wire(surface);
    for ion in &scene.ions {
        draw_ion(surface, ion.pos, &ION_STYLE);
    }

    let (glow, halo) = if scene.voltage_on() {
        (palette::AMBER, Color::rgba(202, 138, 4, 0.45))
    } else {
        (Color::hex(0x38bdf8), palette::ELECTRON_HALO)
    };
    draw_electrons(
        surface,
        scene.electrons.iter().map(|e| e.pos),
        glow,
        halo,
        Color::hex(0xf9fafb),
    );

    draw_battery(scene, surface);
    draw_caption(
        surface,
        340.0,
        "With a potential difference",
        &[
            "delocalised electrons drift, forming an",
            "electric current through the metal.",
        ],
    );
}

fn draw_wire(surface: &mut dyn Surface) {
    let start = Vec2::new(WIRE_START_X, WIRE_CENTER_Y);
    let end = Vec2::new(WIRE_END_X, WIRE_CENTER_Y);
    let line = Path::new().move_to(start).line_to(end);

    let outer = Paint::linear(
        Vec2::new(WIRE_START_X, 0.0),
        Vec2::new(WIRE_END_X, 0.0),
        &[
            (0.0, palette::SLATE_900),
            (0.5, palette::SLATE_600),
            (1.0, palette::NIGHT),
        ],
    );
    surface.stroke_path(&line, &Stroke::new(outer, 30.0).round());

    let inner = Paint::linear(
        Vec2::new(WIRE_START_X, 0.0),
        Vec2::new(WIRE_END_X, 0.0),
        &[
            (0.0, Color::hex(0x111827)),
            (0.5, Color::hex(0x6b7280)),
            (1.0, Color::hex(0x0b1120)),
        ],
    );
    surface.stroke_path(&line, &Stroke::new(inner, 18.0).round());
}

fn draw_battery(scene: &WireScene, surface: &mut dyn Surface) {
    let width = surface.size().x;
    let left_x = CELL_INSET;
    let right_x = width - CELL_INSET;
    let y = WIRE_CENTER_Y;

    surface.set_line_dash(&[10.0, 8.0]);
    let leads = Path::new()
        .move_to(Vec2::new(left_x + 25.0, y))
        .line_to(Vec2::new(WIRE_START_X - 5.0, y))
        .move_to(Vec2::new(WIRE_END_X + 5.0, y))
        .line_to(Vec2::new(right_x - 25.0, y));
    surface.stroke_path(&leads, &Stroke::new(Color::hex(0x4ade80), 3.0));
    surface.set_line_dash(&[]);

    draw_cell(surface, left_x, y, "+");
    draw_cell(surface, right_x, y, "–");

    if scene.voltage_on() {
        let span = WIRE_END_X - WIRE_START_X;
        let stroke = Stroke::new(palette::AMBER, 2.0);
        for i in 0..ARROW_COUNT {
            let t = (scene.time * 0.8 + i as f32 / ARROW_COUNT as f32).fract() * span;
            let tip = Vec2::new(WIRE_START_X + t + 8.0, y - 26.0);
            let arrow = Path::new()
                .move_to(tip - Vec2::new(16.0, 0.0))
                .line_to(tip)
                .line_to(tip + Vec2::new(-6.0, -5.0))
                .move_to(tip)
                .line_to(tip + Vec2::new(-6.0, 5.0));
            surface.stroke_path(&arrow, &stroke);
        }
    }
}

fn draw_cell(surface: &mut dyn Surface, x: f32, y: f32, polarity: &str) {
    let body = Path::round_rect(Region::new(x - 18.0, y - 22.0, 36.0, 44.0), 8.0);
    let fill = Paint::linear(
        Vec2::new(x - 20.0, 0.0),
        Vec2::new(x + 20.0, 0.0),
        &[
            (0.0, palette::NIGHT),
            (0.5, Color::hex(0x16a34a)),
            (1.0, palette::NIGHT),
        ],
    );
    surface.fill_path(&body, &fill);
    surface.stroke_path(&body, &Stroke::new(palette::GREEN, 2.0));
    surface.fill_text(
        polarity,
        Vec2::new(x, y),
        &Font::centered(13.0),
        &Color::hex(0xbbf7d0).into(),
    );
}
