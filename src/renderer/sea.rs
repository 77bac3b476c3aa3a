//! Sea of electrons scene drawing

use glam::Vec2;

use super::color::{Color, palette};
use super::common::{IonStyle, draw_caption, draw_electrons, draw_ion, fill_background};
use super::surface::{Paint, Stroke, Surface};
use crate::sim::Region;
use crate::sim::sea::{SEA_REGION, SeaScene};

const ION_STYLE: IonStyle = IonStyle::new(10.0, 16.0, 0.05, 12.0);
const BORDER_PAD: f32 = 70.0;
const HOT_GLOW: Color = Color::rgba(251, 146, 60, 0.95);
const HOT_HALO: Color = Color::rgba(124, 45, 18, 0.5);

pub fn draw(scene: &SeaScene, surface: &mut dyn Surface) {
    fill_background(surface);

    let size = surface.size();
    surface.stroke_rect(
        Region::new(
            BORDER_PAD,
            BORDER_PAD,
            size.x - BORDER_PAD * 2.0,
            size.y - BORDER_PAD * 2.0,
        ),
        &Stroke::new(Color::rgba(148, 163, 184, 0.75), 2.0),
    );

    draw_heat_front(scene, surface);

    for ion in &scene.ions {
        let heat = scene.heat_at(ion.pos.x);
        // Hot ions vibrate about their lattice site
        let shake = Vec2::new(
            (scene.time * 23.0 + ion.base.y).sin(),
            (scene.time * 19.0 + ion.base.x).cos(),
        ) * 1.5
            * heat;
        let style = ION_STYLE.tinted(palette::GRAY_200.mix(palette::HEAT, heat * 0.6));
        draw_ion(surface, ion.pos + shake, &style);
    }

    let front_x = scene.front_x();
    draw_electrons(
        surface,
        scene.electrons.iter().filter(|e| e.pos.x >= front_x).map(|e| e.pos),
        palette::ELECTRON_GLOW,
        palette::ELECTRON_HALO,
        palette::ELECTRON_CORE,
    );
    draw_electrons(
        surface,
        scene.electrons.iter().filter(|e| e.pos.x < front_x).map(|e| e.pos),
        HOT_GLOW,
        HOT_HALO,
        Color::hex(0xffedd5),
    );

    if scene.heating() || scene.heat_front() > 0.0 {
        draw_caption(
            surface,
            280.0,
            "Heating one end",
            &["energy spreads quickly as the fast", "delocalised electrons collide."],
        );
    } else {
        draw_caption(
            surface,
            260.0,
            "Delocalised electrons",
            &["move freely through the giant", "lattice of positive metal ions."],
        );
    }
}

/// Warm band from the left edge to the front, fading at the front
fn draw_heat_front(scene: &SeaScene, surface: &mut dyn Surface) {
    if scene.heat_front() <= 0.0 {
        return;
    }
    let front_x = scene.front_x();
    let paint = Paint::linear(
        Vec2::new(SEA_REGION.x, 0.0),
        Vec2::new(front_x, 0.0),
        &[
            (0.0, Color::rgba(249, 115, 22, 0.22)),
            (0.85, Color::rgba(249, 115, 22, 0.12)),
            (1.0, Color::rgba(249, 115, 22, 0.0)),
        ],
    );
    surface.fill_rect(
        Region::new(SEA_REGION.x, SEA_REGION.y, front_x - SEA_REGION.x, SEA_REGION.h),
        &paint,
    );
}
