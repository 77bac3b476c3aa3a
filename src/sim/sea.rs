//! Sea of delocalised electrons around a fixed ion lattice
//!
//! A heat front can sweep across the metal from the left. Electrons behind
//! the front get bigger random kicks and a higher speed limit, which reads
//! on screen as energy being conducted through the electron sea.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles::{Electron, Ion, lattice};
use super::region::Region;
use crate::sanitize_dt;

/// Region the electrons roam in
pub const SEA_REGION: Region = Region::new(80.0, 90.0, 740.0, 340.0);

pub const ELECTRON_COUNT: usize = 80;
pub const LATTICE_COLS: u32 = 9;
pub const LATTICE_ROWS: u32 = 5;
const LATTICE_ORIGIN: Vec2 = Vec2::new(110.0, 120.0);
const LATTICE_GAP: Vec2 = Vec2::new(70.0, 65.0);

/// Initial velocity components are drawn from ±INITIAL_SPEED / 2
const INITIAL_SPEED: f32 = 40.0;

/// Speed limit for electrons ahead of the heat front
pub const COOL_SPEED_LIMIT: f32 = 60.0;
/// Speed limit for electrons behind the heat front
pub const HOT_SPEED_LIMIT: f32 = 110.0;

/// Per-update probability and size (full width) of a random kick
const COOL_KICK_CHANCE: f32 = 0.03;
const COOL_KICK: f32 = 25.0;
const HOT_KICK_CHANCE: f32 = 0.08;
const HOT_KICK: f32 = 90.0;

/// Heat front speed as a fraction of the region width per second
pub const HEAT_ADVANCE_RATE: f32 = 0.35;
pub const HEAT_RECEDE_RATE: f32 = 0.6;

/// Width of the soft edge used when shading the front (canvas units)
const HEAT_EDGE: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct SeaScene {
    pub time: f32,
    pub ions: Vec<Ion>,
    pub electrons: Vec<Electron>,
    heating: bool,
    /// How far the heat has travelled, 0 (none) to 1 (whole width)
    heat_front: f32,
    rng: Pcg32,
}

impl SeaScene {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(rng: Pcg32) -> Self {
        let mut scene = Self {
            time: 0.0,
            ions: Vec::new(),
            electrons: Vec::new(),
            heating: false,
            heat_front: 0.0,
            rng,
        };
        scene.reset();
        scene
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.heating = false;
        self.heat_front = 0.0;
        self.ions = lattice(LATTICE_COLS, LATTICE_ROWS, LATTICE_ORIGIN, LATTICE_GAP);

        let rng = &mut self.rng;
        self.electrons = (0..ELECTRON_COUNT)
            .map(|_| Electron {
                pos: Vec2::new(
                    SEA_REGION.x + rng.random::<f32>() * SEA_REGION.w,
                    SEA_REGION.y + rng.random::<f32>() * SEA_REGION.h,
                ),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * INITIAL_SPEED,
                    (rng.random::<f32>() - 0.5) * INITIAL_SPEED,
                ),
            })
            .collect();
    }

    pub fn update(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        self.time += dt;

        self.heat_front = if self.heating {
            self.heat_front + HEAT_ADVANCE_RATE * dt
        } else {
            self.heat_front - HEAT_RECEDE_RATE * dt
        }
        .clamp(0.0, 1.0);

        let front_x = self.front_x();
        for e in &mut self.electrons {
            e.pos += e.vel * dt;
            SEA_REGION.reflect(&mut e.pos, &mut e.vel);

            let hot = e.pos.x < front_x;
            let (chance, kick, limit) = if hot {
                (HOT_KICK_CHANCE, HOT_KICK, HOT_SPEED_LIMIT)
            } else {
                (COOL_KICK_CHANCE, COOL_KICK, COOL_SPEED_LIMIT)
            };

            if self.rng.random::<f32>() < chance {
                e.vel.x += (self.rng.random::<f32>() - 0.5) * kick;
                e.vel.y += (self.rng.random::<f32>() - 0.5) * kick;
            }
            e.vel = e.vel.clamp_length_max(limit);
        }
    }

    pub fn heating(&self) -> bool {
        self.heating
    }

    pub fn set_heating(&mut self, on: bool) {
        if self.heating != on {
            log::debug!("sea heating {}", if on { "on" } else { "off" });
        }
        self.heating = on;
    }

    pub fn toggle_heating(&mut self) {
        self.set_heating(!self.heating);
    }

    /// Heat front progress in [0, 1]
    pub fn heat_front(&self) -> f32 {
        self.heat_front
    }

    /// Canvas x of the heat front
    pub fn front_x(&self) -> f32 {
        SEA_REGION.x + self.heat_front * SEA_REGION.w
    }

    /// Speed limit that applies at a position
    pub fn speed_limit_at(&self, pos: Vec2) -> f32 {
        if pos.x < self.front_x() {
            HOT_SPEED_LIMIT
        } else {
            COOL_SPEED_LIMIT
        }
    }

    /// Smoothed heat level at canvas x, for shading (0 cold, 1 hot)
    pub fn heat_at(&self, x: f32) -> f32 {
        if self.heat_front <= 0.0 {
            return 0.0;
        }
        ((self.front_x() - x) / HEAT_EDGE + 0.5).clamp(0.0, 1.0)
    }
}
