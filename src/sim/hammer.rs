//! Hammer strike cycle flattening a block of metal (malleability)
//!
//! The cycle is fixed: Idle (2.5s) -> Strike (1.6s) -> Hold (2.0s) ->
//! Recover (1.2s) -> Idle. Each strike adds to two accumulators that persist
//! across frames: `flatten_amount` (layers sliding sideways) and
//! `compaction_level` (rows pressed together).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::easing::{ease_out_bounce, ease_out_cubic, ease_out_quad, lerp};
use super::particles::{Ion, lattice};
use super::region::Region;
use crate::sanitize_dt;

/// Ions never leave this box, however deformed
pub const HAMMER_BOUNDS: Region = Region::new(60.0, 100.0, 780.0, 340.0);

pub const LATTICE_COLS: u32 = 10;
pub const LATTICE_ROWS: u32 = 6;
const LATTICE_ORIGIN: Vec2 = Vec2::new(140.0, 170.0);
const LATTICE_GAP: Vec2 = Vec2::new(55.0, 45.0);
/// Depth over which persistent flattening ramps from the top row down.
/// Deeper than the lattice, so the bottom row squashes less than the top.
const FLATTEN_DEPTH: f32 = 260.0;

pub const FLATTEN_MAX: f32 = 1.1;
pub const COMPACTION_MAX: f32 = 1.0;
/// Flattening relaxes toward this between strikes
pub const FLATTEN_REST: f32 = 0.15;

/// Phase-time tolerance for float accumulation
const PHASE_EPSILON: f32 = 1e-4;

/// Phases of the strike cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HammerPhase {
    /// Hammer raised, lattice relaxing
    Idle,
    /// Hammer coming down and hitting the metal
    Strike,
    /// Hammer resting on the metal
    Hold,
    /// Hammer lifting away
    Recover,
}

impl HammerPhase {
    /// Seconds spent in this phase
    pub fn duration(self) -> f32 {
        match self {
            HammerPhase::Idle => 2.5,
            HammerPhase::Strike => 1.6,
            HammerPhase::Hold => 2.0,
            HammerPhase::Recover => 1.2,
        }
    }

    pub fn next(self) -> Self {
        match self {
            HammerPhase::Idle => HammerPhase::Strike,
            HammerPhase::Strike => HammerPhase::Hold,
            HammerPhase::Hold => HammerPhase::Recover,
            HammerPhase::Recover => HammerPhase::Idle,
        }
    }

    /// Length of one full cycle
    pub fn cycle_duration() -> f32 {
        [
            HammerPhase::Idle,
            HammerPhase::Strike,
            HammerPhase::Hold,
            HammerPhase::Recover,
        ]
        .iter()
        .map(|p| p.duration())
        .sum()
    }
}

#[derive(Debug, Clone)]
pub struct HammerScene {
    pub time: f32,
    pub phase: HammerPhase,
    /// Seconds since entering `phase`
    pub phase_time: f32,
    pub flatten_amount: f32,
    pub compaction_level: f32,
    pub ions: Vec<Ion>,
}

impl Default for HammerScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HammerScene {
    pub fn new() -> Self {
        let mut scene = Self {
            time: 0.0,
            phase: HammerPhase::Idle,
            phase_time: 0.0,
            flatten_amount: 0.0,
            compaction_level: 0.0,
            ions: Vec::new(),
        };
        scene.reset();
        scene
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.phase = HammerPhase::Idle;
        self.phase_time = 0.0;
        self.flatten_amount = 0.0;
        self.compaction_level = 0.0;
        self.ions = lattice(LATTICE_COLS, LATTICE_ROWS, LATTICE_ORIGIN, LATTICE_GAP);
    }

    pub fn update(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        self.time += dt;
        self.phase_time += dt;

        match self.phase {
            HammerPhase::Strike => {
                let hit = (self.phase_time / 1.0).clamp(0.0, 1.0);
                let added_flatten = 0.25 * ease_out_bounce(hit);
                self.flatten_amount =
                    (self.flatten_amount + added_flatten * dt * 2.0).clamp(0.0, FLATTEN_MAX);

                // Deeper hits press the rows closer together
                let added_compaction = 0.18 * ease_out_cubic(hit);
                self.compaction_level = (self.compaction_level + added_compaction * dt * 1.6)
                    .clamp(0.0, COMPACTION_MAX);
            }
            HammerPhase::Idle | HammerPhase::Recover => {
                self.flatten_amount = lerp(self.flatten_amount, FLATTEN_REST, dt * 0.6)
                    .clamp(0.0, FLATTEN_MAX);
            }
            HammerPhase::Hold => {}
        }

        // A long frame can cross several phases
        while self.phase_time + PHASE_EPSILON >= self.phase.duration() {
            self.phase_time = (self.phase_time - self.phase.duration()).max(0.0);
            self.phase = self.phase.next();
            if self.phase == HammerPhase::Idle {
                self.flatten_amount = 0.0;
            }
        }

        self.layout_ions();
    }

    /// Combined deformation used to size the metal slab
    pub fn deformation(&self) -> f32 {
        (self.flatten_amount * 0.9 + self.compaction_level * 0.7).clamp(0.0, 1.2)
    }

    fn layout_ions(&mut self) {
        let row_center = (LATTICE_ROWS - 1) as f32 / 2.0;

        for ion in &mut self.ions {
            let mut offset = Vec2::ZERO;
            // 0 for the top row, growing with depth
            let level = (ion.base.y - LATTICE_ORIGIN.y) / FLATTEN_DEPTH;

            // Squash and sideways shove while the hammer is in contact
            if self.phase == HammerPhase::Strike {
                let impact = (1.0 - (ion.base.y - 200.0).abs() / 110.0).max(0.0);
                let local = ease_out_bounce(self.phase_time / 0.8);
                offset.y += lerp(0.0, 10.0 * impact, local);
                offset.x += lerp(0.0, -6.0 * impact, ease_out_quad(self.phase_time));
            }

            // Persistent flattening: top layers move down, bottom layers up
            let f = self.flatten_amount;
            if f > 0.0 {
                let squash = level - 0.5;
                offset.y += -32.0 * f * squash;
                offset.x += 30.0 * f * squash;
            }

            // Rows pulled toward the middle, with a slight interlocking shuffle
            if self.compaction_level > 0.0 {
                let row_offset = ion.row as f32 - row_center;
                offset.y += -row_offset * 10.0 * self.compaction_level;
                offset.x += row_offset * 4.0 * self.compaction_level;
            }

            let jiggle = (self.time * 6.0 + ion.base.x).sin() * 0.75;
            offset.x += jiggle;

            ion.pos = HAMMER_BOUNDS.clamp_point(ion.base + offset);
        }
    }
}
