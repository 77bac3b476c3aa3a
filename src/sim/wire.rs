//! Electrons drifting along a wire when a potential difference is applied

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles::{DriftElectron, Ion, lattice};
use super::region::Region;
use crate::consts::CANVAS_HEIGHT;
use crate::sanitize_dt;

pub const WIRE_START_X: f32 = 120.0;
pub const WIRE_END_X: f32 = 780.0;
pub const WIRE_CENTER_Y: f32 = CANVAS_HEIGHT / 2.0 + 10.0;

/// Electrons wrap around inside this box
pub const WIRE_BOUNDS: Region = Region::new(
    WIRE_START_X + 12.0,
    WIRE_CENTER_Y - 30.0,
    WIRE_END_X - WIRE_START_X - 24.0,
    60.0,
);

pub const ELECTRON_COUNT: usize = 70;
pub const ION_COLS: u32 = 11;
pub const ION_ROWS: u32 = 3;
const ION_GAP_Y: f32 = 26.0;

/// Drift speed range (canvas units / s)
pub const MIN_BASE_SPEED: f32 = 45.0;
pub const MAX_BASE_SPEED: f32 = 70.0;

/// Seconds for the drift to ramp in after switching on
pub const DRIFT_RAMP: f32 = 1.5;
/// Drift fraction the instant the voltage comes on
const DRIFT_FLOOR: f32 = 0.15;

const JITTER_X: f32 = 28.0;
const JITTER_Y: f32 = 18.0;

#[derive(Debug, Clone)]
pub struct WireScene {
    pub time: f32,
    pub ions: Vec<Ion>,
    pub electrons: Vec<DriftElectron>,
    voltage_on: bool,
    /// Seconds since the voltage was last switched on
    voltage_time: f32,
    rng: Pcg32,
}

impl WireScene {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(rng: Pcg32) -> Self {
        let mut scene = Self {
            time: 0.0,
            ions: Vec::new(),
            electrons: Vec::new(),
            voltage_on: false,
            voltage_time: 0.0,
            rng,
        };
        scene.reset();
        scene
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.voltage_on = false;
        self.voltage_time = 0.0;

        let gap_x = (WIRE_END_X - WIRE_START_X) / (ION_COLS - 1) as f32;
        let origin = Vec2::new(WIRE_START_X, WIRE_CENTER_Y - ION_GAP_Y);
        self.ions = lattice(ION_COLS, ION_ROWS, origin, Vec2::new(gap_x, ION_GAP_Y));

        let rng = &mut self.rng;
        self.electrons = (0..ELECTRON_COUNT)
            .map(|_| DriftElectron {
                pos: Vec2::new(
                    WIRE_BOUNDS.x + rng.random::<f32>() * WIRE_BOUNDS.w,
                    WIRE_BOUNDS.y + rng.random::<f32>() * WIRE_BOUNDS.h,
                ),
                base_speed: rng.random_range(MIN_BASE_SPEED..MAX_BASE_SPEED),
                offset: rng.random::<f32>() * std::f32::consts::TAU,
                drift: 0.0,
                travelled: 0.0,
            })
            .collect();
    }

    pub fn update(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        self.time += dt;
        if self.voltage_on {
            self.voltage_time += dt;
        }

        let drift_factor = self.drift_factor();
        for e in &mut self.electrons {
            let jitter_x = (self.time * 4.0 + e.offset).cos() * JITTER_X;
            let jitter_y = (self.time * 5.0 + e.offset).sin() * JITTER_Y;

            e.drift = e.base_speed * drift_factor;
            let dx = (e.drift + jitter_x) * dt;
            e.pos.x += dx;
            e.pos.y += jitter_y * dt;
            e.travelled += dx;

            e.pos = WIRE_BOUNDS.wrap_point(e.pos);
        }
    }

    /// Fraction of base speed the electrons currently drift at
    pub fn drift_factor(&self) -> f32 {
        if self.voltage_on {
            (self.voltage_time / DRIFT_RAMP).clamp(DRIFT_FLOOR, 1.0)
        } else {
            0.0
        }
    }

    pub fn voltage_on(&self) -> bool {
        self.voltage_on
    }

    pub fn set_voltage(&mut self, on: bool) {
        if self.voltage_on != on {
            self.voltage_time = 0.0;
            log::debug!("wire voltage {}", if on { "on" } else { "off" });
        }
        self.voltage_on = on;
    }

    pub fn toggle_voltage(&mut self) {
        self.set_voltage(!self.voltage_on);
    }

    /// Average drift velocity applied on the last update
    pub fn mean_drift_velocity(&self) -> f32 {
        if self.electrons.is_empty() {
            return 0.0;
        }
        self.electrons.iter().map(|e| e.drift).sum::<f32>() / self.electrons.len() as f32
    }

    pub fn mean_base_speed(&self) -> f32 {
        if self.electrons.is_empty() {
            return 0.0;
        }
        self.electrons.iter().map(|e| e.base_speed).sum::<f32>() / self.electrons.len() as f32
    }

    /// Average net horizontal travel since reset, ignoring wraparound
    pub fn mean_displacement(&self) -> f32 {
        if self.electrons.is_empty() {
            return 0.0;
        }
        self.electrons.iter().map(|e| e.travelled).sum::<f32>() / self.electrons.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_in_bounds() {
        let scene = WireScene::new(11);
        assert_eq!(scene.ions.len(), (ION_COLS * ION_ROWS) as usize);
        for e in &scene.electrons {
            assert!(WIRE_BOUNDS.contains(e.pos));
            assert!(e.base_speed >= MIN_BASE_SPEED && e.base_speed < MAX_BASE_SPEED);
        }
    }

    #[test]
    fn test_no_net_drift_without_voltage() {
        let mut scene = WireScene::new(12);
        for _ in 0..60 * 60 {
            scene.update(1.0 / 60.0);
        }
        // Jitter integrates to at most 2 * 28 / 4 = 14 units
        assert!(scene.mean_displacement().abs() < 14.5);
        assert_eq!(scene.mean_drift_velocity(), 0.0);
    }

    #[test]
    fn test_drift_ramps_in_with_voltage() {
        let mut scene = WireScene::new(13);
        scene.toggle_voltage();
        scene.update(0.1);
        let early = scene.mean_drift_velocity();
        assert!(early > 0.0);
        assert!(early < scene.mean_base_speed() * 0.2);

        for _ in 0..100 {
            scene.update(0.016);
        }
        assert!((scene.mean_drift_velocity() - scene.mean_base_speed()).abs() < 1e-3);
    }

    #[test]
    fn test_net_drift_with_voltage() {
        let mut scene = WireScene::new(14);
        scene.set_voltage(true);
        for _ in 0..60 * 10 {
            scene.update(1.0 / 60.0);
        }
        // Ten seconds at close to full drift speed
        assert!(scene.mean_displacement() > MIN_BASE_SPEED * 8.0);
        for e in &scene.electrons {
            assert!(WIRE_BOUNDS.contains(e.pos));
        }
    }

    #[test]
    fn test_toggle_restarts_ramp() {
        let mut scene = WireScene::new(15);
        scene.toggle_voltage();
        scene.update(2.0);
        assert_eq!(scene.drift_factor(), 1.0);
        scene.toggle_voltage();
        assert_eq!(scene.drift_factor(), 0.0);
        scene.toggle_voltage();
        assert_eq!(scene.drift_factor(), DRIFT_FLOOR);
    }

    #[test]
    fn test_reset_switches_voltage_off() {
        let mut scene = WireScene::new(16);
        scene.set_voltage(true);
        scene.update(1.0);
        scene.reset();
        assert!(!scene.voltage_on());
        assert_eq!(scene.mean_displacement(), 0.0);
    }
}
