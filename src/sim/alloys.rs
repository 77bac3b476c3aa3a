//! Carbon in an iron lattice, and a scripted blade collision
//!
//! Carbon atoms sit in interstitial sites (the centre of each 2x2 quad of
//! iron ions) and push the neighbouring ions outward, which stops layers
//! sliding cleanly. The resulting "shear strength" drives a two-blade
//! collision: the alloy blade on the left survives and recoils, the pure iron
//! blade on the right shatters into fragments.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::easing::{ease_out_cubic, ease_out_quad};
use super::particles::{CarbonAtom, Fragment, Ion, lattice};
use super::region::Region;
use crate::sanitize_dt;

/// Everything in the scene, fragments included, stays in here
pub const ALLOY_BOUNDS: Region = Region::new(30.0, 90.0, 840.0, 400.0);

pub const LATTICE_COLS: u32 = 10;
pub const LATTICE_ROWS: u32 = 6;
pub const LATTICE_ORIGIN: Vec2 = Vec2::new(200.0, 120.0);
pub const LATTICE_GAP: Vec2 = Vec2::new(56.0, 34.0);

pub const MAX_CARBON_PERCENT: f32 = 2.0;
/// Share of interstitial sites filled at the maximum carbon percent
pub const MAX_SITE_FRACTION: f32 = 0.6;
pub const MAX_FOLD_COUNT: u32 = 12;

/// Carbon pushes ions within this radius
pub const INFLUENCE_RADIUS: f32 = 58.0;
const MAX_PUSH: f32 = 9.0;
const PUSH_FALLOFF: f32 = 1.6;

pub const MIN_SHEAR: f32 = 0.6;
pub const MAX_SHEAR: f32 = 2.4;
const SHEAR_BASE: f32 = 1.0;
const SHEAR_PER_PERCENT: f32 = 0.45;
const SHEAR_PER_FOLD: f32 = 0.05;
/// Subtracted once any carbon disrupts the lattice
const DISRUPTION_PENALTY: f32 = 0.2;

/// Blade layout
pub const BLADE_Y: f32 = 400.0;
pub const CONTACT_X: f32 = 450.0;
pub const LEFT_REST_TIP: f32 = 260.0;
pub const RIGHT_REST_TIP: f32 = 640.0;
pub const BLADE_LENGTH: f32 = 180.0;
const MAX_RECOIL: f32 = 18.0;

pub const SWING_DURATION: f32 = 0.9;
pub const IMPACT_DURATION: f32 = 0.35;
pub const COOLDOWN_DURATION: f32 = 2.2;

pub const FRAGMENT_COUNT: usize = 24;
pub const FRAGMENT_GRAVITY: f32 = 520.0;
const FRAGMENT_RESTITUTION: f32 = 0.35;
const FRAGMENT_FRICTION: f32 = 0.7;
const FRAGMENT_MIN_LIFE: f32 = 1.1;
const FRAGMENT_MAX_LIFE: f32 = 1.9;
const FRAGMENT_MAX_SPIN: f32 = 8.0;
const FRAGMENT_BASE_SPEED: f32 = 160.0;
const FRAGMENT_SPEED_PER_SHEAR: f32 = 60.0;

/// Stage of the blade collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPhase {
    /// Blades apart, waiting for a trigger
    Ready,
    /// Blades moving toward each other
    Swing,
    /// Contact: shards fly, alloy blade recoils
    Impact,
    /// Blades withdrawing; counts down to Ready
    Cooldown,
}

#[derive(Debug, Clone)]
pub struct AlloyScene {
    pub time: f32,
    pub ions: Vec<Ion>,
    /// Interstitial site centres, row-major
    pub sites: Vec<Vec2>,
    pub carbon: Vec<CarbonAtom>,
    pub fragments: Vec<Fragment>,
    carbon_percent: f32,
    fold_count: u32,
    phase: CollisionPhase,
    phase_time: f32,
    /// Seconds left before the blades are ready again
    cooldown: f32,
    /// Blade approach, 0 at rest to 1 in contact
    approach: f32,
    recoil: f32,
    pure_blade_broken: bool,
    rng: Pcg32,
}

impl AlloyScene {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(rng: Pcg32) -> Self {
        let mut scene = Self {
            time: 0.0,
            ions: Vec::new(),
            sites: Vec::new(),
            carbon: Vec::new(),
            fragments: Vec::new(),
            carbon_percent: 0.0,
            fold_count: 0,
            phase: CollisionPhase::Ready,
            phase_time: 0.0,
            cooldown: 0.0,
            approach: 0.0,
            recoil: 0.0,
            pure_blade_broken: false,
            rng,
        };
        scene.reset();
        scene
    }

    /// Rebuild the lattice and clear the collision. Carbon percent and fold
    /// count are kept; carbon atoms are placed afresh.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.ions = lattice(LATTICE_COLS, LATTICE_ROWS, LATTICE_ORIGIN, LATTICE_GAP);
        self.sites = interstitial_sites(&self.ions, LATTICE_COLS, LATTICE_ROWS);
        self.fragments.clear();
        self.phase = CollisionPhase::Ready;
        self.phase_time = 0.0;
        self.cooldown = 0.0;
        self.approach = 0.0;
        self.recoil = 0.0;
        self.pure_blade_broken = false;
        self.place_carbon();
    }

    pub fn update(&mut self, dt: f32) {
        let dt = sanitize_dt(dt);
        self.time += dt;
        self.phase_time += dt;

        match self.phase {
            CollisionPhase::Ready => {}
            CollisionPhase::Swing => {
                self.approach = ease_out_cubic(self.phase_time / SWING_DURATION);
                if self.phase_time >= SWING_DURATION {
                    self.enter_impact();
                }
            }
            CollisionPhase::Impact => {
                let t = self.phase_time / IMPACT_DURATION;
                self.recoil = self.max_recoil() * (1.0 - ease_out_quad(t));
                if self.phase_time >= IMPACT_DURATION {
                    self.phase = CollisionPhase::Cooldown;
                    self.phase_time = 0.0;
                    self.cooldown = COOLDOWN_DURATION;
                    self.recoil = 0.0;
                }
            }
            CollisionPhase::Cooldown => {
                self.cooldown = (self.cooldown - dt).max(0.0);
                let withdrawn = 1.0 - self.cooldown / COOLDOWN_DURATION;
                self.approach = 1.0 - ease_out_cubic(withdrawn);
                if self.cooldown <= 0.0 {
                    self.phase = CollisionPhase::Ready;
                    self.phase_time = 0.0;
                    self.approach = 0.0;
                    self.pure_blade_broken = false;
                }
            }
        }

        self.update_fragments(dt);
    }

    /// Start the blade collision; ignored unless the blades are ready
    pub fn trigger_impact(&mut self) -> bool {
        if self.phase != CollisionPhase::Ready {
            return false;
        }
        log::debug!(
            "blade swing at {:.2}% carbon, shear {:.2}",
            self.carbon_percent,
            self.shear_strength()
        );
        self.phase = CollisionPhase::Swing;
        self.phase_time = 0.0;
        self.approach = 0.0;
        true
    }

    pub fn set_carbon_percent(&mut self, percent: f32) {
        let percent = if percent.is_finite() { percent } else { 0.0 };
        self.carbon_percent = percent.clamp(0.0, MAX_CARBON_PERCENT);
        self.place_carbon();
    }

    pub fn carbon_percent(&self) -> f32 {
        self.carbon_percent
    }

    pub fn set_fold_count(&mut self, folds: u32) {
        self.fold_count = folds.min(MAX_FOLD_COUNT);
    }

    pub fn fold_count(&self) -> u32 {
        self.fold_count
    }

    /// Occupied site count for a carbon percent
    pub fn carbon_count_for(&self, percent: f32) -> usize {
        let percent = percent.clamp(0.0, MAX_CARBON_PERCENT);
        let share = MAX_SITE_FRACTION * percent / MAX_CARBON_PERCENT;
        ((self.sites.len() as f32 * share).floor() as usize).min(self.sites.len())
    }

    pub fn max_carbon_count(&self) -> usize {
        self.carbon_count_for(MAX_CARBON_PERCENT)
    }

    /// Resistance of the alloy blade to shearing
    pub fn shear_strength(&self) -> f32 {
        let penalty = if self.carbon.is_empty() {
            0.0
        } else {
            DISRUPTION_PENALTY
        };
        (SHEAR_BASE + SHEAR_PER_PERCENT * self.carbon_percent
            + SHEAR_PER_FOLD * self.fold_count as f32
            - penalty)
            .clamp(MIN_SHEAR, MAX_SHEAR)
    }

    pub fn phase(&self) -> CollisionPhase {
        self.phase
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn approach(&self) -> f32 {
        self.approach
    }

    /// The pure iron blade is the one that shatters, whatever the carbon
    /// percent.
    pub fn pure_blade_broken(&self) -> bool {
        self.pure_blade_broken
    }

    /// Tip x of the alloy blade (left)
    pub fn alloy_tip_x(&self) -> f32 {
        LEFT_REST_TIP + (CONTACT_X - LEFT_REST_TIP) * self.approach - self.recoil
    }

    /// Tip x of the pure iron blade (right)
    pub fn pure_tip_x(&self) -> f32 {
        RIGHT_REST_TIP + (CONTACT_X - RIGHT_REST_TIP) * self.approach
    }

    fn max_recoil(&self) -> f32 {
        MAX_RECOIL / self.shear_strength()
    }

    fn enter_impact(&mut self) {
        self.phase = CollisionPhase::Impact;
        self.phase_time = 0.0;
        self.approach = 1.0;
        self.recoil = self.max_recoil();
        self.pure_blade_broken = true;
        self.spawn_fragments();
    }

    fn spawn_fragments(&mut self) {
        let burst_speed = FRAGMENT_BASE_SPEED + FRAGMENT_SPEED_PER_SHEAR * self.shear_strength();
        let rng = &mut self.rng;
        let origin = Vec2::new(CONTACT_X + 6.0, BLADE_Y);

        self.fragments.extend((0..FRAGMENT_COUNT).map(|_| {
            // Mostly rightward and upward (y grows downward)
            let angle = rng.random_range(-0.45 * std::f32::consts::PI..0.1 * std::f32::consts::PI);
            let speed = burst_speed * rng.random_range(0.6..1.0);
            let life = rng.random_range(FRAGMENT_MIN_LIFE..FRAGMENT_MAX_LIFE);
            Fragment {
                pos: ALLOY_BOUNDS
                    .clamp_point(origin + Vec2::new(0.0, rng.random_range(-12.0..12.0))),
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                angle: rng.random::<f32>() * std::f32::consts::TAU,
                angular_vel: rng.random_range(-FRAGMENT_MAX_SPIN..FRAGMENT_MAX_SPIN),
                life,
                max_life: life,
                size: rng.random_range(3.0..8.0),
            }
        }));
    }

    fn update_fragments(&mut self, dt: f32) {
        for f in &mut self.fragments {
            f.vel.y += FRAGMENT_GRAVITY * dt;
            f.pos += f.vel * dt;
            f.angle += f.angular_vel * dt;
            f.life -= dt;

            if f.pos.y > ALLOY_BOUNDS.bottom() && f.vel.y > 0.0 {
                f.vel.y *= -FRAGMENT_RESTITUTION;
                f.vel.x *= FRAGMENT_FRICTION;
                f.angular_vel *= FRAGMENT_FRICTION;
            }
            ALLOY_BOUNDS.reflect(&mut f.pos, &mut f.vel);
        }
        self.fragments.retain(|f| f.life > 0.0);
    }

    fn place_carbon(&mut self) {
        let count = self.carbon_count_for(self.carbon_percent);
        let mut order: Vec<usize> = (0..self.sites.len()).collect();
        order.shuffle(&mut self.rng);

        let mut chosen: Vec<usize> = order.into_iter().take(count).collect();
        chosen.sort_unstable();
        self.carbon = chosen
            .into_iter()
            .map(|site| CarbonAtom {
                site,
                pos: self.sites[site],
            })
            .collect();

        log::debug!("placed {} carbon atoms in {} sites", count, self.sites.len());
        self.displace_ions();
    }

    fn displace_ions(&mut self) {
        for ion in &mut self.ions {
            let offset: Vec2 = self
                .carbon
                .iter()
                .map(|c| {
                    let away = ion.base - c.pos;
                    let d = away.length();
                    if d >= INFLUENCE_RADIUS || d < f32::EPSILON {
                        Vec2::ZERO
                    } else {
                        away / d * MAX_PUSH * (1.0 - d / INFLUENCE_RADIUS).powf(PUSH_FALLOFF)
                    }
                })
                .sum();
            ion.pos = ALLOY_BOUNDS.clamp_point(ion.base + offset);
        }
    }
}

/// Centroid of each 2x2 quad in a row-major lattice
pub fn interstitial_sites(ions: &[Ion], cols: u32, rows: u32) -> Vec<Vec2> {
    let cols = cols as usize;
    let rows = rows as usize;
    if ions.len() < cols * rows || cols < 2 || rows < 2 {
        return Vec::new();
    }

    let mut sites = Vec::with_capacity((cols - 1) * (rows - 1));
    for row in 0..rows - 1 {
        for col in 0..cols - 1 {
            let i = row * cols + col;
            let quad = ions[i].base + ions[i + 1].base + ions[i + cols].base + ions[i + cols + 1].base;
            sites.push(quad / 4.0);
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(scene: &mut AlloyScene, seconds: f32, dt: f32) {
        let steps = (seconds / dt).round() as u32;
        for _ in 0..steps {
            scene.update(dt);
        }
    }

    #[test]
    fn test_site_count() {
        let scene = AlloyScene::new(1);
        assert_eq!(
            scene.sites.len(),
            ((LATTICE_COLS - 1) * (LATTICE_ROWS - 1)) as usize
        );
        // First site is the centre of the top-left quad
        assert_eq!(scene.sites[0], LATTICE_ORIGIN + LATTICE_GAP / 2.0);
    }

    #[test]
    fn test_zero_carbon_places_nothing() {
        let mut scene = AlloyScene::new(2);
        scene.set_carbon_percent(0.0);
        assert!(scene.carbon.is_empty());
        assert!(scene.ions.iter().all(|i| i.pos == i.base));
    }

    #[test]
    fn test_max_carbon_fills_max_fraction() {
        let mut scene = AlloyScene::new(3);
        scene.set_carbon_percent(2.0);
        assert_eq!(scene.carbon.len(), 27);
        assert_eq!(scene.carbon.len(), scene.max_carbon_count());
        assert!(scene.carbon.len() <= scene.sites.len());

        // Out-of-range input clamps to the same maximum
        scene.set_carbon_percent(50.0);
        assert_eq!(scene.carbon_percent(), MAX_CARBON_PERCENT);
        assert_eq!(scene.carbon.len(), 27);
    }

    #[test]
    fn test_carbon_sites_are_distinct() {
        let mut scene = AlloyScene::new(4);
        scene.set_carbon_percent(1.3);
        let mut sites: Vec<usize> = scene.carbon.iter().map(|c| c.site).collect();
        sites.dedup();
        assert_eq!(sites.len(), scene.carbon.len());
        for c in &scene.carbon {
            assert_eq!(c.pos, scene.sites[c.site]);
        }
    }

    #[test]
    fn test_carbon_pushes_neighbours_outward() {
        let mut scene = AlloyScene::new(5);
        scene.set_carbon_percent(0.2);
        let atom = scene.carbon[0];
        let moved = scene
            .ions
            .iter()
            .filter(|i| i.base.distance(atom.pos) < INFLUENCE_RADIUS)
            .any(|i| i.pos.distance(atom.pos) > i.base.distance(atom.pos));
        assert!(moved);
        for ion in &scene.ions {
            assert!(ALLOY_BOUNDS.contains(ion.pos));
        }
    }

    #[test]
    fn test_shear_strength() {
        let mut scene = AlloyScene::new(6);
        assert!((scene.shear_strength() - SHEAR_BASE).abs() < 1e-6);

        scene.set_carbon_percent(1.0);
        let expected = SHEAR_BASE + SHEAR_PER_PERCENT - DISRUPTION_PENALTY;
        assert!((scene.shear_strength() - expected).abs() < 1e-6);

        scene.set_carbon_percent(2.0);
        scene.set_fold_count(100);
        assert_eq!(scene.fold_count(), MAX_FOLD_COUNT);
        assert!(scene.shear_strength() <= MAX_SHEAR);
    }

    #[test]
    fn test_collision_cycle() {
        let mut scene = AlloyScene::new(7);
        assert!(scene.trigger_impact());
        assert!(!scene.trigger_impact());
        assert_eq!(scene.phase(), CollisionPhase::Swing);

        run(&mut scene, SWING_DURATION + 0.05, 0.05);
        assert_eq!(scene.phase(), CollisionPhase::Impact);
        assert!(scene.pure_blade_broken());
        assert_eq!(scene.fragments.len(), FRAGMENT_COUNT);

        run(&mut scene, IMPACT_DURATION + 0.05, 0.05);
        assert_eq!(scene.phase(), CollisionPhase::Cooldown);
        assert!(scene.cooldown() > 0.0);

        run(&mut scene, COOLDOWN_DURATION + 0.1, 0.05);
        assert_eq!(scene.phase(), CollisionPhase::Ready);
        assert!(!scene.pure_blade_broken());
        assert_eq!(scene.approach(), 0.0);
        // Longest-lived shard is gone well before the cooldown ends
        assert!(scene.fragments.is_empty());
    }

    #[test]
    fn test_pure_blade_breaks_at_any_carbon_percent() {
        for percent in [0.0, 1.0, 2.0] {
            let mut scene = AlloyScene::new(8);
            scene.set_carbon_percent(percent);
            scene.trigger_impact();
            run(&mut scene, SWING_DURATION + 0.1, 0.05);
            assert!(scene.pure_blade_broken());
            assert_eq!(scene.fragments.len(), FRAGMENT_COUNT);
        }
    }

    #[test]
    fn test_fragments_stay_in_bounds() {
        let mut scene = AlloyScene::new(9);
        scene.set_carbon_percent(2.0);
        scene.set_fold_count(MAX_FOLD_COUNT);
        scene.trigger_impact();
        for _ in 0..200 {
            scene.update(1.0 / 60.0);
            for f in &scene.fragments {
                assert!(ALLOY_BOUNDS.contains(f.pos), "{:?}", f.pos);
            }
        }
    }

    #[test]
    fn test_stronger_alloy_recoils_less() {
        let mut soft = AlloyScene::new(10);
        let mut hard = AlloyScene::new(10);
        hard.set_carbon_percent(2.0);
        hard.set_fold_count(8);
        for scene in [&mut soft, &mut hard] {
            scene.trigger_impact();
            run(scene, SWING_DURATION, 0.05);
            scene.update(0.05);
        }
        let soft_recoil = CONTACT_X - soft.alloy_tip_x();
        let hard_recoil = CONTACT_X - hard.alloy_tip_x();
        assert!(hard_recoil < soft_recoil);
    }

    #[test]
    fn test_reset_keeps_sliders_and_clears_collision() {
        let mut scene = AlloyScene::new(11);
        scene.set_carbon_percent(1.5);
        scene.set_fold_count(4);
        scene.trigger_impact();
        run(&mut scene, 1.0, 0.05);
        scene.reset();
        assert_eq!(scene.phase(), CollisionPhase::Ready);
        assert!(scene.fragments.is_empty());
        assert_eq!(scene.carbon_percent(), 1.5);
        assert_eq!(scene.fold_count(), 4);
        assert_eq!(scene.carbon.len(), scene.carbon_count_for(1.5));
    }
}
