//! Entity types shared by the scenes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A metal cation in a regular lattice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ion {
    pub row: u32,
    pub col: u32,
    /// Undisturbed lattice position
    pub base: Vec2,
    /// Displayed position (base + deformation)
    pub pos: Vec2,
}

impl Ion {
    pub fn new(row: u32, col: u32, base: Vec2) -> Self {
        Self {
            row,
            col,
            base,
            pos: base,
        }
    }
}

/// Build a row-major `cols` x `rows` lattice starting at `origin`
pub fn lattice(cols: u32, rows: u32, origin: Vec2, gap: Vec2) -> Vec<Ion> {
    let mut ions = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let base = origin + Vec2::new(col as f32 * gap.x, row as f32 * gap.y);
            ions.push(Ion::new(row, col, base));
        }
    }
    ions
}

/// A free electron with its own velocity (sea scene)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Electron {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// An electron in a wire: jitters around a shared drift
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftElectron {
    pub pos: Vec2,
    /// Full drift speed once the field has ramped in
    pub base_speed: f32,
    /// Phase offset for the oscillatory jitter (radians)
    pub offset: f32,
    /// Drift velocity applied on the last update
    pub drift: f32,
    /// Net horizontal travel, ignoring wraparound
    pub travelled: f32,
}

/// A carbon atom sitting in an interstitial site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonAtom {
    pub site: usize,
    pub pos: Vec2,
}

/// A shard thrown off a shattering blade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    /// Seconds left before removal
    pub life: f32,
    /// Life at spawn, for fading
    pub max_life: f32,
    pub size: f32,
}

impl Fragment {
    /// Remaining life in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_layout() {
        let ions = lattice(3, 2, Vec2::new(10.0, 20.0), Vec2::new(5.0, 7.0));
        assert_eq!(ions.len(), 6);
        assert_eq!(ions[0].base, Vec2::new(10.0, 20.0));
        assert_eq!(ions[2].base, Vec2::new(20.0, 20.0));
        assert_eq!(ions[3].row, 1);
        assert_eq!(ions[3].col, 0);
        assert_eq!(ions[5].pos, Vec2::new(20.0, 27.0));
    }

    #[test]
    fn test_fragment_life_fraction() {
        let mut f = Fragment {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            life: 0.5,
            max_life: 2.0,
            size: 4.0,
        };
        assert_eq!(f.life_fraction(), 0.25);
        f.life = -1.0;
        assert_eq!(f.life_fraction(), 0.0);
    }
}
