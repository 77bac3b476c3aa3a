//! Scene contract and the set of all scenes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabError;
use crate::renderer::{self, Surface};
use crate::sim::{AlloyScene, HammerScene, SeaScene, WireScene};

/// Identifies one of the four scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKey {
    #[default]
    Sea,
    Hammer,
    Wire,
    Alloys,
}

impl SceneKey {
    /// Navigation order
    pub const ALL: [SceneKey; 4] = [
        SceneKey::Sea,
        SceneKey::Hammer,
        SceneKey::Wire,
        SceneKey::Alloys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKey::Sea => "sea",
            SceneKey::Hammer => "hammer",
            SceneKey::Wire => "wire",
            SceneKey::Alloys => "alloys",
        }
    }
}

impl fmt::Display for SceneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneKey {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        SceneKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| LabError::UnknownScene(key.to_string()))
    }
}

/// What every animated scene offers the controller.
///
/// `update` never fails: bad deltas are treated as zero and state is
/// clamped. `draw` only reads.
pub trait Scene {
    fn key(&self) -> SceneKey;
    fn reset(&mut self);
    fn update(&mut self, dt: f32);
    fn draw(&self, surface: &mut dyn Surface);
}

impl Scene for SeaScene {
    fn key(&self) -> SceneKey {
        SceneKey::Sea
    }

    fn reset(&mut self) {
        SeaScene::reset(self);
    }

    fn update(&mut self, dt: f32) {
        SeaScene::update(self, dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::sea::draw(self, surface);
    }
}

impl Scene for HammerScene {
    fn key(&self) -> SceneKey {
        SceneKey::Hammer
    }

    fn reset(&mut self) {
        HammerScene::reset(self);
    }

    fn update(&mut self, dt: f32) {
        HammerScene::update(self, dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::hammer::draw(self, surface);
    }
}

impl Scene for WireScene {
    fn key(&self) -> SceneKey {
        SceneKey::Wire
    }

    fn reset(&mut self) {
        WireScene::reset(self);
    }

    fn update(&mut self, dt: f32) {
        WireScene::update(self, dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::wire::draw(self, surface);
    }
}

impl Scene for AlloyScene {
    fn key(&self) -> SceneKey {
        SceneKey::Alloys
    }

    fn reset(&mut self) {
        AlloyScene::reset(self);
    }

    fn update(&mut self, dt: f32) {
        AlloyScene::update(self, dt);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::alloys::draw(self, surface);
    }
}

/// One instance of every scene, each with its own random stream
#[derive(Debug, Clone)]
pub struct SceneSet {
    pub sea: SeaScene,
    pub hammer: HammerScene,
    pub wire: WireScene,
    pub alloys: AlloyScene,
}

impl SceneSet {
    pub fn new(seed: u64) -> Self {
        Self {
            sea: SeaScene::new(scene_seed(seed, SceneKey::Sea)),
            hammer: HammerScene::new(),
            wire: WireScene::new(scene_seed(seed, SceneKey::Wire)),
            alloys: AlloyScene::new(scene_seed(seed, SceneKey::Alloys)),
        }
    }

    pub fn get(&self, key: SceneKey) -> &dyn Scene {
        match key {
            SceneKey::Sea => &self.sea,
            SceneKey::Hammer => &self.hammer,
            SceneKey::Wire => &self.wire,
            SceneKey::Alloys => &self.alloys,
        }
    }

    pub fn get_mut(&mut self, key: SceneKey) -> &mut dyn Scene {
        match key {
            SceneKey::Sea => &mut self.sea,
            SceneKey::Hammer => &mut self.hammer,
            SceneKey::Wire => &mut self.wire,
            SceneKey::Alloys => &mut self.alloys,
        }
    }
}

/// Distinct, stable seed per scene derived from the lab seed
fn scene_seed(seed: u64, key: SceneKey) -> u64 {
    let index = SceneKey::ALL.iter().position(|k| *k == key).unwrap_or(0) as u64;
    seed ^ (index + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandRecorder;

    #[test]
    fn test_key_round_trip_strings() {
        for key in SceneKey::ALL {
            assert_eq!(key.as_str().parse::<SceneKey>().unwrap(), key);
        }
        assert_eq!("  WIRE ".parse::<SceneKey>().unwrap(), SceneKey::Wire);
    }

    #[test]
    fn test_unknown_key() {
        let err = "plasma".parse::<SceneKey>().unwrap_err();
        assert!(matches!(err, LabError::UnknownScene(ref s) if s == "plasma"));
    }

    #[test]
    fn test_key_serde_lowercase() {
        assert_eq!(serde_json::to_string(&SceneKey::Alloys).unwrap(), "\"alloys\"");
        let key: SceneKey = serde_json::from_str("\"hammer\"").unwrap();
        assert_eq!(key, SceneKey::Hammer);
    }

    #[test]
    fn test_set_dispatches_by_key() {
        let mut set = SceneSet::new(7);
        for key in SceneKey::ALL {
            assert_eq!(set.get(key).key(), key);
            assert_eq!(set.get_mut(key).key(), key);
        }
    }

    #[test]
    fn test_every_scene_draws_balanced() {
        let mut set = SceneSet::new(3);
        for key in SceneKey::ALL {
            set.get_mut(key).update(0.5);
            let mut rec = CommandRecorder::default();
            set.get(key).draw(&mut rec);
            assert!(!rec.is_empty(), "{key} drew nothing");
            assert!(rec.is_balanced(), "{key} left unbalanced save/restore");
        }
    }

    #[test]
    fn test_scene_seeds_differ() {
        let seeds: Vec<u64> = SceneKey::ALL.iter().map(|k| scene_seed(1, *k)).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
