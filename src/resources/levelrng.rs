use bevy_ecs::prelude::Resource;

/// Random source for a level: spawn positions, initial headings and the
/// species each owner asks for. Seeded so runs can be replayed.
#[derive(Resource, Debug, Clone)]
pub struct LevelRng(pub fastrand::Rng);

impl LevelRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform float in `[min, max)`; returns `min` for an empty range.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.0.f32() * (max - min)
    }
}
