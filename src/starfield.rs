//! Background star field.
//!
//! Stars live in screen space and are generated once per viewport-size
//! epoch; a resize invalidates the set and nothing else.

use crate::config::STAR_COUNT;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
}

pub struct StarField {
    stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl StarField {
    pub fn generate<R: Rng>(rng: &mut R, width: f32, height: f32) -> Self {
        Self::generate_with_count(rng, width, height, STAR_COUNT)
    }

    pub fn generate_with_count<R: Rng>(
        rng: &mut R,
        width: f32,
        height: f32,
        count: usize,
    ) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..width.max(1.0)),
                y: rng.gen_range(0.0..height.max(1.0)),
                radius: rng.gen_range(0.3..1.4),
                opacity: rng.gen_range(0.2..1.0),
            })
            .collect();
        Self {
            stars,
            width,
            height,
        }
    }

    /// True while the cached set is still valid for this viewport.
    pub fn fits(&self, width: f32, height: f32) -> bool {
        self.width == width && self.height == height
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
