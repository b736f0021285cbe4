use image::DynamicImage;
use tracing::debug;

use crate::source::{scale_to_height, StripImage};

/// Scaled images in build order, expanded by per-source weight.
pub type ImageList = Vec<StripImage>;

/// Fixed-length sequence of indices into the image list, defining draw
/// order independently of the image count.
pub type Scene = Vec<usize>;

/// Builds the scaled image list and the playback scene.
///
/// The scene is generated once at configuration time and is read-only
/// afterwards; a live reconfiguration rebuilds list, scene and engine
/// together rather than patching any of them in place.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    scene_length: usize,
    contiguous: bool,
}

impl SceneBuilder {
    pub fn new(scene_length: usize, contiguous: bool) -> Self {
        // A zero scene length is a configuration mistake; clamp instead of failing
        Self {
            scene_length: scene_length.max(1),
            contiguous,
        }
    }

    pub fn scene_length(&self) -> usize {
        self.scene_length
    }

    /// Scale each source to the viewport height, expand it by its weight
    /// and generate the scene over the resulting list.
    ///
    /// Weighted copies share one pixel buffer. Non-positive weights are
    /// clamped to 1. An empty source set yields an empty list and scene,
    /// which the engine degrades to rendering nothing.
    pub fn build(
        &self,
        sources: &[(DynamicImage, u32)],
        viewport_height: u32,
        rng: &mut fastrand::Rng,
    ) -> (ImageList, Scene) {
        if sources.is_empty() {
            debug!("no image sources, building an empty strip");
            return (Vec::new(), Vec::new());
        }

        let mut images: ImageList = Vec::new();
        for (img, weight) in sources {
            let scaled = scale_to_height(img, viewport_height);
            for _ in 0..(*weight).max(1) {
                images.push(scaled.clone());
            }
        }

        let scene = (0..self.scene_length)
            .map(|i| {
                if self.contiguous {
                    i % images.len()
                } else {
                    rng.usize(..images.len())
                }
            })
            .collect();

        (images, scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(specs: &[(u32, u32)]) -> Vec<(DynamicImage, u32)> {
        specs
            .iter()
            .map(|&(w, weight)| (DynamicImage::new_rgba8(w, 10), weight))
            .collect()
    }

    #[test]
    fn test_contiguous_scene_is_cyclic() {
        let builder = SceneBuilder::new(10, true);
        let mut rng = fastrand::Rng::with_seed(0);
        let (images, scene) = builder.build(&sources(&[(10, 1), (20, 1), (30, 1)]), 10, &mut rng);
        assert_eq!(scene.len(), 10);
        for (i, &entry) in scene.iter().enumerate() {
            assert_eq!(entry, i % images.len());
        }
    }

    #[test]
    fn test_random_scene_stays_in_range() {
        let builder = SceneBuilder::new(500, false);
        let mut rng = fastrand::Rng::with_seed(42);
        let (images, scene) = builder.build(&sources(&[(10, 1), (20, 2)]), 10, &mut rng);
        assert_eq!(scene.len(), 500);
        assert!(scene.iter().all(|&entry| entry < images.len()));
    }

    #[test]
    fn test_weighted_expansion_shares_buffers() {
        let builder = SceneBuilder::new(5, true);
        let mut rng = fastrand::Rng::with_seed(0);
        let (images, _) = builder.build(&sources(&[(10, 3), (20, 1)]), 10, &mut rng);
        assert_eq!(images.len(), 4);
        // Three copies of the first source, order preserved
        assert_eq!(images[0].width(), 10);
        assert_eq!(images[1].width(), 10);
        assert_eq!(images[2].width(), 10);
        assert_eq!(images[3].width(), 20);
        assert!(images[0].shares_buffer(&images[1]));
        assert!(images[0].shares_buffer(&images[2]));
        assert!(!images[0].shares_buffer(&images[3]));
    }

    #[test]
    fn test_zero_weight_is_clamped_to_one() {
        let builder = SceneBuilder::new(5, true);
        let mut rng = fastrand::Rng::with_seed(0);
        let (images, _) = builder.build(&sources(&[(10, 0), (20, 1)]), 10, &mut rng);
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn test_empty_sources_build_empty_scene() {
        let builder = SceneBuilder::new(100, false);
        let mut rng = fastrand::Rng::with_seed(0);
        let (images, scene) = builder.build(&[], 10, &mut rng);
        assert!(images.is_empty());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_zero_scene_length_is_clamped() {
        let builder = SceneBuilder::new(0, true);
        assert_eq!(builder.scene_length(), 1);
        let mut rng = fastrand::Rng::with_seed(0);
        let (_, scene) = builder.build(&sources(&[(10, 1)]), 10, &mut rng);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_seeded_builds_are_reproducible() {
        let builder = SceneBuilder::new(50, false);
        let mut rng_a = fastrand::Rng::with_seed(9);
        let mut rng_b = fastrand::Rng::with_seed(9);
        let (_, scene_a) = builder.build(&sources(&[(10, 1), (20, 1)]), 10, &mut rng_a);
        let (_, scene_b) = builder.build(&sources(&[(10, 1), (20, 1)]), 10, &mut rng_b);
        assert_eq!(scene_a, scene_b);
    }
}
