use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::warn;

/// A decoded image scaled to the viewport height.
///
/// Cloning is cheap and shares the underlying pixel buffer, so weighted
/// duplication in the image list never copies pixels.
#[derive(Debug, Clone)]
pub struct StripImage {
    buffer: Arc<DynamicImage>,
    width: u32,
    height: u32,
}

impl StripImage {
    pub fn new(buffer: DynamicImage) -> Self {
        let (width, height) = buffer.dimensions();
        Self {
            buffer: Arc::new(buffer),
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn buffer(&self) -> &DynamicImage {
        &self.buffer
    }

    /// True when both handles point at the same pixel buffer.
    pub fn shares_buffer(&self, other: &StripImage) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

/// Host collaborator that resolves an image id to a decoded buffer.
///
/// Returning `None` excludes that source from the strip; it never aborts
/// the build.
pub trait ImageSource {
    fn load(&self, id: &str) -> Option<DynamicImage>;
}

/// Loads image ids as filesystem paths via the image crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn load(&self, id: &str) -> Option<DynamicImage> {
        match image::open(Path::new(id)) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("skipping image {id}: {e}");
                None
            }
        }
    }
}

/// Resolve ordered source ids into `(image, weight)` pairs.
///
/// Sources the loader cannot produce are skipped. Missing weight entries
/// default to 1.
pub fn load_sources(
    loader: &impl ImageSource,
    ids: &[String],
    weights: &[u32],
) -> Vec<(DynamicImage, u32)> {
    let mut sources = Vec::with_capacity(ids.len());
    for (i, id) in ids.iter().enumerate() {
        if let Some(img) = loader.load(id) {
            let weight = weights.get(i).copied().unwrap_or(1);
            sources.push((img, weight));
        }
    }
    sources
}

/// Scale an image to the viewport height, preserving aspect ratio.
///
/// The scaled width is `viewport_height * raw_width / raw_height`
/// truncated toward zero, clamped to at least one pixel column.
pub fn scale_to_height(img: &DynamicImage, viewport_height: u32) -> StripImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || viewport_height == 0 {
        return StripImage::new(DynamicImage::new_rgba8(0, 0));
    }
    let aspect = w as f64 / h as f64;
    let new_width = ((viewport_height as f64 * aspect) as u32).max(1);
    StripImage::new(img.resize_exact(new_width, viewport_height, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_truncates_width_toward_zero() {
        // 333x100 at height 30 -> 99.9 -> 99
        let img = DynamicImage::new_rgba8(333, 100);
        let scaled = scale_to_height(&img, 30);
        assert_eq!(scaled.width(), 99);
        assert_eq!(scaled.height(), 30);
    }

    #[test]
    fn test_scale_clamps_to_one_column() {
        // 1x1000 at height 10 would truncate to zero width
        let img = DynamicImage::new_rgba8(1, 1000);
        let scaled = scale_to_height(&img, 10);
        assert_eq!(scaled.width(), 1);
    }

    #[test]
    fn test_scale_degenerate_inputs() {
        let img = DynamicImage::new_rgba8(100, 100);
        assert_eq!(scale_to_height(&img, 0).width(), 0);
        let empty = DynamicImage::new_rgba8(0, 0);
        assert_eq!(scale_to_height(&empty, 10).width(), 0);
    }

    #[test]
    fn test_clone_shares_buffer() {
        let a = StripImage::new(DynamicImage::new_rgba8(10, 10));
        let b = a.clone();
        assert!(a.shares_buffer(&b));
        let c = StripImage::new(DynamicImage::new_rgba8(10, 10));
        assert!(!a.shares_buffer(&c));
    }

    struct MissingEverySecond;

    impl ImageSource for MissingEverySecond {
        fn load(&self, id: &str) -> Option<DynamicImage> {
            let n: u32 = id.parse().ok()?;
            (n % 2 == 0).then(|| DynamicImage::new_rgba8(n + 1, 10))
        }
    }

    #[test]
    fn test_load_sources_skips_missing() {
        let ids: Vec<String> = (0..4).map(|n| n.to_string()).collect();
        let sources = load_sources(&MissingEverySecond, &ids, &[5]);
        assert_eq!(sources.len(), 2);
        // Weight list is indexed by source position, not load order
        assert_eq!(sources[0].1, 5);
        assert_eq!(sources[1].1, 1);
    }
}
