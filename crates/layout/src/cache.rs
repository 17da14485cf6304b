use crate::fonts::FontData;
use crate::text::shaper::ShapedRun;
use pictor_style::FontStyle;
use pictor_types::Size;
use std::collections::HashMap;
use std::sync::Arc;

// --- Cache Keys ---

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct FontCacheKey {
    pub family: Arc<str>,
    pub weight: u16,
    pub style: FontStyle,
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct ShapingCacheKey {
    pub text: String,
    pub style_hash: u64,
}

/// Measurements are keyed by the offered width rounded to a quarter pixel;
/// `None` is the max-content measurement.
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct MeasureCacheKey {
    pub text: String,
    pub style_hash: u64,
    pub width_bucket: Option<u32>,
}

impl MeasureCacheKey {
    pub const BUCKETS_PER_PX: f32 = 4.0;

    pub fn bucket(width: Option<f32>) -> Option<u32> {
        width.map(|w| (w.max(0.0) * Self::BUCKETS_PER_PX).floor() as u32)
    }

    pub fn bucket_width(bucket: u32) -> f32 {
        bucket as f32 / Self::BUCKETS_PER_PX
    }
}

// --- The Manager ---

/// Per-render caches for font selection, shaping and measurement.
///
/// The caches are dropped wholesale once the number of entries exceeds the
/// configured capacity.
#[derive(Default)]
pub struct TextCache {
    pub fonts: HashMap<FontCacheKey, FontData>,
    pub shaping: HashMap<ShapingCacheKey, Arc<ShapedRun>>,
    pub measurements: HashMap<MeasureCacheKey, Size>,
    capacity: usize,
}

impl TextCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.fonts.len() + self.shaping.len() + self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the shaping and measurement caches when they are over capacity.
    pub fn prune(&mut self) {
        if self.shaping.len() + self.measurements.len() > self.capacity {
            log::debug!(
                "Text cache over capacity ({} entries); clearing",
                self.shaping.len() + self.measurements.len()
            );
            self.shaping.clear();
            self.measurements.clear();
        }
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
        self.shaping.clear();
        self.measurements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_buckets_are_quarter_pixels() {
        assert_eq!(MeasureCacheKey::bucket(None), None);
        assert_eq!(MeasureCacheKey::bucket(Some(10.3)), Some(41));
        assert_eq!(MeasureCacheKey::bucket(Some(-2.0)), Some(0));
        assert_eq!(MeasureCacheKey::bucket_width(41), 10.25);
    }

    #[test]
    fn prune_drops_everything_over_capacity() {
        let mut cache = TextCache::with_capacity(1);
        let key = |w| MeasureCacheKey {
            text: "a".to_string(),
            style_hash: 0,
            width_bucket: Some(w),
        };
        cache.measurements.insert(key(1), Size::zero());
        cache.prune();
        assert_eq!(cache.len(), 1);
        cache.measurements.insert(key(2), Size::zero());
        cache.prune();
        assert!(cache.is_empty());
    }
}
