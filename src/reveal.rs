//! Viewport intersection: entrance animations and lazy image loading.
//!
//! An [`IntersectionObserver`] watches targets by their document geometry and reports, for a given
//! viewport, how much of each target is visible. The root rectangle can be shrunk at the bottom so
//! targets only count once they are properly on screen.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Tuning for an observer.
pub struct ObserverOptions {
    /// Visible fraction of a target required to count as intersecting.
    pub threshold: f64,
    /// Adjustment to the bottom edge of the viewport; negative values shrink it.
    pub bottom_margin: i64,
}

impl ObserverOptions {
    /// Options for entrance animations: 10% visible, 50 units above the bottom edge.
    pub const ENTRANCE: Self = Self {
        threshold: 0.1,
        bottom_margin: -50,
    };

    /// Options for lazy images: any overlap at all.
    pub const ANY_OVERLAP: Self = Self {
        threshold: 0.0,
        bottom_margin: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// How one target relates to the viewport.
pub struct IntersectionEntry<K> {
    /// Target the entry describes.
    pub key: K,
    /// Visible fraction of the target, 0.0 to 1.0.
    pub ratio: f64,
    /// Whether the target meets the threshold.
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Copy)]
struct Target<K> {
    key: K,
    top: u32,
    height: u32,
}

#[derive(Debug, Clone)]
/// Watches targets and reports their visibility in a viewport.
pub struct IntersectionObserver<K> {
    options: ObserverOptions,
    targets: Vec<Target<K>>,
}

impl<K: Copy + PartialEq> IntersectionObserver<K> {
    #[must_use]
    /// An observer with no targets.
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    /// Starts watching `key`, replacing any previous geometry for it.
    pub fn observe(&mut self, key: K, top: u32, height: u32) {
        self.unobserve(key);
        self.targets.push(Target { key, top, height });
    }

    /// Stops watching `key`.
    pub fn unobserve(&mut self, key: K) {
        self.targets.retain(|t| t.key != key);
    }

    #[must_use]
    /// Number of watched targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    /// Whether nothing is watched.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    /// Visibility of every target for a viewport at `viewport_top` that is `viewport_height` tall.
    pub fn entries(&self, viewport_top: u32, viewport_height: u32) -> Vec<IntersectionEntry<K>> {
        let root_top = i64::from(viewport_top);
        let root_bottom = root_top + i64::from(viewport_height) + self.options.bottom_margin;
        self.targets
            .iter()
            .map(|t| {
                let top = i64::from(t.top);
                let bottom = top + i64::from(t.height);
                let overlap = (bottom.min(root_bottom) - top.max(root_top)).max(0);
                let ratio = if t.height == 0 {
                    if top >= root_top && top < root_bottom {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    overlap as f64 / f64::from(t.height)
                };
                let is_intersecting = if self.options.threshold <= 0.0 {
                    overlap > 0 || (t.height == 0 && ratio > 0.0)
                } else {
                    ratio >= self.options.threshold
                };
                IntersectionEntry {
                    key: t.key,
                    ratio,
                    is_intersecting,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Blocks that animate in on first sight.
pub enum RevealTarget {
    /// The hero block.
    Hero,
    /// Page section at this index.
    Section(usize),
}

#[derive(Debug, Clone)]
/// Entrance-animation state for the hero and every section.
pub struct Reveal {
    observer: IntersectionObserver<RevealTarget>,
    hero: bool,
    sections: Vec<bool>,
}

impl Reveal {
    #[must_use]
    /// Tracks `section_count` sections. With `supported == false` everything starts revealed.
    pub fn new(section_count: usize, supported: bool) -> Self {
        Self {
            observer: IntersectionObserver::new(ObserverOptions::ENTRANCE),
            hero: !supported,
            sections: vec![!supported; section_count],
        }
    }

    /// Updates target geometry after a layout change; revealed targets are not re-observed.
    pub fn observe(&mut self, target: RevealTarget, top: u32, height: u32) {
        if !self.is_revealed(target) {
            self.observer.observe(target, top, height);
        }
    }

    /// Marks newly intersecting targets as animated in. Returns how many were revealed.
    pub fn update(&mut self, viewport_top: u32, viewport_height: u32) -> usize {
        let mut revealed = 0;
        for entry in self.observer.entries(viewport_top, viewport_height) {
            if !entry.is_intersecting {
                continue;
            }
            match entry.key {
                RevealTarget::Hero => self.hero = true,
                RevealTarget::Section(i) => {
                    if let Some(flag) = self.sections.get_mut(i) {
                        *flag = true;
                    }
                }
            }
            self.observer.unobserve(entry.key);
            revealed += 1;
        }
        revealed
    }

    #[must_use]
    /// Whether `target` has animated in.
    pub fn is_revealed(&self, target: RevealTarget) -> bool {
        match target {
            RevealTarget::Hero => self.hero,
            RevealTarget::Section(i) => self.sections.get(i).copied().unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An image whose source is only set once it scrolls into view.
pub struct LazyImage {
    /// Alternative text.
    pub alt: String,
    /// Deferred source.
    pub data_src: String,
    /// Loaded source; `None` while the image is still lazy.
    pub src: Option<String>,
}

#[derive(Debug, Clone)]
/// Every lazy image on the page and the observer watching them.
pub struct LazyImages {
    images: Vec<LazyImage>,
    observer: IntersectionObserver<usize>,
}

impl LazyImages {
    #[must_use]
    /// Lazy images in page order. With `supported == false` they load immediately.
    pub fn new(images: Vec<LazyImage>, supported: bool) -> Self {
        let mut images = images;
        if !supported {
            for image in &mut images {
                image.src = Some(image.data_src.clone());
            }
        }
        Self {
            images,
            observer: IntersectionObserver::new(ObserverOptions::ANY_OVERLAP),
        }
    }

    /// Watches image `index` at `top`; already-loaded images are skipped.
    pub fn observe(&mut self, index: usize, top: u32, height: u32) {
        if self.images.get(index).is_some_and(|img| img.src.is_none()) {
            self.observer.observe(index, top, height);
        }
    }

    /// Loads every image now intersecting the viewport. Returns how many loaded.
    pub fn update(&mut self, viewport_top: u32, viewport_height: u32) -> usize {
        let mut loaded = 0;
        for entry in self.observer.entries(viewport_top, viewport_height) {
            if !entry.is_intersecting {
                continue;
            }
            if let Some(image) = self.images.get_mut(entry.key) {
                debug!(src = %image.data_src, "loading lazy image");
                image.src = Some(image.data_src.clone());
                loaded += 1;
            }
            self.observer.unobserve(entry.key);
        }
        loaded
    }

    #[must_use]
    /// Image at `index`.
    pub fn get(&self, index: usize) -> Option<&LazyImage> {
        self.images.get(index)
    }

    #[must_use]
    /// Number of images still waiting to load.
    pub fn pending(&self) -> usize {
        self.images.iter().filter(|img| img.src.is_none()).count()
    }
}

#[cfg(test)]
#[path = "tests/reveal.rs"]
mod tests;
