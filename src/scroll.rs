//! Viewport scrolling with eased, fire-and-forget animations.
//!
//! A smooth scroll records where it started and where it is heading; the offset at any instant is
//! read off the easing curve. Issuing a new smooth scroll replaces the trajectory, starting from
//! wherever the previous one had reached.

use std::time::Duration;

/// Anything that can be asked to scroll smoothly to a document offset.
pub trait SmoothScroll {
    /// Starts an animated scroll towards `target`, superseding any scroll in flight.
    fn smooth_scroll_to(&mut self, target: u32, now: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Easing curves for smooth scrolling.
pub enum ScrollEasing {
    /// Constant velocity.
    Linear,
    /// Decelerating towards the target.
    EaseOut,
    /// Smooth S-curve, the browser-like default.
    #[default]
    EaseInOut,
}

impl ScrollEasing {
    #[must_use]
    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// One in-flight smooth scroll.
pub struct ScrollAnimation {
    /// Offset the animation started from.
    pub from: u32,
    /// Offset the animation ends on.
    pub to: u32,
    /// Instant the animation started.
    pub started: Duration,
    /// Total running time.
    pub duration: Duration,
    /// Curve mapping elapsed time to progress.
    pub easing: ScrollEasing,
}

impl ScrollAnimation {
    #[must_use]
    /// Whether the animation has reached its target at `now`.
    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started) >= self.duration
    }

    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    /// Interpolated offset at `now`.
    pub fn offset_at(&self, now: Duration) -> u32 {
        if self.duration.is_zero() || self.is_finished(now) {
            return self.to;
        }
        let t = now.saturating_sub(self.started).as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(t);
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        (from + (to - from) * eased).round().max(0.0) as u32
    }
}

#[derive(Debug, Clone)]
/// The scrolled window onto the document.
pub struct Viewport {
    offset: u32,
    height: u32,
    document_height: u32,
    duration: Duration,
    easing: ScrollEasing,
    animation: Option<ScrollAnimation>,
}

impl Viewport {
    #[must_use]
    /// Creates a viewport at the top of the document.
    pub fn new(height: u32, document_height: u32, duration: Duration) -> Self {
        Self {
            offset: 0,
            height,
            document_height,
            duration,
            easing: ScrollEasing::default(),
            animation: None,
        }
    }

    #[must_use]
    /// Current scroll offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    /// Visible height.
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> u32 {
        self.document_height.saturating_sub(self.height)
    }

    #[must_use]
    /// Whether a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    /// The smooth scroll in flight, if any.
    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    /// Moves to `offset` immediately, cancelling any animation. Returns whether the offset moved.
    pub fn jump_to(&mut self, offset: u32) -> bool {
        self.animation = None;
        let clamped = offset.min(self.max_offset());
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Scrolls by `delta` units immediately. Returns whether the offset moved.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = i64::from(self.offset).saturating_add(delta).max(0);
        self.jump_to(u32::try_from(target).unwrap_or(u32::MAX))
    }

    /// Updates the geometry after a resize, keeping the offset in range.
    pub fn resize(&mut self, height: u32, document_height: u32) {
        self.height = height;
        self.document_height = document_height;
        self.offset = self.offset.min(self.max_offset());
        if let Some(animation) = &mut self.animation {
            animation.to = animation.to.min(self.document_height.saturating_sub(height));
        }
    }

    /// Steps the animation to `now`. Returns whether the offset changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let next = animation.offset_at(now);
        if animation.is_finished(now) {
            self.animation = None;
        }
        let moved = next != self.offset;
        self.offset = next;
        moved
    }
}

impl SmoothScroll for Viewport {
    fn smooth_scroll_to(&mut self, target: u32, now: Duration) {
        self.advance(now);
        let to = target.min(self.max_offset());
        self.animation = (to != self.offset).then_some(ScrollAnimation {
            from: self.offset,
            to,
            started: now,
            duration: self.duration,
            easing: self.easing,
        });
    }
}

#[cfg(test)]
#[path = "tests/scroll.rs"]
mod tests;
