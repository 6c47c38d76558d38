use scrubline::Easing;

use crate::Tween;

/// Viewport geometry as reported by the host, in scroll-axis pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub height: f32,
    pub scroll_offset: f32,
    /// Scroll offset at which the container's top reaches the viewport's top.
    pub container_top: f32,
}

impl Viewport {
    pub fn new(height: f32, scroll_offset: f32, container_top: f32) -> Self {
        Self {
            height,
            scroll_offset,
            container_top,
        }
    }
}

/// Configuration for [`ScrollTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerOptions {
    /// Scroll distance per item, as a fraction of the viewport height.
    pub step_fraction: f32,
    /// How long the displayed progress lags behind the scroll position. `0` disables smoothing.
    pub scrub_ms: u64,
    pub scrub_easing: Easing,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            step_fraction: 0.85,
            scrub_ms: 600,
            scrub_easing: Easing::CubicOut,
        }
    }
}

impl TrackerOptions {
    pub fn with_step_fraction(mut self, step_fraction: f32) -> Self {
        self.step_fraction = step_fraction;
        self
    }

    pub fn with_scrub_ms(mut self, scrub_ms: u64) -> Self {
        self.scrub_ms = scrub_ms;
        self
    }

    pub fn with_scrub_easing(mut self, easing: Easing) -> Self {
        self.scrub_easing = easing;
        self
    }
}

/// Where the container sits relative to its pinned range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinState {
    /// Nothing to pin (fewer than two items, or a degenerate scroll range).
    Inactive,
    /// The container has not reached the viewport top yet.
    Before,
    /// The container is fixed at the viewport top while progress advances.
    Pinned,
    /// The range has been scrolled past; the container rests `offset` pixels below its origin.
    After { offset: f32 },
}

/// Converts scroll offsets into timeline progress and tracks the pinned range.
///
/// The tracker keeps two fractions of the pinned range: the target (a pure function of the last
/// scroll offset) and the displayed fraction, which follows the target through a bounded-lag
/// tween. Once the tween settles, the displayed fraction equals the target exactly, so identical
/// scroll offsets always settle to identical progress.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    options: TrackerOptions,
    count: usize,
    length: f32,
    viewport: Viewport,
    step: f32,
    total_range: f32,
    target: f32,
    fraction: f32,
    scrub: Option<Tween>,
}

impl ScrollTracker {
    /// Creates a tracker for `count` items over a timeline `length` steps long.
    ///
    /// Progress starts at `0`; feed the current scroll offset through [`Self::on_scroll`] to
    /// start tracking.
    pub fn new(count: usize, length: f32, viewport: Viewport, options: TrackerOptions) -> Self {
        let mut t = Self {
            options,
            count,
            length: if length.is_finite() { length.max(0.0) } else { 0.0 },
            viewport,
            step: 0.0,
            total_range: 0.0,
            target: 0.0,
            fraction: 0.0,
            scrub: None,
        };
        t.recompute_range();
        vdebug!(
            count,
            total_range = t.total_range,
            tracking = t.is_tracking(),
            "ScrollTracker::new"
        );
        t
    }

    fn recompute_range(&mut self) {
        let step = self.viewport.height * self.options.step_fraction;
        let total = step * self.count as f32;
        if step.is_finite() && total.is_finite() && total > 0.0 {
            self.step = step;
            self.total_range = total;
        } else {
            self.step = 0.0;
            self.total_range = 0.0;
        }
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether scroll input drives progress. `false` for `count <= 1` and degenerate ranges.
    pub fn is_tracking(&self) -> bool {
        self.count > 1 && self.total_range > 0.0 && self.length > 0.0
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn total_range(&self) -> f32 {
        self.total_range
    }

    /// Scroll distance the host must reserve below the container while it is pinned.
    pub fn spacer(&self) -> f32 {
        if self.is_tracking() {
            self.total_range
        } else {
            0.0
        }
    }

    fn fraction_at(&self, scroll_offset: f32) -> f32 {
        if !self.is_tracking() || !scroll_offset.is_finite() {
            return self.target;
        }
        ((scroll_offset - self.viewport.container_top) / self.total_range).clamp(0.0, 1.0)
    }

    /// Records a scroll offset. Progress is recomputed from the offset itself, never from a delta.
    pub fn on_scroll(&mut self, scroll_offset: f32, now_ms: u64) {
        if !scroll_offset.is_finite() {
            vwarn!(scroll_offset, "ScrollTracker: ignoring non-finite scroll offset");
            return;
        }
        self.viewport.scroll_offset = scroll_offset;
        if !self.is_tracking() {
            return;
        }
        let target = self.fraction_at(scroll_offset);
        vtrace!(scroll_offset, target, "ScrollTracker::on_scroll");
        self.set_target(target, now_ms);
    }

    fn set_target(&mut self, target: f32, now_ms: u64) {
        self.target = target;
        if self.options.scrub_ms == 0 {
            self.fraction = target;
            self.scrub = None;
            return;
        }
        match &mut self.scrub {
            Some(tween) => {
                if tween.to != target {
                    tween.retarget(now_ms, target, self.options.scrub_ms);
                }
            }
            None => {
                if self.fraction != target {
                    self.scrub = Some(Tween::new(
                        self.fraction,
                        target,
                        now_ms,
                        self.options.scrub_ms,
                        self.options.scrub_easing,
                    ));
                }
            }
        }
    }

    /// Applies a viewport resize.
    ///
    /// The pinned range is rescaled and the fraction already reached is kept. Returns the scroll
    /// offset that corresponds to that fraction in the new range, which the host should restore;
    /// returns `None` when the new range is degenerate.
    pub fn on_resize(&mut self, viewport_height: f32) -> Option<f32> {
        self.viewport.height = viewport_height;
        self.recompute_range();
        if !self.is_tracking() {
            vdebug!(viewport_height, "ScrollTracker: degenerate scroll range");
            return None;
        }
        let restored = self.viewport.container_top + self.target * self.total_range;
        self.viewport.scroll_offset = restored;
        vdebug!(
            viewport_height,
            total_range = self.total_range,
            restored,
            "ScrollTracker::on_resize"
        );
        Some(restored)
    }

    pub fn set_container_top(&mut self, container_top: f32, now_ms: u64) {
        if !container_top.is_finite() {
            return;
        }
        self.viewport.container_top = container_top;
        let offset = self.viewport.scroll_offset;
        self.on_scroll(offset, now_ms);
    }

    /// Advances the scrub tween. Returns `true` when the displayed fraction changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(tween) = self.scrub else {
            return false;
        };
        let prev = self.fraction;
        self.fraction = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.fraction = tween.to;
            self.scrub = None;
        }
        self.fraction != prev
    }

    /// Jumps the displayed fraction to the target.
    pub fn settle(&mut self) {
        self.scrub = None;
        self.fraction = self.target;
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_some()
    }

    pub fn target_fraction(&self) -> f32 {
        self.target
    }

    /// Displayed fraction of the pinned range, in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Raw timeline position in `[0, length]`, including the hold past the last item.
    pub fn position(&self) -> f32 {
        if !self.is_tracking() {
            return 0.0;
        }
        self.fraction * self.length
    }

    /// Progress clamped to `[0, count - 1]`.
    pub fn progress(&self) -> f32 {
        self.position()
            .clamp(0.0, self.count.saturating_sub(1) as f32)
    }

    pub fn pin(&self) -> PinState {
        if !self.is_tracking() {
            return PinState::Inactive;
        }
        let top = self.viewport.container_top;
        let offset = self.viewport.scroll_offset;
        if offset < top {
            PinState::Before
        } else if offset <= top + self.total_range {
            PinState::Pinned
        } else {
            PinState::After {
                offset: self.total_range,
            }
        }
    }
}
