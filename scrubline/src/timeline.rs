use alloc::vec::Vec;

use crate::options::Segment;
use crate::{Easing, Frame, TimelineOptions, interpolate_into};

/// An eased 0 -> 1 ramp over an absolute progress range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ramp {
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Ramp {
    /// Places `segment` around `boundary`, clamped into the cell `[boundary - 1, boundary]`.
    ///
    /// A segment that collapses onto the cell's lower edge completes just after it, so the
    /// outgoing item is still the only visible one at `boundary - 1`.
    pub fn around(boundary: usize, segment: Segment) -> Self {
        let hi = boundary as f32;
        let lo = hi - 1.0;
        let start = (hi + segment.start).clamp(lo, hi);
        let mut end = (hi + segment.end).clamp(start, hi);
        if end <= lo {
            end = next_above(lo);
        }
        Self {
            start,
            end,
            easing: segment.easing,
        }
    }

    pub fn width(&self) -> f32 {
        self.end - self.start
    }

    /// `0` before the ramp, `1` after it, eased in between.
    ///
    /// A zero-width ramp is a step at `start`.
    pub fn sample(&self, progress: f32) -> f32 {
        let width = self.width();
        if width <= 0.0 {
            return if progress >= self.start { 1.0 } else { 0.0 };
        }
        if progress <= self.start {
            return 0.0;
        }
        if progress >= self.end {
            return 1.0;
        }
        self.easing
            .sample((progress - self.start) / width)
            .clamp(0.0, 1.0)
    }
}

// Smallest `f32` greater than a finite, non-negative `x`.
fn next_above(x: f32) -> f32 {
    f32::from_bits(x.to_bits() + 1)
}

/// The blend between item `boundary - 1` (outgoing) and item `boundary` (incoming).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionWindow {
    pub boundary: usize,
    pub fade_out: Ramp,
    pub fade_in: Ramp,
    pub shadow_out: Ramp,
    pub shadow_in: Ramp,
    pub nav_out: Ramp,
    pub nav_in: Ramp,
    /// Absolute progress at which the highlight moves to the incoming item.
    pub nav_switch: f32,
}

impl TransitionWindow {
    /// Builds the window for `boundary` (must be `>= 1`).
    pub fn new(boundary: usize, options: &TimelineOptions) -> Self {
        debug_assert!(boundary >= 1, "TransitionWindow: boundary 0 has no outgoing item");
        let o = &options.offsets;
        let fade_in = Ramp::around(boundary, o.fade_in);
        let mut nav_in = Ramp::around(boundary, o.nav_in);
        // The nav highlight must be fully emphasized no later than the item is fully visible.
        if nav_in.end > fade_in.end {
            nav_in.end = fade_in.end;
            nav_in.start = nav_in.start.min(nav_in.end);
        }
        let hi = boundary as f32;
        Self {
            boundary,
            fade_out: Ramp::around(boundary, o.fade_out),
            fade_in,
            shadow_out: Ramp::around(boundary, o.shadow_out),
            shadow_in: Ramp::around(boundary, o.shadow_in),
            nav_out: Ramp::around(boundary, o.nav_out),
            nav_in,
            nav_switch: (hi + o.nav_switch).clamp(next_above(hi - 1.0), hi),
        }
    }

    pub fn outgoing(&self) -> usize {
        self.boundary - 1
    }

    pub fn incoming(&self) -> usize {
        self.boundary
    }

    fn ramps(&self) -> [&Ramp; 6] {
        [
            &self.fade_out,
            &self.fade_in,
            &self.shadow_out,
            &self.shadow_in,
            &self.nav_out,
            &self.nav_in,
        ]
    }

    pub fn start(&self) -> f32 {
        self.ramps()
            .iter()
            .fold(self.nav_switch, |acc, r| acc.min(r.start))
    }

    pub fn end(&self) -> f32 {
        self.ramps()
            .iter()
            .fold(self.nav_switch, |acc, r| acc.max(r.end))
    }

    /// Whether `progress` falls inside the window (start inclusive, end exclusive).
    pub fn contains(&self, progress: f32) -> bool {
        progress >= self.start() && progress < self.end()
    }
}

/// The timeline sequencer.
///
/// Holds the immutable set of `n - 1` transition windows for one item count and evaluates them
/// statelessly: the same progress always produces the same [`Frame`].
#[derive(Clone, Debug)]
pub struct Timeline {
    options: TimelineOptions,
    count: usize,
    windows: Vec<TransitionWindow>,
}

impl Timeline {
    pub fn new(count: usize, options: TimelineOptions) -> Self {
        let options = options.sanitized();
        let mut t = Self {
            options,
            count,
            windows: Vec::new(),
        };
        t.rebuild();
        t
    }

    fn rebuild(&mut self) {
        self.windows.clear();
        if self.count > 1 {
            self.windows.reserve(self.count - 1);
            for boundary in 1..self.count {
                self.windows
                    .push(TransitionWindow::new(boundary, &self.options));
            }
        }
        vdebug!(
            count = self.count,
            windows = self.windows.len(),
            hold = self.options.hold,
            "Timeline::rebuild"
        );
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Changes the item count. Windows are rebuilt only if the count actually changed.
    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        self.count = count;
        self.rebuild();
    }

    pub fn set_options(&mut self, options: TimelineOptions) {
        self.options = options.sanitized();
        self.rebuild();
    }

    pub fn windows(&self) -> &[TransitionWindow] {
        &self.windows
    }

    /// Whether the timeline animates at all (`n >= 2`).
    pub fn is_animated(&self) -> bool {
        !self.windows.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// Total timeline length in item steps: the transitions plus the terminal hold.
    pub fn length(&self) -> f32 {
        if self.count <= 1 {
            return 0.0;
        }
        self.last_index() as f32 + self.options.hold
    }

    /// Clamps a raw timeline position into `[0, n - 1]`. Non-finite input maps to `0`.
    pub fn clamp_progress(&self, position: f32) -> f32 {
        if !position.is_finite() {
            vwarn!(position, "Timeline: non-finite position");
            return 0.0;
        }
        position.clamp(0.0, self.last_index() as f32)
    }

    /// Whether a raw position has reached the terminal hold.
    pub fn is_holding(&self, position: f32) -> bool {
        self.is_animated() && self.clamp_progress(position) >= self.last_index() as f32
    }

    /// Windows that are mid-transition at `position`.
    ///
    /// Windows are confined to their boundary's cell, so at most the window of the crossed
    /// boundary (plus, at an exact cell edge, its neighbour) can be active.
    pub fn active_windows(&self, position: f32) -> impl Iterator<Item = &TransitionWindow> {
        let progress = self.clamp_progress(position);
        let cell = progress as usize;
        let lo = cell.saturating_sub(1).min(self.windows.len());
        let hi = cell.saturating_add(1).min(self.windows.len());
        self.windows[lo..hi]
            .iter()
            .filter(move |w| w.contains(progress))
    }

    /// The index the nav highlight points at for `position`.
    pub fn active_index(&self, position: f32) -> usize {
        let progress = self.clamp_progress(position);
        self.windows
            .iter()
            .take_while(|w| w.nav_switch <= progress)
            .count()
            .min(self.last_index())
    }

    pub fn evaluate(&self, position: f32) -> Frame {
        let mut frame = Frame::default();
        self.evaluate_into(position, &mut frame);
        frame
    }

    /// Like [`Self::evaluate`], reusing `frame`'s buffers.
    pub fn evaluate_into(&self, position: f32, frame: &mut Frame) {
        let progress = self.clamp_progress(position);
        vtrace!(position, progress, "Timeline::evaluate");
        interpolate_into(progress, &self.windows, self.count, frame);
    }
}
