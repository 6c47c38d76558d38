use crate::Easing;

/// A channel's window relative to a boundary `i`: it runs from `i + start` to `i + end`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Segment {
    pub const fn new(start: f32, end: f32, easing: Easing) -> Self {
        Self { start, end, easing }
    }

    fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Relative offsets for every channel of a [`crate::TransitionWindow`].
///
/// Offsets are measured in item steps around the boundary. When windows are built, every
/// segment is clamped into the boundary's cell `[i - 1, i]`, so a segment that reaches past the
/// boundary (the default fade-in and shadow-in tails) settles exactly at `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowOffsets {
    /// Outgoing item: visible -> hidden, scaled down, blurred.
    pub fade_out: Segment,
    /// Incoming item: hidden -> visible.
    pub fade_in: Segment,
    /// Outgoing card: glow -> rest shadow.
    pub shadow_out: Segment,
    /// Incoming card: rest -> glow shadow.
    pub shadow_in: Segment,
    /// Outgoing nav entry: emphasized -> rest.
    pub nav_out: Segment,
    /// Incoming nav entry: rest -> emphasized.
    pub nav_in: Segment,
    /// Where the highlighted nav entry (and the active index) switches to the incoming item.
    pub nav_switch: f32,
}

impl Default for WindowOffsets {
    fn default() -> Self {
        Self {
            fade_out: Segment::new(-0.5, -0.3, Easing::EaseInOutCubic),
            fade_in: Segment::new(-0.3, 0.2, Easing::CubicOut),
            shadow_out: Segment::new(-0.5, -0.2, Easing::QuadOut),
            shadow_in: Segment::new(-0.2, 0.2, Easing::QuadOut),
            nav_out: Segment::new(-0.4, -0.1, Easing::QuadOut),
            nav_in: Segment::new(-0.3, 0.0, Easing::QuadOut),
            nav_switch: -0.3,
        }
    }
}

impl WindowOffsets {
    fn segments(&self) -> [&Segment; 6] {
        [
            &self.fade_out,
            &self.fade_in,
            &self.shadow_out,
            &self.shadow_in,
            &self.nav_out,
            &self.nav_in,
        ]
    }

    fn is_finite(&self) -> bool {
        self.nav_switch.is_finite() && self.segments().iter().all(|s| s.is_finite())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    #[error("hold must be finite and non-negative (got {0})")]
    InvalidHold(f32),
    #[error("window offsets must be finite")]
    NonFiniteOffsets,
}

/// Configuration for [`crate::Timeline`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimelineOptions {
    /// Scroll distance, in item steps, the last entry rests after it has settled.
    ///
    /// The default (1.6) is one step for the progress indicator tail plus a 0.6 step pause.
    pub hold: f32,
    pub offsets: WindowOffsets,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            hold: 1.6,
            offsets: WindowOffsets::default(),
        }
    }
}

impl TimelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hold(mut self, hold: f32) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_offsets(mut self, offsets: WindowOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.hold.is_finite() || self.hold < 0.0 {
            return Err(OptionsError::InvalidHold(self.hold));
        }
        if !self.offsets.is_finite() {
            return Err(OptionsError::NonFiniteOffsets);
        }
        Ok(())
    }

    /// Returns a copy that is always usable: a bad hold becomes 0 and non-finite offsets fall
    /// back to the defaults.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        if self.validate().is_err() {
            vwarn!(hold = self.hold, "TimelineOptions: sanitizing invalid options");
            if !out.hold.is_finite() || out.hold < 0.0 {
                out.hold = 0.0;
            }
            if !out.offsets.is_finite() {
                out.offsets = WindowOffsets::default();
            }
        }
        out
    }
}
