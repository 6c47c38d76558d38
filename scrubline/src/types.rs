use alloc::vec::Vec;

/// Normalized visual state of one timeline item (slide + card).
///
/// Every channel is in `[0, 1]`. `scale` is normalized: `1` is the item's natural size, `0` is
/// the smallest scale the [`crate::Appearance`] allows. `blur` is normalized the same way.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStyle {
    pub visibility: f32,
    pub scale: f32,
    pub blur: f32,
    pub shadow_intensity: f32,
}

impl ItemStyle {
    pub const SHOWN: Self = Self {
        visibility: 1.0,
        scale: 1.0,
        blur: 0.0,
        shadow_intensity: 1.0,
    };

    pub const HIDDEN: Self = Self {
        visibility: 0.0,
        scale: 0.0,
        blur: 1.0,
        shadow_intensity: 0.0,
    };

    pub fn is_visible(&self) -> bool {
        self.visibility > 0.0
    }
}

/// Visual state of one side-navigation entry.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavStyle {
    pub emphasis: f32,
    pub highlighted: bool,
}

impl NavStyle {
    pub const ACTIVE: Self = Self {
        emphasis: 1.0,
        highlighted: true,
    };

    pub const REST: Self = Self {
        emphasis: 0.0,
        highlighted: false,
    };
}

/// The full derived state for one progress value.
///
/// Frames are recomputed from scratch on every update and never carry history.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Progress clamped to `[0, n - 1]`.
    pub progress: f32,
    /// The item the nav highlight (and any external progress indicator) points at.
    pub active_index: usize,
    /// Vertical scale of the progress fill bar, `1 / n` on the first item and `1` on the last.
    pub fill: f32,
    /// `true` once the last item is fully reached (the terminal hold state).
    pub holding: bool,
    pub items: Vec<ItemStyle>,
    pub nav: Vec<NavStyle>,
}

impl Frame {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The initial state: item 0 shown with nav 0 emphasized, everything else hidden.
    pub fn initial(count: usize) -> Self {
        let mut frame = Self::default();
        frame.reset(count);
        frame
    }

    /// A motionless frame where every item is fully visible.
    ///
    /// Used when the timeline cannot animate (engine unavailable, degenerate scroll range).
    pub fn static_all(count: usize) -> Self {
        let mut frame = Self::initial(count);
        for item in &mut frame.items {
            *item = ItemStyle {
                shadow_intensity: 0.0,
                ..ItemStyle::SHOWN
            };
        }
        frame.fill = if count == 0 { 0.0 } else { 1.0 };
        frame
    }

    pub(crate) fn reset(&mut self, count: usize) {
        self.progress = 0.0;
        self.active_index = 0;
        self.holding = false;
        self.fill = if count == 0 { 0.0 } else { 1.0 / count as f32 };

        self.items.clear();
        self.items.resize(count, ItemStyle::HIDDEN);
        self.nav.clear();
        self.nav.resize(count, NavStyle::REST);
        if count > 0 {
            self.items[0] = ItemStyle::SHOWN;
            self.nav[0] = NavStyle::ACTIVE;
        }
    }
}
