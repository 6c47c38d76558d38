use alloc::vec::Vec;

use scrubline::{Appearance, Frame};

use crate::key::AppliedSet;
use crate::{Host, PinState, Property, PropertyKind, Slot};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no element for slide {index}")]
    MissingSlide { index: usize },
}

/// Element handles for one mount, resolved once and indexed by item position.
///
/// Slides are required; cards, nav entries, nav texts, the fill bar and the container are
/// optional and simply skipped when absent.
#[derive(Clone, Debug)]
pub struct ElementRegistry<E> {
    container: Option<E>,
    fill: Option<E>,
    slides: Vec<E>,
    cards: Vec<Option<E>>,
    navs: Vec<Option<E>>,
    nav_texts: Vec<Option<E>>,
}

impl<E: Copy> ElementRegistry<E> {
    pub fn resolve(
        count: usize,
        mut lookup: impl FnMut(Slot) -> Option<E>,
    ) -> Result<Self, RegistryError> {
        let mut slides = Vec::with_capacity(count);
        for index in 0..count {
            let slide = lookup(Slot::Slide(index)).ok_or(RegistryError::MissingSlide { index })?;
            slides.push(slide);
        }
        Ok(Self {
            container: lookup(Slot::Container),
            fill: lookup(Slot::Fill),
            slides,
            cards: (0..count).map(|i| lookup(Slot::Card(i))).collect(),
            navs: (0..count).map(|i| lookup(Slot::Nav(i))).collect(),
            nav_texts: (0..count).map(|i| lookup(Slot::NavText(i))).collect(),
        })
    }

    pub fn count(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, slot: Slot) -> Option<E> {
        match slot {
            Slot::Container => self.container,
            Slot::Fill => self.fill,
            Slot::Slide(i) => self.slides.get(i).copied(),
            Slot::Card(i) => self.cards.get(i).copied().flatten(),
            Slot::Nav(i) => self.navs.get(i).copied().flatten(),
            Slot::NavText(i) => self.nav_texts.get(i).copied().flatten(),
        }
    }
}

/// Every `(slot, property)` pair written to the host, so it can all be reverted on teardown.
#[derive(Clone, Debug, Default)]
pub struct StyleLedger {
    applied: AppliedSet,
}

impl StyleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn contains(&self, slot: Slot, kind: PropertyKind) -> bool {
        self.applied.contains(&(slot, kind))
    }

    /// Writes `property` to `slot` (if it resolved) and records it.
    pub fn set<H: Host>(
        &mut self,
        host: &mut H,
        registry: &ElementRegistry<H::Element>,
        slot: Slot,
        property: Property,
    ) {
        let Some(element) = registry.get(slot) else {
            return;
        };
        host.set_property(element, property);
        self.applied.insert((slot, property.kind()));
    }

    /// Clears every recorded property from the host and empties the ledger.
    pub fn revert_all<H: Host>(&mut self, host: &mut H, registry: &ElementRegistry<H::Element>) {
        vdebug!(applied = self.applied.len(), "StyleLedger::revert_all");
        for (slot, kind) in core::mem::take(&mut self.applied) {
            if let Some(element) = registry.get(slot) {
                host.clear_property(element, kind);
            }
        }
    }

    pub fn apply_frame<H: Host>(
        &mut self,
        host: &mut H,
        registry: &ElementRegistry<H::Element>,
        appearance: &Appearance,
        frame: &Frame,
    ) {
        for (i, style) in frame.items.iter().enumerate() {
            let a = appearance.item(style);
            self.set(host, registry, Slot::Slide(i), Property::Opacity(a.opacity));
            self.set(host, registry, Slot::Slide(i), Property::Visible(a.visible));
            self.set(host, registry, Slot::Slide(i), Property::Scale(a.scale));
            self.set(host, registry, Slot::Slide(i), Property::BlurPx(a.blur_px));
            self.set(host, registry, Slot::Card(i), Property::BoxShadow(a.shadow));
        }
        for (i, style) in frame.nav.iter().enumerate() {
            let a = appearance.nav(style);
            self.set(host, registry, Slot::Nav(i), Property::Opacity(a.opacity));
            self.set(host, registry, Slot::Nav(i), Property::ShiftX(a.shift_x));
            self.set(host, registry, Slot::NavText(i), Property::Color(a.color));
        }
        if !frame.is_empty() {
            let fill = appearance.fill(frame.fill);
            self.set(host, registry, Slot::Fill, Property::ScaleY(fill.scale_y));
        }
    }

    pub fn apply_pin<H: Host>(
        &mut self,
        host: &mut H,
        registry: &ElementRegistry<H::Element>,
        pin: PinState,
        spacer: f32,
    ) {
        self.set(host, registry, Slot::Container, Property::Pin(pin));
        self.set(host, registry, Slot::Container, Property::PinSpacer(spacer));
    }
}
