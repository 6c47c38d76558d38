use scrubline::{BoxShadow, Rgba};

use crate::PinState;

/// A named element of one mounted timeline, addressed by item position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slot {
    /// The pinned container.
    Container,
    /// The progress fill bar.
    Fill,
    Slide(usize),
    Card(usize),
    Nav(usize),
    NavText(usize),
}

/// A visual property the lifecycle writes onto an element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    Opacity(f32),
    Visible(bool),
    Scale(f32),
    BlurPx(f32),
    BoxShadow(BoxShadow),
    ShiftX(f32),
    Color(Rgba),
    ScaleY(f32),
    Pin(PinState),
    PinSpacer(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKind {
    Opacity,
    Visible,
    Scale,
    BlurPx,
    BoxShadow,
    ShiftX,
    Color,
    ScaleY,
    Pin,
    PinSpacer,
}

impl Property {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Opacity(_) => PropertyKind::Opacity,
            Self::Visible(_) => PropertyKind::Visible,
            Self::Scale(_) => PropertyKind::Scale,
            Self::BlurPx(_) => PropertyKind::BlurPx,
            Self::BoxShadow(_) => PropertyKind::BoxShadow,
            Self::ShiftX(_) => PropertyKind::ShiftX,
            Self::Color(_) => PropertyKind::Color,
            Self::ScaleY(_) => PropertyKind::ScaleY,
            Self::Pin(_) => PropertyKind::Pin,
            Self::PinSpacer(_) => PropertyKind::PinSpacer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostEvent {
    Scroll,
    Resize,
}

/// Opaque handle for a listener registered with [`Host::listen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListenerId(pub u64);

/// The render layer a timeline is mounted into.
///
/// Implementations hold the real elements (DOM nodes, widget ids...). The lifecycle only ever
/// talks to them through this trait, so it can be driven without any UI present.
pub trait Host {
    type Element: Copy;

    /// Looks up the element for `slot`. Called once per slot on mount and on rebuild.
    fn element(&self, slot: Slot) -> Option<Self::Element>;

    /// Writes an inline property, overriding whatever the markup specifies.
    fn set_property(&mut self, element: Self::Element, property: Property);

    /// Removes an inline property previously written with `set_property`.
    fn clear_property(&mut self, element: Self::Element, kind: PropertyKind);

    /// Starts delivering `event` to the timeline.
    fn listen(&mut self, event: HostEvent) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);
}
