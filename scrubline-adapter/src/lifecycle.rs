use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::future::Future;
use core::sync::atomic::{AtomicBool, Ordering};

use scrubline::{Appearance, Frame, Timeline, TimelineOptions};

use crate::{
    ElementRegistry, Host, HostEvent, ListenerId, RegistryError, ScrollTracker, StyleLedger,
    TrackerOptions, Viewport,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("animation engine is unavailable")]
    Unavailable,
    #[error("animation engine failed to load: {0}")]
    Load(String),
}

/// Why a mounted timeline renders statically instead of animating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// No items: nothing is rendered and nothing is bound.
    Empty,
    /// One item: shown as-is, no sequencer, no pinning.
    SingleItem,
    Engine(EngineError),
    MissingElements(RegistryError),
    /// The viewport yields a zero scroll range. Listeners stay bound so a resize can recover.
    DegenerateRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initializing,
    /// Animating, with the nav highlight on the given item.
    Active(usize),
    /// The last item has been reached and stays put while the hold is scrolled through.
    Holding,
    Static,
    /// Terminal. Nothing resumes after teardown.
    TornDown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum EngineStatus {
    NotLoaded,
    Ready,
    Failed(EngineError),
}

/// A "still mounted" flag shared between a lifecycle and its pending initializations.
#[derive(Clone, Debug)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Ready,
    Failed(EngineError),
    /// The lifecycle was torn down while the engine was loading.
    Cancelled,
}

/// The suspended half of a mount, waiting on the animation engine.
#[must_use = "a pending init does nothing until it is resolved and passed to `finish_mount`"]
#[derive(Debug)]
pub struct PendingInit {
    guard: MountGuard,
}

impl PendingInit {
    pub fn guard(&self) -> &MountGuard {
        &self.guard
    }

    /// Awaits the engine load, then checks the mount guard captured before suspending.
    pub async fn resolve<F>(self, load: F) -> InitOutcome
    where
        F: Future<Output = Result<(), EngineError>>,
    {
        let result = load.await;
        if !self.guard.is_mounted() {
            vdebug!("PendingInit: unmounted while loading, dropping init");
            return InitOutcome::Cancelled;
        }
        match result {
            Ok(()) => InitOutcome::Ready,
            Err(err) => InitOutcome::Failed(err),
        }
    }
}

/// Configuration for [`Lifecycle`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MountOptions {
    pub timeline: TimelineOptions,
    pub tracker: TrackerOptions,
    pub appearance: Appearance,
}

impl MountOptions {
    pub fn with_timeline(mut self, timeline: TimelineOptions) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn with_tracker(mut self, tracker: TrackerOptions) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }
}

#[derive(Clone, Debug)]
struct Motion {
    timeline: Timeline,
    tracker: ScrollTracker,
    listeners: Vec<ListenerId>,
}

/// Owns one mounted timeline: element handles, scroll tracking, the sequencer, and a ledger of
/// every style it has written.
///
/// Hosts drive it by calling:
/// - `begin_mount` / `finish_mount` (or `mount` when no engine has to load)
/// - `on_scroll` / `on_resize` when the registered listeners fire
/// - `on_frame` once per rendered frame; scroll and resize only mark state dirty
/// - `unmount` exactly once, when the container goes away
#[derive(Debug)]
pub struct Lifecycle<E> {
    options: MountOptions,
    phase: Phase,
    count: usize,
    viewport: Viewport,
    guard: MountGuard,
    engine: EngineStatus,
    fallback: Option<Fallback>,
    registry: Option<ElementRegistry<E>>,
    motion: Option<Motion>,
    ledger: StyleLedger,
    frame: Frame,
    dirty: bool,
}

impl<E: Copy> Lifecycle<E> {
    pub fn new(options: MountOptions) -> Self {
        Self {
            options,
            phase: Phase::Uninitialized,
            count: 0,
            viewport: Viewport::default(),
            guard: MountGuard::new(),
            engine: EngineStatus::NotLoaded,
            fallback: None,
            registry: None,
            motion: None,
            ledger: StyleLedger::new(),
            frame: Frame::default(),
            dirty: false,
        }
    }

    pub fn options(&self) -> &MountOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The most recently applied frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// The item an external progress indicator should point at.
    pub fn active_index(&self) -> usize {
        self.frame.active_index
    }

    pub fn fallback(&self) -> Option<&Fallback> {
        self.fallback.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(self.phase, Phase::Uninitialized | Phase::TornDown)
    }

    pub fn guard(&self) -> &MountGuard {
        &self.guard
    }

    /// Number of `(element, property)` pairs currently written to the host.
    pub fn applied_styles(&self) -> usize {
        self.ledger.len()
    }

    pub fn listener_count(&self) -> usize {
        self.motion.as_ref().map_or(0, |m| m.listeners.len())
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.motion.as_ref().map(|m| &m.timeline)
    }

    pub fn tracker(&self) -> Option<&ScrollTracker> {
        self.motion.as_ref().map(|m| &m.tracker)
    }

    /// Starts a mount.
    ///
    /// With zero or one item the timeline renders statically right away and `None` is returned.
    /// Otherwise the lifecycle enters `Initializing` and the returned [`PendingInit`] must be
    /// resolved against the engine load and handed to [`Self::finish_mount`].
    pub fn begin_mount<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        count: usize,
        viewport: Viewport,
    ) -> Option<PendingInit> {
        if self.phase != Phase::Uninitialized {
            vwarn!(phase = ?self.phase, "Lifecycle::begin_mount called twice");
            return None;
        }
        vdebug!(count, "Lifecycle::begin_mount");
        self.count = count;
        self.viewport = viewport;
        self.start(host)
    }

    fn start<H: Host<Element = E>>(&mut self, host: &mut H) -> Option<PendingInit> {
        match self.count {
            0 => {
                self.render_static(host, Fallback::Empty, Frame::default());
                None
            }
            1 => {
                self.render_static(host, Fallback::SingleItem, Frame::initial(1));
                None
            }
            _ => {
                self.phase = Phase::Initializing;
                Some(PendingInit {
                    guard: self.guard.clone(),
                })
            }
        }
    }

    /// Completes a mount started with [`Self::begin_mount`].
    ///
    /// Results that arrive after teardown (or after the mount stopped waiting) are dropped.
    pub fn finish_mount<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        outcome: InitOutcome,
        now_ms: u64,
    ) {
        if self.phase != Phase::Initializing || !self.guard.is_mounted() {
            vwarn!(phase = ?self.phase, "Lifecycle: ignoring late init result");
            return;
        }
        match outcome {
            InitOutcome::Ready => {
                self.engine = EngineStatus::Ready;
                self.build(host, now_ms);
            }
            InitOutcome::Failed(err) => {
                vwarn!(%err, "Lifecycle: engine unavailable, rendering statically");
                self.engine = EngineStatus::Failed(err.clone());
                let frame = Frame::static_all(self.count);
                self.render_static(host, Fallback::Engine(err), frame);
            }
            InitOutcome::Cancelled => {}
        }
    }

    /// Mounts without an asynchronous engine load.
    pub fn mount<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        count: usize,
        viewport: Viewport,
        now_ms: u64,
    ) {
        if self.begin_mount(host, count, viewport).is_some() {
            self.finish_mount(host, InitOutcome::Ready, now_ms);
        }
    }

    /// Rebuilds everything for a new item count.
    ///
    /// Returns a [`PendingInit`] when the new count needs an engine that has not been loaded yet
    /// (the mount started with fewer than two items).
    pub fn set_count<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
        count: usize,
        now_ms: u64,
    ) -> Option<PendingInit> {
        if matches!(self.phase, Phase::Uninitialized | Phase::TornDown) || count == self.count {
            return None;
        }
        vdebug!(from = self.count, to = count, "Lifecycle::set_count");

        self.release(host);
        self.count = count;
        self.fallback = None;
        if count <= 1 {
            return self.start(host);
        }
        match self.engine.clone() {
            EngineStatus::Ready => {
                self.build(host, now_ms);
                None
            }
            EngineStatus::Failed(err) => {
                let frame = Frame::static_all(count);
                self.render_static(host, Fallback::Engine(err), frame);
                None
            }
            EngineStatus::NotLoaded => {
                if self.phase == Phase::Initializing {
                    // The load already in flight will build with the new count.
                    return None;
                }
                self.start(host)
            }
        }
    }

    fn render_static<H: Host<Element = E>>(&mut self, host: &mut H, reason: Fallback, frame: Frame) {
        vdebug!(?reason, count = self.count, "Lifecycle: static rendering");
        self.frame = frame;
        if self.count > 0 {
            match ElementRegistry::resolve(self.count, |slot| host.element(slot)) {
                Ok(registry) => {
                    self.ledger
                        .apply_frame(host, &registry, &self.options.appearance, &self.frame);
                    self.registry = Some(registry);
                }
                Err(_) => {
                    vwarn!(count = self.count, "Lifecycle: cannot resolve elements for static rendering");
                }
            }
        }
        self.fallback = Some(reason);
        self.phase = Phase::Static;
    }

    /// Resolves elements, builds the sequencer and tracker, and binds listeners as one step,
    /// then applies the initial frame.
    fn build<H: Host<Element = E>>(&mut self, host: &mut H, now_ms: u64) {
        let registry = match ElementRegistry::resolve(self.count, |slot| host.element(slot)) {
            Ok(registry) => registry,
            Err(err) => {
                vwarn!(%err, "Lifecycle: missing elements, rendering statically");
                self.frame = Frame::static_all(self.count);
                self.fallback = Some(Fallback::MissingElements(err));
                self.phase = Phase::Static;
                return;
            }
        };
        let timeline = Timeline::new(self.count, self.options.timeline);
        let tracker = ScrollTracker::new(
            self.count,
            timeline.length(),
            self.viewport,
            self.options.tracker,
        );
        let listeners = vec![host.listen(HostEvent::Scroll), host.listen(HostEvent::Resize)];

        self.registry = Some(registry);
        self.motion = Some(Motion {
            timeline,
            tracker,
            listeners,
        });
        self.fallback = None;
        vdebug!(count = self.count, "Lifecycle: bound");

        // Initial state first, then start scrubbing towards wherever the page already is.
        self.sync(host);
        let scroll_offset = self.viewport.scroll_offset;
        if let Some(motion) = &mut self.motion {
            motion.tracker.on_scroll(scroll_offset, now_ms);
        }
        self.dirty = true;
    }

    /// Recomputes the frame from the tracker and writes it to the host.
    fn sync<H: Host<Element = E>>(&mut self, host: &mut H) {
        let (Some(motion), Some(registry)) = (&self.motion, &self.registry) else {
            return;
        };
        if motion.tracker.is_tracking() {
            motion
                .timeline
                .evaluate_into(motion.tracker.position(), &mut self.frame);
            self.phase = if self.frame.holding {
                Phase::Holding
            } else {
                Phase::Active(self.frame.active_index)
            };
            self.fallback = None;
        } else {
            if self.fallback != Some(Fallback::DegenerateRange) {
                vdebug!(count = self.count, "Lifecycle: degenerate range, rendering statically");
            }
            self.frame = Frame::static_all(self.count);
            self.phase = Phase::Static;
            self.fallback = Some(Fallback::DegenerateRange);
        }
        self.ledger
            .apply_frame(host, registry, &self.options.appearance, &self.frame);
        self.ledger
            .apply_pin(host, registry, motion.tracker.pin(), motion.tracker.spacer());
    }

    /// Records a scroll offset. The frame is recomputed on the next [`Self::on_frame`].
    pub fn on_scroll(&mut self, scroll_offset: f32, now_ms: u64) {
        let Some(motion) = &mut self.motion else {
            return;
        };
        motion.tracker.on_scroll(scroll_offset, now_ms);
        self.viewport.scroll_offset = motion.tracker.viewport().scroll_offset;
        self.dirty = true;
    }

    /// Records a viewport resize. Returns the scroll offset the host should restore so the
    /// progress already reached is kept.
    pub fn on_resize(&mut self, viewport_height: f32) -> Option<f32> {
        let motion = self.motion.as_mut()?;
        self.viewport.height = viewport_height;
        self.dirty = true;
        let restored = motion.tracker.on_resize(viewport_height)?;
        self.viewport.scroll_offset = restored;
        Some(restored)
    }

    /// Advances scrubbing and, if anything changed since the last frame, applies a new frame.
    ///
    /// Returns `true` when the host was updated.
    pub fn on_frame<H: Host<Element = E>>(&mut self, host: &mut H, now_ms: u64) -> bool {
        let Some(motion) = &mut self.motion else {
            return false;
        };
        let moved = motion.tracker.tick(now_ms);
        if !moved && !self.dirty {
            return false;
        }
        self.dirty = false;
        vtrace!(now_ms, "Lifecycle::on_frame");
        self.sync(host);
        true
    }

    fn release<H: Host<Element = E>>(&mut self, host: &mut H) {
        if let Some(motion) = self.motion.take() {
            for id in motion.listeners {
                host.unlisten(id);
            }
        }
        if let Some(registry) = self.registry.take() {
            self.ledger.revert_all(host, &registry);
        }
        self.dirty = false;
    }

    /// Detaches every listener and reverts every style written so far. Idempotent.
    pub fn unmount<H: Host<Element = E>>(&mut self, host: &mut H) {
        if self.phase == Phase::TornDown {
            return;
        }
        self.guard.revoke();
        self.release(host);
        self.frame = Frame::default();
        self.phase = Phase::TornDown;
        vdebug!("Lifecycle::unmount");
    }
}
