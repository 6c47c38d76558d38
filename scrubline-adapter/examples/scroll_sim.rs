use std::collections::BTreeMap;

use scrubline_adapter::{
    Host, HostEvent, InitOutcome, Lifecycle, ListenerId, MountOptions, Property, PropertyKind,
    Slot, Viewport,
};

// A stand-in render layer: keeps inline properties in a map, like a DOM would.
#[derive(Default)]
struct MapHost {
    styles: BTreeMap<(Slot, PropertyKind), Property>,
    listeners: Vec<(ListenerId, HostEvent)>,
    next: u64,
}

impl Host for MapHost {
    type Element = Slot;

    fn element(&self, slot: Slot) -> Option<Slot> {
        Some(slot)
    }

    fn set_property(&mut self, element: Slot, property: Property) {
        self.styles.insert((element, property.kind()), property);
    }

    fn clear_property(&mut self, element: Slot, kind: PropertyKind) {
        self.styles.remove(&(element, kind));
    }

    fn listen(&mut self, event: HostEvent) -> ListenerId {
        self.next += 1;
        self.listeners.push((ListenerId(self.next), event));
        ListenerId(self.next)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(l, _)| *l != id);
    }
}

fn opacity(host: &MapHost, i: usize) -> f32 {
    match host.styles.get(&(Slot::Slide(i), PropertyKind::Opacity)) {
        Some(Property::Opacity(v)) => *v,
        _ => f32::NAN,
    }
}

fn main() {
    // Example: a user scrolls through a four-item timeline, resizes the window, then leaves.
    //
    // A real adapter would:
    // - resolve the engine load future before finishing the mount
    // - forward scroll/resize events to the lifecycle
    // - call on_frame from its frame loop
    // - call unmount when the container is removed
    let mut host = MapHost::default();
    let mut lc = Lifecycle::new(MountOptions::default());
    let viewport = Viewport::new(900.0, 0.0, 300.0);

    let Some(pending) = lc.begin_mount(&mut host, 4, viewport) else {
        println!("rendered statically: {:?}", lc.fallback());
        return;
    };
    let outcome = pollster::block_on(pending.resolve(async { Ok(()) }));
    assert_eq!(outcome, InitOutcome::Ready);
    lc.finish_mount(&mut host, outcome, 0);
    println!(
        "mounted: phase={:?} listeners={} range={:?}",
        lc.phase(),
        host.listeners.len(),
        lc.tracker().map(|t| t.total_range())
    );

    let mut now_ms = 0u64;
    let mut offset = 0.0f32;
    while offset < 4000.0 {
        now_ms += 16;
        offset += 40.0;
        lc.on_scroll(offset, now_ms);
        if lc.on_frame(&mut host, now_ms) && now_ms % 320 == 0 {
            let items: Vec<String> = (0..4).map(|i| format!("{:.2}", opacity(&host, i))).collect();
            println!(
                "t={now_ms} off={offset} phase={:?} p={:.2} items=[{}] pin={:?}",
                lc.phase(),
                lc.frame().progress,
                items.join(" "),
                host.styles.get(&(Slot::Container, PropertyKind::Pin))
            );
        }
    }

    if let Some(restored) = lc.on_resize(600.0) {
        println!("resized: restore scroll to {restored:.1}");
        lc.on_scroll(restored, now_ms);
    }
    while lc.on_frame(&mut host, now_ms) {
        now_ms += 16;
    }
    println!("settled: phase={:?} p={:.2}", lc.phase(), lc.frame().progress);

    lc.unmount(&mut host);
    println!(
        "unmounted: styles={} listeners={}",
        host.styles.len(),
        host.listeners.len()
    );
}
