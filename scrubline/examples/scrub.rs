// Example: sweep progress across a three-role timeline and print what a render layer would draw.
use scrubline::{Appearance, RichText, TextBlock, Timeline, TimelineEntry, TimelineOptions};

fn main() {
    let entries = vec![
        TimelineEntry::new("Platform Engineer")
            .with_company("Northwind")
            .with_dates(Some("2019"), Some("2021"))
            .with_tech("Rust, Kafka, Postgres"),
        TimelineEntry::new("Staff Engineer")
            .with_company("Contoso")
            .with_dates(Some("2021"), None)
            .with_summary(RichText::Blocks(vec![TextBlock::paragraph(
                "Led the storage team.",
            )]))
            .with_tech("Rust\nTokio\ngRPC"),
        TimelineEntry::new(""),
    ];

    let timeline = Timeline::new(entries.len(), TimelineOptions::default());
    let appearance = Appearance::default();
    println!(
        "items={} windows={} length={:.2}",
        timeline.count(),
        timeline.windows().len(),
        timeline.length()
    );

    for (i, e) in entries.iter().enumerate() {
        println!(
            "#{i} nav={:?} logo={:?} dates={:?} chips={:?}",
            e.nav_label(i),
            e.logo().map(str::to_owned).unwrap_or_else(|| e.logo_placeholder()),
            e.date_range(),
            e.tech_tags
        );
    }

    // Simulate the scroll position moving in tenths of a step, including the hold.
    let steps = (timeline.length() * 10.0).round() as usize;
    let mut frame = scrubline::Frame::default();
    for step in 0..=steps {
        let position = step as f32 / 10.0;
        timeline.evaluate_into(position, &mut frame);

        let items: Vec<String> = frame
            .items
            .iter()
            .map(|s| {
                let a = appearance.item(s);
                format!("{:.2}@{:.3}", a.opacity, a.scale)
            })
            .collect();
        let nav = appearance.nav(&frame.nav[frame.active_index]);
        println!(
            "pos={position:.1} p={:.2} active={} hold={} fill={:.2} items=[{}] nav_color={}",
            frame.progress,
            frame.active_index,
            frame.holding,
            appearance.fill(frame.fill).scale_y,
            items.join(" "),
            nav.color
        );
    }
}
