use crate::*;

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;
use proptest::prelude::*;

const EPS: f32 = 1e-5;

fn timeline(n: usize) -> Timeline {
    Timeline::new(n, TimelineOptions::default())
}

fn visibilities(frame: &Frame) -> Vec<f32> {
    frame.items.iter().map(|i| i.visibility).collect()
}

#[test]
fn three_items_at_boundaries() {
    let t = timeline(3);

    let f = t.evaluate(0.0);
    assert_eq!(visibilities(&f), vec![1.0, 0.0, 0.0]);
    assert_eq!(f.nav[0].emphasis, 1.0);
    assert!(f.nav[0].highlighted);
    assert_eq!(f.active_index, 0);

    let f = t.evaluate(1.0);
    assert_eq!(visibilities(&f), vec![0.0, 1.0, 0.0]);
    assert_eq!(f.items[1].scale, 1.0);
    assert_eq!(f.nav[1].emphasis, 1.0);
    assert_eq!(f.nav[0].emphasis, 0.0);
    assert!(f.nav[1].highlighted && !f.nav[0].highlighted);
    assert_eq!(f.active_index, 1);
}

#[test]
fn past_last_boundary_holds_last_item() {
    let t = timeline(3);
    for p in [2.0, 2.3, 2.6, 3.4, 100.0] {
        let f = t.evaluate(p);
        assert_eq!(visibilities(&f), vec![0.0, 0.0, 1.0], "p={p}");
        assert_eq!(f.active_index, 2);
        assert_eq!(f.progress, 2.0);
        assert!(f.holding);
        assert_eq!(f.fill, 1.0);
    }
    assert!(t.is_holding(2.6));
    assert!(!t.is_holding(1.9));
}

#[test]
fn length_includes_hold() {
    let t = Timeline::new(4, TimelineOptions::default().with_hold(0.5));
    assert_eq!(t.length(), 3.5);
    assert_eq!(timeline(1).length(), 0.0);
    assert_eq!(timeline(0).length(), 0.0);
}

#[test]
fn single_item_builds_no_windows() {
    let t = timeline(1);
    assert!(t.windows().is_empty());
    assert!(!t.is_animated());
    for p in [0.0, 0.5, 3.0, -2.0] {
        let f = t.evaluate(p);
        assert_eq!(f.active_index, 0);
        assert_eq!(visibilities(&f), vec![1.0]);
        assert!(!f.holding);
    }
}

#[test]
fn zero_items_is_empty_frame() {
    let t = timeline(0);
    assert!(t.windows().is_empty());
    let f = t.evaluate(1.0);
    assert!(f.is_empty());
    assert!(f.nav.is_empty());
    assert_eq!(f.fill, 0.0);
    assert_eq!(t.active_index(5.0), 0);
}

#[test]
fn windows_have_default_offsets_clamped_to_their_cell() {
    let t = timeline(3);
    assert_eq!(t.windows().len(), 2);
    let w = &t.windows()[1];
    assert_eq!(w.boundary, 2);
    assert_eq!((w.outgoing(), w.incoming()), (1, 2));
    assert!((w.fade_out.start - 1.5).abs() < EPS);
    assert!((w.fade_out.end - 1.7).abs() < EPS);
    assert!((w.fade_in.start - 1.7).abs() < EPS);
    // The +0.2 tail is cut at the boundary.
    assert_eq!(w.fade_in.end, 2.0);
    assert!((w.nav_switch - 1.7).abs() < EPS);
    assert!(w.nav_in.end <= w.fade_in.end);
}

#[test]
fn active_windows_only_mid_transition() {
    let t = timeline(4);
    assert_eq!(t.active_windows(0.0).count(), 0);
    assert_eq!(t.active_windows(1.0).count(), 0);
    let active: Vec<usize> = t.active_windows(1.6).map(|w| w.boundary).collect();
    assert_eq!(active, vec![2]);
    let active: Vec<usize> = t.active_windows(2.95).map(|w| w.boundary).collect();
    assert_eq!(active, vec![3]);
    assert_eq!(t.active_windows(3.0).count(), 0);
    assert_eq!(t.active_windows(9.0).count(), 0);
}

#[test]
fn nav_switches_at_switch_point() {
    let t = timeline(3);
    assert_eq!(t.active_index(0.69), 0);
    assert_eq!(t.active_index(0.7), 1);
    assert_eq!(t.active_index(1.69), 1);
    assert_eq!(t.active_index(1.7), 2);
}

#[test]
fn mid_transition_blends_only_adjacent_items() {
    let t = timeline(4);
    let f = t.evaluate(1.8);
    assert_eq!(f.items[0].visibility, 0.0);
    assert_eq!(f.items[3].visibility, 0.0);
    assert_eq!(f.items[1].visibility, 0.0);
    assert!(f.items[2].visibility > 0.0 && f.items[2].visibility < 1.0);

    let f = t.evaluate(1.6);
    assert!(f.items[1].visibility > 0.0 && f.items[1].visibility < 1.0);
    assert_eq!(f.items[2].visibility, 0.0);
    assert!(f.items[1].blur > 0.0);
}

#[test]
fn shadow_follows_its_own_windows() {
    let t = timeline(2);
    assert_eq!(t.evaluate(0.0).items[0].shadow_intensity, 1.0);
    assert_eq!(t.evaluate(0.0).items[1].shadow_intensity, 0.0);
    let f = t.evaluate(0.65);
    assert!(f.items[0].shadow_intensity > 0.0 && f.items[0].shadow_intensity < 1.0);
    let f = t.evaluate(1.0);
    assert_eq!(f.items[0].shadow_intensity, 0.0);
    assert_eq!(f.items[1].shadow_intensity, 1.0);
}

#[test]
fn fill_tracks_progress() {
    let t = timeline(4);
    assert_eq!(t.evaluate(0.0).fill, 0.25);
    assert_eq!(t.evaluate(1.0).fill, 0.5);
    assert_eq!(t.evaluate(3.0).fill, 1.0);
}

#[test]
fn non_finite_progress_is_treated_as_start() {
    let t = timeline(3);
    assert_eq!(t.evaluate(f32::NAN), t.evaluate(0.0));
    assert_eq!(t.evaluate(f32::INFINITY), t.evaluate(0.0));
    assert_eq!(interpolate(f32::NAN, t.windows(), 3), t.evaluate(0.0));
}

#[test]
fn zero_width_windows_do_not_divide_by_zero() {
    let mut offsets = WindowOffsets::default();
    for seg in [
        &mut offsets.fade_out,
        &mut offsets.fade_in,
        &mut offsets.shadow_out,
        &mut offsets.shadow_in,
        &mut offsets.nav_out,
        &mut offsets.nav_in,
    ] {
        seg.start = -0.5;
        seg.end = -0.5;
    }
    offsets.nav_switch = -0.5;
    let t = Timeline::new(3, TimelineOptions::default().with_offsets(offsets));
    for i in 0..=40 {
        let f = t.evaluate(i as f32 * 0.05);
        for item in &f.items {
            assert!(item.visibility.is_finite());
            assert!((0.0..=1.0).contains(&item.visibility));
        }
    }
    assert_eq!(visibilities(&t.evaluate(0.49)), vec![1.0, 0.0, 0.0]);
    assert_eq!(visibilities(&t.evaluate(0.5)), vec![0.0, 1.0, 0.0]);
}

#[test]
fn windows_collapsed_onto_the_previous_item_keep_integers_exact() {
    let mut early_fade_out = WindowOffsets::default();
    early_fade_out.fade_out = Segment::new(-1.0, -1.0, Easing::Linear);
    let mut early_fade_in = WindowOffsets::default();
    early_fade_in.fade_in = Segment::new(-1.5, -1.0, Easing::Linear);
    let mut early_everything = WindowOffsets::default();
    early_everything.fade_out = Segment::new(-2.0, -1.5, Easing::Linear);
    early_everything.fade_in = Segment::new(-3.0, -1.0, Easing::CubicOut);
    early_everything.nav_in = Segment::new(-1.2, -1.1, Easing::QuadOut);
    early_everything.nav_switch = -1.0;

    for offsets in [early_fade_out, early_fade_in, early_everything] {
        let t = Timeline::new(3, TimelineOptions::default().with_offsets(offsets));
        assert_eq!(visibilities(&t.evaluate(0.0)), vec![1.0, 0.0, 0.0]);
        assert_eq!(visibilities(&t.evaluate(1.0)), vec![0.0, 1.0, 0.0]);
        assert_eq!(visibilities(&t.evaluate(2.0)), vec![0.0, 0.0, 1.0]);
        assert_eq!(t.evaluate(0.0).active_index, 0);
        assert_eq!(t.evaluate(1.0).active_index, 1);
    }
}

#[test]
fn invalid_options_are_sanitized() {
    let opts = TimelineOptions::default().with_hold(-3.0);
    assert_eq!(opts.validate(), Err(OptionsError::InvalidHold(-3.0)));
    let t = Timeline::new(3, opts);
    assert_eq!(t.options().hold, 0.0);
    assert_eq!(t.length(), 2.0);

    let mut offsets = WindowOffsets::default();
    offsets.fade_in.end = f32::NAN;
    let opts = TimelineOptions::default().with_offsets(offsets);
    assert_eq!(opts.validate(), Err(OptionsError::NonFiniteOffsets));
    assert_eq!(Timeline::new(3, opts).options().offsets, WindowOffsets::default());
}

#[test]
fn nav_in_never_outlasts_fade_in() {
    let mut offsets = WindowOffsets::default();
    offsets.fade_in = Segment::new(-0.6, -0.4, Easing::Linear);
    offsets.nav_in = Segment::new(-0.3, 0.0, Easing::Linear);
    let t = Timeline::new(2, TimelineOptions::default().with_offsets(offsets));
    let w = &t.windows()[0];
    assert!(w.nav_in.end <= w.fade_in.end);
    let f = t.evaluate(w.fade_in.end);
    assert_eq!(f.items[1].visibility, 1.0);
    assert_eq!(f.nav[1].emphasis, 1.0);
}

#[test]
fn set_count_rebuilds_windows() {
    let mut t = timeline(2);
    assert_eq!(t.windows().len(), 1);
    t.set_count(5);
    assert_eq!(t.windows().len(), 4);
    assert_eq!(t.windows()[3].boundary, 4);
    t.set_count(1);
    assert!(t.windows().is_empty());
}

#[test]
fn evaluate_into_reuses_buffers() {
    let t = timeline(3);
    let mut frame = Frame::default();
    t.evaluate_into(0.0, &mut frame);
    t.evaluate_into(1.0, &mut frame);
    assert_eq!(frame, t.evaluate(1.0));
}

#[test]
fn static_frame_shows_everything() {
    let f = Frame::static_all(3);
    assert!(f.items.iter().all(|i| i.visibility == 1.0 && i.scale == 1.0));
    assert_eq!(f.active_index, 0);
    assert!(f.nav[0].highlighted);
    assert_eq!(f.fill, 1.0);
    assert!(Frame::static_all(0).is_empty());
}

#[test]
fn easings_hit_endpoints() {
    for e in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::QuadOut,
        Easing::CubicOut,
        Easing::EaseInOutCubic,
    ] {
        assert_eq!(e.sample(0.0), 0.0, "{e:?}");
        assert!((e.sample(1.0) - 1.0).abs() < EPS, "{e:?}");
        assert!(e.sample(0.5) > 0.0 && e.sample(0.5) < 1.0);
        assert_eq!(e.sample(-1.0), 0.0);
    }
    // Ease-out is ahead of linear, ease-in-out is behind it early on.
    assert!(Easing::CubicOut.sample(0.25) > 0.25);
    assert!(Easing::EaseInOutCubic.sample(0.25) < 0.25);
}

#[test]
fn appearance_maps_styles_to_attributes() {
    let a = Appearance::default();

    let shown = a.item(&ItemStyle::SHOWN);
    assert_eq!(shown.opacity, 1.0);
    assert!(shown.visible);
    assert_eq!(shown.scale, 1.0);
    assert_eq!(shown.blur_px, 0.0);
    assert_eq!(shown.shadow, a.card_glow);

    let hidden = a.item(&ItemStyle::HIDDEN);
    assert!(!hidden.visible);
    assert!((hidden.scale - 0.92).abs() < EPS);
    assert_eq!(hidden.blur_px, 4.0);
    assert_eq!(hidden.shadow, a.card_rest);

    let nav = a.nav(&NavStyle::ACTIVE);
    assert_eq!(nav.opacity, 1.0);
    assert_eq!(nav.shift_x, 4.0);
    assert_eq!(nav.color.to_string(), "rgb(192, 132, 252)");
    let nav = a.nav(&NavStyle::REST);
    assert!((nav.opacity - 0.4).abs() < EPS);
    assert_eq!(nav.color.to_string(), "rgba(255, 255, 255, 0.700)");

    assert_eq!(a.fill(1.5).scale_y, 1.0);
    assert_eq!(
        a.card_rest.to_string(),
        "0 0.0px 0.0px rgba(168, 85, 247, 0.000), 0 10.0px 30.0px rgba(0, 0, 0, 0.300)"
    );
}

#[test]
fn rich_text_flattens_and_chips() {
    let blocks = RichText::Blocks(vec![
        TextBlock::paragraph("Rust, TypeScript"),
        TextBlock {
            kind: "list-item".to_string(),
            text: None,
        },
        TextBlock::paragraph("WebGL • GSAP\n  Next.js  "),
    ]);
    assert_eq!(
        blocks.chips(),
        vec!["Rust", "TypeScript", "WebGL", "GSAP", "Next.js"]
    );
    assert_eq!(RichText::from("  hello  ").to_plain(), "hello");
    assert!(RichText::Empty.is_empty());
    assert!(RichText::Blocks(vec![TextBlock::default()]).is_empty());
    assert!(RichText::from(",, ,").chips().is_empty());
}

#[test]
fn entry_fallbacks() {
    let e = TimelineEntry::default();
    assert_eq!(e.nav_label(2), "Role 3");
    assert_eq!(e.company_label(), "");
    assert_eq!(e.logo(), None);
    assert_eq!(e.logo_placeholder(), "LOGO");
    assert_eq!(e.date_range(), None);

    let e = TimelineEntry::new("Engineer")
        .with_company("Extraordinarily Long Company")
        .with_dates(Some("2021"), Some("2024"))
        .with_logo_url("")
        .with_tech("Rust, Go");
    assert_eq!(e.nav_label(0), "Engineer");
    assert_eq!(e.logo(), None);
    assert_eq!(e.logo_placeholder(), "Extraordin");
    assert_eq!(e.date_range().as_deref(), Some("2021 \u{2014} 2024"));
    assert_eq!(e.tech_tags, vec!["Rust", "Go"]);

    let e = TimelineEntry::new("x").with_dates(None, Some("now"));
    assert_eq!(e.date_range().as_deref(), Some("now"));
}

#[cfg(feature = "serde")]
#[test]
fn entries_deserialize_from_cms_shapes() {
    let json = r#"[
        {
            "role": "Lead",
            "company": "Acme",
            "startdate": "2020",
            "enddate": "2023",
            "summary": [{ "type": "paragraph", "text": "Built things.", "spans": [] }],
            "tech": [{ "type": "paragraph", "text": "Rust, WASM" }, { "type": "paragraph", "text": 7 }],
            "logo": { "url": "https://example.com/acme.png", "alt": null }
        },
        {
            "role": null,
            "summary": "Plain summary",
            "techTags": ["Go", "SQL"],
            "logoUrl": ""
        },
        {
            "summary": 42,
            "tech": "A • B",
            "logo": {}
        }
    ]"#;

    let entries: Vec<TimelineEntry> = serde_json::from_str(json).unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].start_date.as_deref(), Some("2020"));
    assert_eq!(entries[0].summary.to_plain(), "Built things.");
    assert_eq!(entries[0].tech_tags, vec!["Rust", "WASM"]);
    assert_eq!(entries[0].logo(), Some("https://example.com/acme.png"));

    assert_eq!(entries[1].nav_label(1), "Role 2");
    assert_eq!(entries[1].summary, RichText::Plain("Plain summary".to_string()));
    assert_eq!(entries[1].tech_tags, vec!["Go", "SQL"]);
    assert_eq!(entries[1].logo(), None);

    assert_eq!(entries[2].summary, RichText::Empty);
    assert_eq!(entries[2].tech_tags, vec!["A", "B"]);
    assert_eq!(entries[2].logo_url, None);
}

#[cfg(feature = "serde")]
#[test]
fn options_deserialize_with_defaults() {
    let opts: TimelineOptions = serde_json::from_str(r#"{ "hold": 0.6 }"#).unwrap();
    assert_eq!(opts.hold, 0.6);
    assert_eq!(opts.offsets, WindowOffsets::default());
}

proptest! {
    #[test]
    fn integral_progress_shows_exactly_one_item(n in 1usize..12, k in 0usize..12) {
        let k = k % n;
        let f = timeline(n).evaluate(k as f32);
        for (j, item) in f.items.iter().enumerate() {
            if j == k {
                prop_assert_eq!(item.visibility, 1.0);
                prop_assert_eq!(item.scale, 1.0);
                prop_assert_eq!(f.nav[j].emphasis, 1.0);
            } else {
                prop_assert_eq!(item.visibility, 0.0);
            }
        }
        prop_assert_eq!(f.active_index, k);
    }

    #[test]
    fn transitions_are_complementary(n in 2usize..10, cell in 0usize..9, a in 0.0f32..1.0, b in 0.0f32..1.0) {
        let t = timeline(n);
        let cell = cell % (n - 1);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p1 = cell as f32 + lo;
        let p2 = cell as f32 + hi;
        let f1 = t.evaluate(p1);
        let f2 = t.evaluate(p2);

        for f in [&f1, &f2] {
            for (j, item) in f.items.iter().enumerate() {
                prop_assert!((0.0..=1.0).contains(&item.visibility));
                if j != cell && j != cell + 1 {
                    prop_assert_eq!(item.visibility, 0.0);
                }
            }
        }
        // Moving forward, the outgoing item never gains and the incoming item never loses.
        prop_assert!(f2.items[cell].visibility <= f1.items[cell].visibility);
        prop_assert!(f2.items[cell + 1].visibility >= f1.items[cell + 1].visibility);
        prop_assert!(f2.nav[cell + 1].emphasis >= f1.nav[cell + 1].emphasis);
    }

    #[test]
    fn evaluation_is_reversible(n in 0usize..10, p1 in -1.0f32..12.0, p2 in -1.0f32..12.0) {
        let t = timeline(n);
        let mut frame = Frame::default();
        t.evaluate_into(p1, &mut frame);
        let first = frame.clone();
        t.evaluate_into(p2, &mut frame);
        t.evaluate_into(p1, &mut frame);
        prop_assert_eq!(first, frame);
    }

    #[test]
    fn nav_is_emphasized_no_later_than_item(n in 2usize..8, p in 0.0f32..8.0) {
        let f = timeline(n).evaluate(p);
        for (item, nav) in f.items.iter().zip(&f.nav) {
            if item.visibility >= 1.0 {
                prop_assert_eq!(nav.emphasis, 1.0);
            }
        }
        prop_assert_eq!(f.nav.iter().filter(|n| n.highlighted).count(), 1);
    }
}
