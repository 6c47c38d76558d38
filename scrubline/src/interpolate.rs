use crate::{Frame, TransitionWindow};

/// Maps a progress value to per-item and per-nav-entry style state.
///
/// `windows` are expected to be the windows of a [`crate::Timeline`] built for `count` items;
/// windows whose items fall outside `0..count` are ignored. The function is pure: it reads no
/// state besides its arguments.
pub fn interpolate(progress: f32, windows: &[TransitionWindow], count: usize) -> Frame {
    let mut frame = Frame::default();
    interpolate_into(progress, windows, count, &mut frame);
    frame
}

/// Like [`interpolate`], writing into an existing frame to avoid reallocating.
pub fn interpolate_into(
    progress: f32,
    windows: &[TransitionWindow],
    count: usize,
    frame: &mut Frame,
) {
    frame.reset(count);
    if count == 0 {
        return;
    }

    let last = (count - 1) as f32;
    let progress = if progress.is_finite() {
        progress.clamp(0.0, last)
    } else {
        0.0
    };
    frame.progress = progress;
    frame.fill = ((progress + 1.0) / count as f32).clamp(0.0, 1.0);
    frame.holding = count > 1 && progress >= last;

    // Pass 1: the incoming half of every item. Item 0 has no incoming window and keeps its
    // initial (shown) state.
    for w in windows {
        let i = w.incoming();
        if w.boundary == 0 || i >= count {
            continue;
        }
        let fade = w.fade_in.sample(progress);
        let item = &mut frame.items[i];
        item.visibility = fade;
        item.scale = fade;
        item.blur = 1.0 - fade;
        item.shadow_intensity = w.shadow_in.sample(progress);
        // A fully faded-in item always has a fully emphasized nav entry.
        frame.nav[i].emphasis = if fade >= 1.0 {
            1.0
        } else {
            w.nav_in.sample(progress)
        };
    }

    // Pass 2: the outgoing half, multiplied in so an item that has faded in can fade out again.
    for w in windows {
        if w.boundary == 0 || w.incoming() >= count {
            continue;
        }
        let o = w.outgoing();
        let keep = 1.0 - w.fade_out.sample(progress);
        let item = &mut frame.items[o];
        item.visibility *= keep;
        item.scale *= keep;
        item.blur = 1.0 - (1.0 - item.blur) * keep;
        item.shadow_intensity *= 1.0 - w.shadow_out.sample(progress);
        frame.nav[o].emphasis *= 1.0 - w.nav_out.sample(progress);
    }

    let active = windows
        .iter()
        .filter(|w| w.boundary > 0 && w.incoming() < count && w.nav_switch <= progress)
        .count()
        .min(count - 1);
    frame.active_index = active;

    for item in &mut frame.items {
        item.visibility = item.visibility.clamp(0.0, 1.0);
        item.scale = item.scale.clamp(0.0, 1.0);
        item.blur = item.blur.clamp(0.0, 1.0);
        item.shadow_intensity = item.shadow_intensity.clamp(0.0, 1.0);
    }
    for (i, nav) in frame.nav.iter_mut().enumerate() {
        nav.emphasis = nav.emphasis.clamp(0.0, 1.0);
        nav.highlighted = i == active;
    }
}
