//! Property-based invariant tests for the slider mapping.
//!
//! 1. Every frame handed out by `frame_at` is a multiple of the step and
//!    lies in `[0, max_frame - 1]`.
//! 2. `pixel_for` never puts the knob past the end of the track.
//! 3. pixel → frame → pixel drifts by at most one knob width plus one
//!    step's worth of pixels (plus one for rounding).
//! 4. With at least one frame per pixel and a unit step, the drift stays
//!    within one knob width.
//! 5. `pixel_for` is monotone in the frame.

use proptest::prelude::*;
use vplayer_runtime::SliderModel;

// ── Helpers ─────────────────────────────────────────────────────────────

fn model() -> impl Strategy<Value = SliderModel> {
    (20u32..1200, 1u32..20, 1u64..10_000, 1u64..50).prop_map(|(track, knob, frames, step)| {
        SliderModel::new(frames, track, knob).with_step(step)
    })
}

fn tolerance(m: &SliderModel) -> u64 {
    let span = u64::from(m.knob_span());
    u64::from(m.knob_width()) + (m.step() * span).div_ceil(m.max_frame()) + 1
}

proptest! {
    #[test]
    fn frames_are_quantized_and_in_range(m in model(), px in 0u32..1200) {
        let f = m.frame_at(px);
        prop_assert_eq!(f % m.step(), 0);
        prop_assert!(f < m.max_frame());
    }

    #[test]
    fn knob_stays_on_track(m in model(), f in 0u64..20_000) {
        prop_assert!(m.pixel_for(f) <= m.knob_span());
    }

    #[test]
    fn round_trip_drift_is_bounded(m in model(), raw in 0u32..1200) {
        let px = raw % m.track_width();
        let back = m.pixel_for(m.frame_at(px));
        let drift = u64::from(px.abs_diff(back));
        prop_assert!(drift <= tolerance(&m), "px {} -> {} (tolerance {})", px, back, tolerance(&m));
    }

    #[test]
    fn dense_round_trip_within_knob(
        track in 20u32..1200,
        knob in 1u32..20,
        extra in 0u64..5_000,
        raw in 0u32..1200,
    ) {
        let m = SliderModel::new(u64::from(track) + extra, track, knob);
        let px = raw % track;
        let back = m.pixel_for(m.frame_at(px));
        prop_assert!(px.abs_diff(back) <= knob, "px {} -> {}", px, back);
    }

    #[test]
    fn pixel_for_is_monotone(m in model(), a in 0u64..10_000, b in 0u64..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(m.pixel_for(lo) <= m.pixel_for(hi));
    }
}
