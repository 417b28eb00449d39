//! Property-based invariant tests for region aliasing.
//!
//! These tests verify that regions behave as views, never copies:
//!
//! 1. Nested offsets compose additively and stride never changes.
//! 2. A write through a nested region lands at exactly one canvas pixel,
//!    the one its composed offset names.
//! 3. Any rectangle that does not fit its parent is rejected.
//! 4. Snapshot then restore is the identity on the region and leaves the
//!    rest of the canvas untouched.

use proptest::prelude::*;
use vplayer_render::{Canvas, Rgb};

// ── Helpers ─────────────────────────────────────────────────────────────

fn canvas_dims() -> impl Strategy<Value = (u32, u32, u8)> {
    (1u32..=64, 1u32..=48, prop_oneof![Just(3u8), Just(4u8)])
}

/// A rectangle `(x, y, w, h)` that fits inside `w x h`.
fn rect_within(w: u32, h: u32) -> impl Strategy<Value = (u32, u32, u32, u32)> {
    (0..w, 0..h).prop_flat_map(move |(x, y)| (Just(x), Just(y), 1..=w - x, 1..=h - y))
}

/// A canvas, a child of the root, and a grandchild of that child.
fn nested() -> impl Strategy<Value = ((u32, u32, u8), (u32, u32, u32, u32), (u32, u32, u32, u32))> {
    canvas_dims().prop_flat_map(|(w, h, c)| {
        rect_within(w, h).prop_flat_map(move |outer| {
            (Just((w, h, c)), Just(outer), rect_within(outer.2, outer.3))
        })
    })
}

fn index_of(canvas: &Canvas, x: u32, y: u32) -> usize {
    y as usize * canvas.stride() + x as usize * canvas.channels() as usize
}

fn changed_pixels(before: &[u8], after: &[u8], channels: usize) -> Vec<usize> {
    before
        .chunks_exact(channels)
        .zip(after.chunks_exact(channels))
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Offsets compose, stride is inherited
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nested_offsets_compose(((w, h, c), outer, inner) in nested()) {
        let canvas = Canvas::new(w, h, c).unwrap();
        let parent = canvas.region(outer.0, outer.1, outer.2, outer.3).unwrap();
        let child = parent.sub(inner.0, inner.1, inner.2, inner.3).unwrap();

        prop_assert_eq!(parent.stride(), canvas.stride());
        prop_assert_eq!(child.stride(), canvas.stride());
        prop_assert_eq!(
            child.offset(),
            parent.offset() + inner.1 as usize * parent.stride() + inner.0 as usize * c as usize
        );
        prop_assert_eq!(
            child.offset(),
            index_of(&canvas, outer.0 + inner.0, outer.1 + inner.1)
        );
        prop_assert_eq!(child.origin(), (outer.0 + inner.0, outer.1 + inner.1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. A write through a nested region touches exactly one canvas pixel
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nested_write_lands_at_composed_offset(
        ((w, h, c), outer, inner) in nested(),
        px in any::<prop::sample::Index>(),
        py in any::<prop::sample::Index>(),
    ) {
        let mut canvas = Canvas::new(w, h, c).unwrap();
        let parent = canvas.region(outer.0, outer.1, outer.2, outer.3).unwrap();
        let child = parent.sub(inner.0, inner.1, inner.2, inner.3).unwrap();
        let lx = px.index(inner.2 as usize) as u32;
        let ly = py.index(inner.3 as usize) as u32;

        let before = canvas.as_bytes().to_vec();
        prop_assert!(canvas.view_mut(&child).set_pixel(lx as i32, ly as i32, Rgb::WHITE));
        let changed = changed_pixels(&before, canvas.as_bytes(), c as usize);

        let ax = outer.0 + inner.0 + lx;
        let ay = outer.1 + inner.1 + ly;
        prop_assert_eq!(changed, vec![(ay * w + ax) as usize]);
        prop_assert_eq!(canvas.pixel(ax, ay), Some(Rgb::WHITE));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Oversized rectangles fail fast
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn oversized_child_is_rejected(
        (w, h, c) in canvas_dims(),
        x in 0u32..80,
        y in 0u32..60,
        rw in 1u32..80,
        rh in 1u32..60,
    ) {
        let canvas = Canvas::new(w, h, c).unwrap();
        let fits = x + rw <= w && y + rh <= h;
        let result = canvas.region(x, y, rw, rh);
        prop_assert_eq!(result.is_ok(), fits);
        if let Ok(region) = result {
            prop_assert_eq!((region.width(), region.height()), (rw, rh));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Snapshot / restore
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn restore_undoes_overdraw_inside_region_only(
        ((w, h, c), outer, _inner) in nested(),
        seed in any::<u8>(),
    ) {
        let mut canvas = Canvas::new(w, h, c).unwrap();
        let root = canvas.root();
        {
            let mut view = canvas.view_mut(&root);
            for y in 0..h {
                for x in 0..w {
                    let v = (x as u8).wrapping_mul(31) ^ (y as u8).wrapping_add(seed);
                    view.set_pixel(x as i32, y as i32, Rgb::new(v, v.wrapping_add(1), seed));
                }
            }
        }
        let region = canvas.region(outer.0, outer.1, outer.2, outer.3).unwrap();
        let clean = canvas.view(&region).snapshot();
        let before = canvas.as_bytes().to_vec();

        let mut view = canvas.view_mut(&region);
        view.fill(Rgb::new(seed, 0, 255));
        view.restore(&clean).unwrap();

        prop_assert_eq!(canvas.as_bytes(), before.as_slice());
    }
}
