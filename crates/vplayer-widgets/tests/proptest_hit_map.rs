//! Property-based invariant tests for the hit map.
//!
//! 1. Whatever sequence of registrations is attempted, the accepted areas
//!    are pairwise disjoint.
//! 2. Every point is claimed by at most one control, and `hit_test` returns
//!    that control.
//! 3. Points on the exclusive right/bottom edge are never claimed by the
//!    area they bound.

use proptest::prelude::*;
use vplayer_core::geometry::Rect;
use vplayer_widgets::{HitArea, HitMap, HitMapError, WidgetId};

// ── Helpers ─────────────────────────────────────────────────────────────

fn area() -> impl Strategy<Value = HitArea> {
    (0u16..200, 0u16..100, 1u16..60, 1u16..40)
        .prop_map(|(x, y, w, h)| HitArea::new(Rect::new(x, y, w, h)))
}

fn build(areas: &[HitArea]) -> HitMap {
    let mut map = HitMap::new();
    for (id, area) in WidgetId::ALL.iter().zip(areas) {
        match map.register(*id, *area) {
            Ok(()) | Err(HitMapError::Overlap { .. }) => {}
            Err(e) => panic!("unexpected {e}"),
        }
    }
    map
}

proptest! {
    #[test]
    fn accepted_areas_are_disjoint(areas in prop::collection::vec(area(), 1..12)) {
        let map = build(&areas);
        let accepted: Vec<_> = map.iter().collect();
        for (i, (a_id, a)) in accepted.iter().enumerate() {
            for (b_id, b) in &accepted[i + 1..] {
                prop_assert!(
                    a.rect().intersection_opt(&b.rect()).is_none(),
                    "{} and {} overlap", a_id, b_id
                );
            }
        }
    }

    #[test]
    fn each_point_has_at_most_one_owner(
        areas in prop::collection::vec(area(), 1..12),
        x in 0u16..260,
        y in 0u16..140,
    ) {
        let map = build(&areas);
        let owners: Vec<_> = map.iter().filter(|(_, a)| a.contains(x, y)).map(|(id, _)| id).collect();
        prop_assert!(owners.len() <= 1);
        prop_assert_eq!(map.hit_test(x, y), owners.first().copied());
    }

    #[test]
    fn exclusive_edges_are_not_claimed(a in area()) {
        let mut map = HitMap::new();
        map.register(WidgetId::Stop, a).unwrap();
        let (x1, y1, x2, y2) = a.corners();
        prop_assert_eq!(map.hit_test(x1, y1), Some(WidgetId::Stop));
        prop_assert_eq!(map.hit_test(x2, y1), None);
        prop_assert_eq!(map.hit_test(x1, y2), None);
        prop_assert_eq!(map.hit_test(x2 - 1, y2 - 1), Some(WidgetId::Stop));
    }
}
