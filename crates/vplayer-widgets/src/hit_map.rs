#![forbid(unsafe_code)]

//! Pointer hit testing.
//!
//! A [`HitMap`] holds one [`HitArea`] per control, in registration order.
//! Registration order is priority order: [`HitMap::hit_test`] returns the
//! first area that contains the point. Areas may not overlap, so priority
//! only matters for documenting intent, never for resolving ties.

use thiserror::Error;
use vplayer_core::geometry::Rect;

use crate::widget::WidgetId;

/// A half-open rectangle in canvas coordinates: `x1 <= x < x2`,
/// `y1 <= y < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitArea {
    rect: Rect,
}

impl HitArea {
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Build from corners; `x2`/`y2` are exclusive.
    pub fn from_corners(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self::new(Rect::new(
            x1,
            y1,
            x2.saturating_sub(x1),
            y2.saturating_sub(y1),
        ))
    }

    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// `(x1, y1, x2, y2)`.
    pub const fn corners(&self) -> (u16, u16, u16, u16) {
        (
            self.rect.x,
            self.rect.y,
            self.rect.right(),
            self.rect.bottom(),
        )
    }

    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        self.rect.contains(x, y)
    }

    #[inline]
    pub fn overlaps(&self, other: &HitArea) -> bool {
        self.rect.intersects(&other.rect)
    }
}

impl From<Rect> for HitArea {
    fn from(rect: Rect) -> Self {
        Self::new(rect)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HitMapError {
    #[error("hit area for {new} overlaps {existing}")]
    Overlap { new: WidgetId, existing: WidgetId },

    #[error("{0} already has a hit area")]
    Duplicate(WidgetId),
}

/// Ordered, non-overlapping registry of control hit areas.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    entries: Vec<(WidgetId, HitArea)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `area` for `id` at the lowest priority so far.
    ///
    /// # Errors
    ///
    /// [`HitMapError::Duplicate`] if `id` is already registered and
    /// [`HitMapError::Overlap`] if `area` shares a pixel with any existing
    /// area. Empty areas never overlap anything.
    pub fn register(&mut self, id: WidgetId, area: HitArea) -> Result<(), HitMapError> {
        if self.area(id).is_some() {
            return Err(HitMapError::Duplicate(id));
        }
        if let Some((existing, _)) = self.entries.iter().find(|(_, a)| a.overlaps(&area)) {
            return Err(HitMapError::Overlap {
                new: id,
                existing: *existing,
            });
        }
        self.entries.push((id, area));
        Ok(())
    }

    /// The highest-priority control under `(x, y)`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<WidgetId> {
        self.entries
            .iter()
            .find(|(_, area)| area.contains(x, y))
            .map(|(id, _)| *id)
    }

    pub fn area(&self, id: WidgetId) -> Option<HitArea> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, area)| *area)
    }

    /// Registered areas in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, HitArea)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_finds_containing_area() {
        let mut map = HitMap::new();
        map.register(WidgetId::Stop, HitArea::from_corners(10, 10, 20, 20))
            .unwrap();
        map.register(WidgetId::StepUp, HitArea::from_corners(20, 10, 30, 20))
            .unwrap();
        assert_eq!(map.hit_test(10, 10), Some(WidgetId::Stop));
        assert_eq!(map.hit_test(19, 19), Some(WidgetId::Stop));
        assert_eq!(map.hit_test(20, 15), Some(WidgetId::StepUp));
        assert_eq!(map.hit_test(30, 15), None);
        assert_eq!(map.hit_test(15, 20), None);
    }

    #[test]
    fn overlap_is_rejected() {
        let mut map = HitMap::new();
        map.register(WidgetId::Stop, HitArea::from_corners(10, 10, 20, 20))
            .unwrap();
        let err = map
            .register(WidgetId::StepUp, HitArea::from_corners(19, 19, 25, 25))
            .unwrap_err();
        assert_eq!(
            err,
            HitMapError::Overlap {
                new: WidgetId::StepUp,
                existing: WidgetId::Stop,
            }
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut map = HitMap::new();
        map.register(WidgetId::Stop, HitArea::from_corners(0, 0, 5, 5))
            .unwrap();
        assert_eq!(
            map.register(WidgetId::Stop, HitArea::from_corners(50, 50, 55, 55)),
            Err(HitMapError::Duplicate(WidgetId::Stop))
        );
    }

    #[test]
    fn corners_round_trip() {
        let area = HitArea::from_corners(3, 4, 13, 24);
        assert_eq!(area.corners(), (3, 4, 13, 24));
        assert_eq!(area.rect(), Rect::new(3, 4, 10, 20));
    }

    #[test]
    fn priority_is_registration_order() {
        let mut map = HitMap::new();
        map.register(WidgetId::SliderTrack, HitArea::from_corners(0, 0, 100, 10))
            .unwrap();
        map.register(WidgetId::PlayPause, HitArea::from_corners(0, 10, 10, 20))
            .unwrap();
        let order: Vec<_> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![WidgetId::SliderTrack, WidgetId::PlayPause]);
    }
}
