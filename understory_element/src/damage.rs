// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-region bookkeeping: a [`Damage`] set and a [`Surface`] that fills it.

use core::cell::RefCell;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::context::Surface;

/// Rectangles marked for redraw since the last [`DamageSurface::take`].
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Root-space rectangles that should be repainted, in marking order.
    ///
    /// Entries may overlap and repeat; this is not a minimal cover.
    pub dirty_rects: SmallVec<[Rect; 4]>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Whether `rect` was marked exactly.
    pub fn contains(&self, rect: Rect) -> bool {
        self.dirty_rects.contains(&rect)
    }

    /// Whether nothing was marked.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }
}

/// A [`Surface`] that only records refresh requests.
///
/// Hosts that paint elsewhere can drain it once per frame with [`take`](Self::take)
/// and repaint the returned regions.
#[derive(Debug, Default)]
pub struct DamageSurface {
    damage: RefCell<Damage>,
    viewport: Option<Rect>,
}

impl DamageSurface {
    /// Create an empty surface with no viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty surface that reports `viewport` to drawing composites.
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            damage: RefCell::default(),
            viewport: Some(viewport),
        }
    }

    /// Take the accumulated damage, leaving the surface clean.
    pub fn take(&self) -> Damage {
        self.damage.take()
    }

    /// Snapshot of the accumulated damage.
    pub fn damage(&self) -> Damage {
        self.damage.borrow().clone()
    }
}

impl Surface for DamageSurface {
    fn refresh(&self, area: Rect) {
        self.damage.borrow_mut().dirty_rects.push(area);
    }

    fn viewport(&self) -> Option<Rect> {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_of_marked_rects() {
        let surface = DamageSurface::new();
        assert!(surface.damage().union_rect().is_none());

        surface.refresh(Rect::new(0.0, 0.0, 10.0, 10.0));
        surface.refresh(Rect::new(20.0, 5.0, 30.0, 15.0));
        let damage = surface.damage();
        assert_eq!(damage.dirty_rects.len(), 2);
        assert_eq!(damage.union_rect(), Some(Rect::new(0.0, 0.0, 30.0, 15.0)));
    }

    #[test]
    fn take_drains() {
        let surface = DamageSurface::new();
        surface.refresh(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(surface.take().contains(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(surface.damage().is_empty());
    }
}
