// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout and bounds providers for composites.
//!
//! A composite does not decide where its children go. It asks its [`Arrange`]
//! provider, and both hit testing and drawing go through
//! [`Arrange::bounds_of`], so whatever `arrange` computed must be what
//! `bounds_of` reports.
//!
//! Real containers (tiles, grids, flex) live with the host. This module only
//! ships two trivial providers: [`Fixed`] for explicit placement and
//! [`Layered`] for stacks where every child covers the whole composite.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::container::Container;
use crate::context::{Context, Surface};
use crate::types::ViewLimits;

/// Computes and reports child bounds for a composite.
pub trait Arrange {
    /// Size limits of the composite given its children.
    fn limits(&self, _surface: &dyn Surface, _children: &dyn Container) -> ViewLimits {
        ViewLimits::FULL
    }

    /// Compute child bounds for a composite occupying `ctx.bounds`.
    ///
    /// Results are kept by the provider (behind a `Cell`/`RefCell` if they
    /// depend on `ctx`) and reported later by [`bounds_of`](Self::bounds_of).
    fn arrange(&self, _ctx: &Context<'_>, _children: &dyn Container) {}

    /// Bounds of child `index` in root coordinates, for a composite whose own
    /// context is `ctx`.
    fn bounds_of(&self, ctx: &Context<'_>, index: usize) -> Rect;

    /// Whether later children sit on top of earlier ones, so hit testing must
    /// visit them last-to-first.
    fn reverse_index(&self) -> bool {
        false
    }
}

/// Children at explicit rectangles relative to the composite's origin.
///
/// Indices without a rectangle get an empty one, which nothing hits.
#[derive(Clone, Debug, Default)]
pub struct Fixed {
    rects: Vec<Rect>,
}

impl Fixed {
    /// Place child `i` at `rects[i]`, offset by the composite's origin.
    pub fn new(rects: impl IntoIterator<Item = Rect>) -> Self {
        Self {
            rects: rects.into_iter().collect(),
        }
    }

    /// Move child `index`, growing the table with empty rectangles as needed.
    pub fn set(&mut self, index: usize, rect: Rect) {
        if index >= self.rects.len() {
            self.rects.resize(index + 1, Rect::ZERO);
        }
        self.rects[index] = rect;
    }

    /// The relative rectangles.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }
}

impl Arrange for Fixed {
    fn limits(&self, _surface: &dyn Surface, _children: &dyn Container) -> ViewLimits {
        let extent = self
            .rects
            .iter()
            .fold(Size::ZERO, |acc, r| Size::new(acc.width.max(r.x1), acc.height.max(r.y1)));
        ViewLimits {
            min: extent,
            max: ViewLimits::FULL.max,
        }
    }

    fn bounds_of(&self, ctx: &Context<'_>, index: usize) -> Rect {
        match self.rects.get(index) {
            Some(r) => *r + ctx.bounds.origin().to_vec2(),
            None => Rect::ZERO,
        }
    }
}

/// Every child fills the composite; the last child is on top.
#[derive(Clone, Copy, Debug, Default)]
pub struct Layered;

impl Arrange for Layered {
    fn limits(&self, surface: &dyn Surface, children: &dyn Container) -> ViewLimits {
        let mut limits = ViewLimits::FULL;
        for ix in 0..children.len() {
            let child = children.at(ix).limits(surface);
            limits.min.width = limits.min.width.max(child.min.width);
            limits.min.height = limits.min.height.max(child.min.height);
            limits.max.width = limits.max.width.min(child.max.width);
            limits.max.height = limits.max.height.min(child.max.height);
        }
        limits
    }

    fn bounds_of(&self, ctx: &Context<'_>, _index: usize) -> Rect {
        ctx.bounds
    }

    fn reverse_index(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::damage::DamageSurface;
    use crate::element::ElementPtr;
    use crate::test_util::Probe;

    #[test]
    fn fixed_offsets_by_origin() {
        let fixed = Fixed::new([Rect::new(0.0, 0.0, 5.0, 5.0)]);
        let surface = DamageSurface::new();
        let host = Probe::new(0);
        let ctx = Context::new(&host, Rect::new(100.0, 50.0, 200.0, 150.0), &surface);
        assert_eq!(fixed.bounds_of(&ctx, 0), Rect::new(100.0, 50.0, 105.0, 55.0));
        assert!(!fixed.bounds_of(&ctx, 3).contains(Point::ZERO));
    }

    #[test]
    fn fixed_set_grows_table() {
        let mut fixed = Fixed::default();
        fixed.set(2, Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(fixed.rects().len(), 3);
        assert_eq!(fixed.rects()[0], Rect::ZERO);
    }

    #[test]
    fn fixed_limits_cover_all_rects() {
        let fixed = Fixed::new([Rect::new(0.0, 0.0, 10.0, 20.0), Rect::new(10.0, 0.0, 30.0, 5.0)]);
        let surface = DamageSurface::new();
        let none: Vec<ElementPtr> = vec![];
        let limits = fixed.limits(&surface, &none);
        assert_eq!(limits.min, Size::new(30.0, 20.0));
    }

    #[test]
    fn layered_fills_and_reverses() {
        let surface = DamageSurface::new();
        let host = Probe::new(0);
        let bounds = Rect::new(0.0, 0.0, 40.0, 40.0);
        let ctx = Context::new(&host, bounds, &surface);
        assert_eq!(Layered.bounds_of(&ctx, 0), bounds);
        assert_eq!(Layered.bounds_of(&ctx, 5), bounds);
        assert!(Layered.reverse_index());
        assert!(!Fixed::default().reverse_index());
    }
}
