// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal contexts and the render surface they carry.
//!
//! A [`Context`] is built for one element during one dispatch call. Composites
//! derive a child context per visited child ([`Context::child`]), keeping the
//! surface handle and substituting the bounds; the `parent` link lets leaves
//! walk back up (see [`crate::find_composite`] and [`Context::refresh`]).
//! Contexts borrow everything they mention and never outlive the call that
//! built them.

use core::fmt;

use kurbo::Rect;

use crate::element::Element;

/// Render target handle shared by every context of one traversal.
///
/// All methods take `&self`: a single surface is reachable from a whole stack
/// of contexts at once, so implementations keep their mutable state behind
/// `Cell`/`RefCell` (see [`crate::DamageSurface`]).
pub trait Surface {
    /// Mark `area` (in root coordinates) as needing a redraw.
    fn refresh(&self, area: Rect);

    /// The currently visible area, if the surface tracks one.
    ///
    /// When this returns `Some`, composites skip drawing children whose bounds
    /// do not intersect it.
    fn viewport(&self) -> Option<Rect> {
        None
    }
}

/// Per-call traversal record: the element, its bounds, the surface, and the
/// enclosing context.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// The element this context was built for.
    pub element: &'a dyn Element,
    /// The element's bounds in root coordinates.
    pub bounds: Rect,
    /// The render surface.
    pub surface: &'a dyn Surface,
    /// Context of the enclosing element, `None` at the root.
    pub parent: Option<&'a Context<'a>>,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("bounds", &self.bounds)
            .field("depth", &self.ancestors().count())
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Root context for `element` occupying `bounds` on `surface`.
    pub fn new(element: &'a dyn Element, bounds: Rect, surface: &'a dyn Surface) -> Self {
        Self {
            element,
            bounds,
            surface,
            parent: None,
        }
    }

    /// Derive the context of a child element that occupies `bounds`.
    pub fn child<'b>(&'b self, element: &'b dyn Element, bounds: Rect) -> Context<'b> {
        Context {
            element,
            bounds,
            surface: self.surface,
            parent: Some(self),
        }
    }

    /// Iterate the enclosing contexts, innermost first (excluding `self`).
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Context<'a>> + use<'a> {
        let mut next = self.parent;
        core::iter::from_fn(move || {
            let current = next?;
            next = current.parent;
            Some(current)
        })
    }

    /// Mark this context's bounds for redraw, then the bounds of up to
    /// `outward` enclosing contexts.
    ///
    /// The walk stops early at the root.
    pub fn refresh(&self, outward: usize) {
        self.surface.refresh(self.bounds);
        for ancestor in self.ancestors().take(outward) {
            self.surface.refresh(ancestor.bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::damage::DamageSurface;
    use crate::test_util::Probe;

    #[test]
    fn child_links_back_to_parent() {
        let (a, b, c) = (Probe::new(0), Probe::new(1), Probe::new(2));
        let surface = DamageSurface::new();
        let root = Context::new(&a, Rect::new(0.0, 0.0, 100.0, 100.0), &surface);
        let mid = root.child(&b, Rect::new(10.0, 10.0, 50.0, 50.0));
        let leaf = mid.child(&c, Rect::new(20.0, 20.0, 30.0, 30.0));

        let bounds: Vec<Rect> = leaf.ancestors().map(|ctx| ctx.bounds).collect();
        assert_eq!(bounds, [mid.bounds, root.bounds]);
        assert!(root.ancestors().next().is_none());
    }

    #[test]
    fn refresh_walks_outward_and_stops_at_root() {
        let (a, b) = (Probe::new(0), Probe::new(1));
        let surface = DamageSurface::new();
        let root = Context::new(&a, Rect::new(0.0, 0.0, 100.0, 100.0), &surface);
        let leaf = root.child(&b, Rect::new(10.0, 10.0, 20.0, 20.0));

        leaf.refresh(0);
        assert_eq!(surface.take().dirty_rects.as_slice(), &[leaf.bounds]);

        leaf.refresh(5);
        assert_eq!(
            surface.take().dirty_rects.as_slice(),
            &[leaf.bounds, root.bounds]
        );
    }
}
