// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element capability surface.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::composite::Composite;
use crate::context::{Context, Surface};
use crate::types::{CursorTracking, KeyInfo, MouseButton, TextInfo, ViewLimits};

/// Owned handle to an element, as stored by containers.
pub type ElementPtr = Box<dyn Element>;

/// Upcast helper so provided [`Element`] methods can return `self` as `&dyn Element`.
///
/// Implemented for every sized [`Element`]; there is no reason to implement it by hand.
pub trait AsElement {
    /// `self` as a trait object.
    fn as_element(&self) -> &dyn Element;
}

impl<T: Element> AsElement for T {
    fn as_element(&self) -> &dyn Element {
        self
    }
}

/// A node in the element tree.
///
/// Every method has a leaf default, so a leaf only implements what it cares
/// about. Decorators ([`crate::Proxy`]) forward everything to their subject;
/// composites ([`crate::CompositeNode`]) route to their children.
///
/// All dispatch methods take `&self`. An element that keeps interaction state
/// stores it in `Cell`/`RefCell`; structural changes to a tree go through
/// `&mut` APIs and therefore cannot overlap a dispatch walk.
pub trait Element: AsElement {
    /// Size limits this element accepts.
    fn limits(&self, _surface: &dyn Surface) -> ViewLimits {
        ViewLimits::FULL
    }

    /// Paint into `ctx.bounds`.
    fn draw(&self, _ctx: &Context<'_>) {}

    /// Assign bounds to descendants; leaves have nothing to do.
    fn layout(&self, _ctx: &Context<'_>) {}

    /// The innermost element at `p`, or `None` if this element declines it.
    ///
    /// The default accepts any point inside `ctx.bounds`.
    fn hit_test(&self, ctx: &Context<'_>, p: Point) -> Option<&dyn Element> {
        ctx.bounds.contains(p).then(|| self.as_element())
    }

    /// Mark the region of `element` for redraw if it is this element or lives
    /// below it, plus `outward` enclosing regions. Returns whether `element`
    /// was found.
    fn refresh(&self, ctx: &Context<'_>, element: &dyn Element, outward: usize) -> bool {
        if same_element(self.as_element(), element) {
            ctx.refresh(outward);
            true
        } else {
            false
        }
    }

    /// Handle a button press or release. Returns the element that claimed it.
    fn click(&self, _ctx: &Context<'_>, _btn: MouseButton) -> Option<&dyn Element> {
        None
    }

    /// Pointer moved while a button captured by this element is held.
    fn drag(&self, _ctx: &Context<'_>, _btn: MouseButton) {}

    /// Handle a key event. Returns whether it was handled.
    fn key(&self, _ctx: &Context<'_>, _k: KeyInfo) -> bool {
        false
    }

    /// Handle text input. Returns whether it was handled.
    fn text(&self, _ctx: &Context<'_>, _info: TextInfo) -> bool {
        false
    }

    /// Hover notification. Returns whether it was consumed.
    fn cursor(&self, _ctx: &Context<'_>, _p: Point, _status: CursorTracking) -> bool {
        false
    }

    /// Scroll by `dir` with the pointer at `p`. Returns whether it was handled.
    fn scroll(&self, _ctx: &Context<'_>, _dir: Vec2, _p: Point) -> bool {
        false
    }

    /// Whether this element can take keyboard focus.
    fn wants_focus(&self) -> bool {
        false
    }

    /// Focus arrived.
    fn begin_focus(&self) {}

    /// Focus left.
    fn end_focus(&self) {}

    /// The focused child, for elements that track one.
    fn focus(&self) -> Option<&dyn Element> {
        None
    }

    /// Whether this element is interactive.
    fn is_control(&self) -> bool {
        false
    }

    /// The composite interface, if this element is a composite.
    fn as_composite(&self) -> Option<&dyn Composite> {
        None
    }

    /// The wrapped subject, if this element is a decorator.
    fn underlying(&self) -> Option<&dyn Element> {
        None
    }

    /// Whether this element is a decorator around another element.
    fn is_decorator(&self) -> bool {
        self.underlying().is_some()
    }
}

/// Address identity of two elements.
///
/// Values of zero-sized element types share an address and cannot be told
/// apart. Neither can a [`Proxy`](crate::Proxy) and a subject stored at its
/// start, which is harmless for refresh since both draw into the same bounds.
pub fn same_element(a: &dyn Element, b: &dyn Element) -> bool {
    core::ptr::addr_eq(core::ptr::from_ref(a), core::ptr::from_ref(b))
}

/// A leaf that paints through a closure.
pub struct Basic<F> {
    draw: F,
}

impl<F> fmt::Debug for Basic<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basic").finish_non_exhaustive()
    }
}

impl<F: Fn(&Context<'_>)> Element for Basic<F> {
    fn draw(&self, ctx: &Context<'_>) {
        (self.draw)(ctx);
    }
}

/// A leaf element whose `draw` calls `f`.
///
/// ```rust
/// use core::cell::Cell;
/// use kurbo::Rect;
/// use understory_element::{basic, Context, DamageSurface, Element};
///
/// let painted = Cell::new(None);
/// let leaf = basic(|ctx: &Context<'_>| painted.set(Some(ctx.bounds)));
/// let surface = DamageSurface::new();
/// let bounds = Rect::new(0.0, 0.0, 8.0, 8.0);
/// leaf.draw(&Context::new(&leaf, bounds, &surface));
/// assert_eq!(painted.get(), Some(bounds));
/// ```
pub fn basic<F: Fn(&Context<'_>)>(f: F) -> Basic<F> {
    Basic { draw: f }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;
    use crate::damage::DamageSurface;

    #[derive(Debug)]
    struct Plain {
        _tag: u8,
    }

    impl Element for Plain {}

    #[test]
    fn leaf_defaults() {
        let leaf = Plain { _tag: 0 };
        let surface = DamageSurface::new();
        let ctx = Context::new(&leaf, Rect::new(0.0, 0.0, 10.0, 10.0), &surface);

        let hit = leaf.hit_test(&ctx, Point::new(5.0, 5.0)).unwrap();
        assert!(same_element(hit, &leaf));
        assert!(leaf.hit_test(&ctx, Point::new(15.0, 5.0)).is_none());
        assert!(leaf.click(&ctx, MouseButton::press(Point::new(5.0, 5.0))).is_none());
        assert!(!leaf.wants_focus());
        assert!(!leaf.is_control());
        assert!(!leaf.is_decorator());
        assert!(leaf.as_composite().is_none());
        assert!(leaf.focus().is_none());
        assert_eq!(leaf.limits(&surface), ViewLimits::FULL);
    }

    #[test]
    fn refresh_matches_only_itself() {
        let (a, b) = (Plain { _tag: 0 }, Plain { _tag: 1 });
        let surface = DamageSurface::new();
        let ctx = Context::new(&a, Rect::new(0.0, 0.0, 10.0, 10.0), &surface);

        assert!(!a.refresh(&ctx, &b, 0));
        assert!(surface.damage().is_empty());
        assert!(a.refresh(&ctx, &a, 0));
        assert!(surface.damage().contains(ctx.bounds));
    }
}
