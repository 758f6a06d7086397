// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composites: elements that own an ordered set of children and route input
//! to them.
//!
//! ## Routing rules
//!
//! - **Point-driven** (`hit_test`, button press in `click`, `cursor`, `scroll`):
//!   children are tested with [`Composite::hit_element`], in storage order or,
//!   when [`Composite::reverse_index`] holds, last-to-first so the topmost
//!   child wins.
//! - **Capture-driven** (`drag`, button release in `click`): the child that
//!   received the press keeps receiving pointer events until release, even
//!   when the pointer leaves its bounds or the composite's bounds.
//! - **Focus-driven** (`key`, `text`): the focused child, if any.
//! - **Paint** (`draw`): storage order, so later children paint over earlier
//!   ones. `reverse_index` does not affect painting.
//!
//! ## Focus
//!
//! Each composite tracks one focused child index and a saved index that
//! survives an `end_focus`/`begin_focus` cycle. A press on a child that
//! [wants focus](Element::wants_focus) moves focus to it; a press on empty
//! space clears it. Nested composites each keep their own index, so the focus
//! path is the chain of focused indices from the root down.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_element::{
//!     Composite, Context, DamageSurface, Element, ElementPtr, Fixed, MouseButton, VecComposite,
//! };
//!
//! #[derive(Debug)]
//! struct Field(u8);
//! impl Element for Field {
//!     fn wants_focus(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let row = VecComposite::new(
//!     vec![Box::new(Field(0)) as ElementPtr, Box::new(Field(1))],
//!     Fixed::new([Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 0.0, 20.0, 10.0)]),
//! );
//! let surface = DamageSurface::new();
//! let ctx = Context::new(&row, Rect::new(0.0, 0.0, 20.0, 10.0), &surface);
//!
//! row.click(&ctx, MouseButton::press(Point::new(15.0, 5.0)));
//! assert_eq!(row.focus_index(), Some(1));
//! ```

use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use kurbo::{Point, Rect, Vec2};

use crate::arrange::Arrange;
use crate::container::{Container, RangeView};
use crate::context::{Context, Surface};
use crate::element::{Element, ElementPtr, same_element};
use crate::error::FocusError;
use crate::types::{CursorTracking, KeyInfo, MouseButton, TextInfo, ViewLimits};

/// Result of a successful [`Composite::hit_element`] query.
#[derive(Clone, Copy)]
pub struct HitInfo<'a> {
    /// The direct child that contains the point.
    pub element: &'a dyn Element,
    /// The innermost element under the point, found through the child's own
    /// `hit_test`. Equal to `element` for leaves.
    pub target: &'a dyn Element,
    /// Bounds of the direct child.
    pub bounds: Rect,
    /// Index of the direct child.
    pub index: usize,
}

impl fmt::Debug for HitInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitInfo")
            .field("bounds", &self.bounds)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// A remembered hit: which child, and where it was at the time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRecord {
    /// Child index.
    pub index: usize,
    /// Child bounds when the hit was recorded.
    pub bounds: Rect,
}

impl From<HitInfo<'_>> for HitRecord {
    fn from(hit: HitInfo<'_>) -> Self {
        Self {
            index: hit.index,
            bounds: hit.bounds,
        }
    }
}

/// The composite side of an element: children plus routing and focus state.
///
/// Reached from any element through [`Element::as_composite`].
pub trait Composite: Container {
    /// Bounds of child `index` for a composite whose own context is `ctx`.
    fn bounds_of(&self, ctx: &Context<'_>, index: usize) -> Rect;

    /// Whether hit testing visits children last-to-first.
    fn reverse_index(&self) -> bool {
        false
    }

    /// The child under `p`, or `None`.
    ///
    /// A child is accepted when its bounds contain `p` and its own `hit_test`
    /// (with a derived context) reports something; otherwise the search moves
    /// on to the next index. Nested composites, including ones behind
    /// decorators, resolve `target` to their innermost match.
    fn hit_element<'s>(&'s self, ctx: &Context<'_>, p: Point) -> Option<HitInfo<'s>> {
        let test = |index: usize| {
            let bounds = self.bounds_of(ctx, index);
            if !bounds.contains(p) {
                return None;
            }
            let element = self.at(index);
            let target = element.hit_test(&ctx.child(element, bounds), p)?;
            Some(HitInfo {
                element,
                target,
                bounds,
                index,
            })
        };
        if self.reverse_index() {
            (0..self.len()).rev().find_map(test)
        } else {
            (0..self.len()).find_map(test)
        }
    }

    /// Index of the focused child.
    fn focus_index(&self) -> Option<usize>;

    /// Move focus to child `index`.
    ///
    /// An index outside `0..len()` is rejected and nothing changes.
    fn set_focus(&self, index: usize) -> Result<(), FocusError>;

    /// Drop focus without remembering it.
    fn clear_focus(&self);

    /// Forget focus, saved focus, pointer capture, and cached hits.
    ///
    /// Call when the children are replaced wholesale or the composite is
    /// detached.
    fn reset(&self);
}

#[derive(Debug, Default)]
struct DispatchState {
    focus: Cell<Option<usize>>,
    saved_focus: Cell<Option<usize>>,
    drag_tracking: Cell<Option<usize>>,
    click_hit: Cell<Option<HitRecord>>,
    cursor_hit: Cell<Option<HitRecord>>,
}

impl DispatchState {
    fn clear(&self) {
        self.focus.set(None);
        self.saved_focus.set(None);
        self.drag_tracking.set(None);
        self.click_hit.set(None);
        self.cursor_hit.set(None);
    }

    fn on_remove(&self, removed: usize) {
        let shift = |ix: usize| match ix {
            i if i == removed => None,
            i if i > removed => Some(i - 1),
            i => Some(i),
        };
        for cell in [&self.focus, &self.saved_focus, &self.drag_tracking] {
            cell.set(cell.get().and_then(shift));
        }
        for cell in [&self.click_hit, &self.cursor_hit] {
            cell.set(
                cell.get()
                    .and_then(|r| shift(r.index).map(|index| HitRecord { index, ..r })),
            );
        }
    }

    fn on_insert(&self, inserted: usize) {
        let shift = |ix: usize| if ix >= inserted { ix + 1 } else { ix };
        for cell in [&self.focus, &self.saved_focus, &self.drag_tracking] {
            cell.set(cell.get().map(shift));
        }
        for cell in [&self.click_hit, &self.cursor_hit] {
            cell.set(cell.get().map(|r| HitRecord {
                index: shift(r.index),
                ..r
            }));
        }
    }
}

/// An element built from a child [`Container`] and an [`Arrange`] provider.
///
/// This is the dispatch engine: it implements [`Element`] by routing to
/// children (see the [module docs](self)) and [`Composite`] for focus control.
pub struct CompositeNode<C, A> {
    children: C,
    arrange: A,
    state: DispatchState,
    focus_outward: usize,
}

/// Composite over a growable list of children.
pub type VecComposite<A> = CompositeNode<Vec<ElementPtr>, A>;

/// Composite over a fixed number of children.
pub type ArrayComposite<const N: usize, A> = CompositeNode<[ElementPtr; N], A>;

/// Composite over a window of another container's children.
pub type RangeComposite<'a, A> = CompositeNode<RangeView<'a>, A>;

impl<C: Container, A: fmt::Debug> fmt::Debug for CompositeNode<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeNode")
            .field("len", &self.children.len())
            .field("arrange", &self.arrange)
            .field("state", &self.state)
            .field("focus_outward", &self.focus_outward)
            .finish_non_exhaustive()
    }
}

impl<C: Container, A: Arrange> CompositeNode<C, A> {
    /// Compose `children`, placed by `arrange`.
    pub fn new(children: C, arrange: A) -> Self {
        Self {
            children,
            arrange,
            state: DispatchState::default(),
            focus_outward: 0,
        }
    }

    /// How many enclosing regions to mark for redraw, beyond the child's own,
    /// when focus moves onto or off a child. Use 1 or more when focus
    /// decorations extend past the focused child.
    #[must_use]
    pub fn with_focus_outward(mut self, outward: usize) -> Self {
        self.focus_outward = outward;
        self
    }

    /// The children.
    pub fn children(&self) -> &C {
        &self.children
    }

    /// The children, for arbitrary mutation. All tracked indices are reset.
    pub fn children_mut(&mut self) -> &mut C {
        self.state.clear();
        &mut self.children
    }

    /// The arrangement provider.
    pub fn arrangement(&self) -> &A {
        &self.arrange
    }

    /// The arrangement provider, mutably.
    pub fn arrangement_mut(&mut self) -> &mut A {
        &mut self.arrange
    }

    /// Index remembered by the last `end_focus`, restored by the next
    /// `begin_focus`.
    pub fn saved_focus(&self) -> Option<usize> {
        self.tracked(&self.state.saved_focus)
    }

    /// Index of the child currently capturing the pointer.
    pub fn drag_target(&self) -> Option<usize> {
        self.tracked(&self.state.drag_tracking)
    }

    /// The most recent button-press hit.
    pub fn last_click(&self) -> Option<HitRecord> {
        self.state
            .click_hit
            .get()
            .filter(|r| r.index < self.children.len())
    }

    /// The child currently under the pointer.
    pub fn hovered(&self) -> Option<HitRecord> {
        self.state
            .cursor_hit
            .get()
            .filter(|r| r.index < self.children.len())
    }

    fn tracked(&self, cell: &Cell<Option<usize>>) -> Option<usize> {
        cell.get().filter(|&ix| ix < self.children.len())
    }

    fn child_at(&self, ix: usize) -> Option<&dyn Element> {
        (ix < self.children.len()).then(|| self.children.at(ix))
    }

    fn new_focus(&self, ctx: Option<&Context<'_>>, index: Option<usize>) {
        let current = self.tracked(&self.state.focus);
        if current == index {
            return;
        }
        if let Some(old) = current {
            let child = self.children.at(old);
            child.end_focus();
            if let Some(ctx) = ctx {
                ctx.child(child, self.arrange.bounds_of(ctx, old))
                    .refresh(self.focus_outward);
            }
        }
        self.state.focus.set(index);
        if let Some(new) = index {
            let child = self.children.at(new);
            child.begin_focus();
            if let Some(ctx) = ctx {
                ctx.child(child, self.arrange.bounds_of(ctx, new))
                    .refresh(self.focus_outward);
            }
        }
        tracing::debug!(from = ?current, to = ?index, "composite focus moved");
    }
}

impl<A: Arrange> VecComposite<A> {
    /// Append a child.
    pub fn push(&mut self, child: ElementPtr) {
        self.children.push(child);
    }

    /// Insert a child at `index`, shifting later children (and any focus,
    /// capture, or hover pointing at them) up by one.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, child: ElementPtr) {
        self.children.insert(index, child);
        self.state.on_insert(index);
    }

    /// Remove and return the child at `index`.
    ///
    /// A focused child gets `end_focus` first. Tracked indices that pointed at
    /// the removed child are cleared; later ones shift down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> ElementPtr {
        if self.tracked(&self.state.focus) == Some(index) {
            self.children.at(index).end_focus();
        }
        let child = self.children.remove(index);
        self.state.on_remove(index);
        child
    }

    /// Remove every child and reset all tracked state.
    pub fn clear(&mut self) {
        self.children.clear();
        self.state.clear();
    }
}

impl<C: Container, A> Container for CompositeNode<C, A> {
    fn len(&self) -> usize {
        self.children.len()
    }

    fn at(&self, ix: usize) -> &dyn Element {
        self.children.at(ix)
    }
}

impl<C: Container, A: Arrange> Composite for CompositeNode<C, A> {
    fn bounds_of(&self, ctx: &Context<'_>, index: usize) -> Rect {
        self.arrange.bounds_of(ctx, index)
    }

    fn reverse_index(&self) -> bool {
        self.arrange.reverse_index()
    }

    fn focus_index(&self) -> Option<usize> {
        self.tracked(&self.state.focus)
    }

    fn set_focus(&self, index: usize) -> Result<(), FocusError> {
        let len = self.children.len();
        if index >= len {
            tracing::debug!(index, len, "focus request rejected");
            return Err(FocusError::OutOfRange { index, len });
        }
        self.new_focus(None, Some(index));
        Ok(())
    }

    fn clear_focus(&self) {
        self.new_focus(None, None);
    }

    fn reset(&self) {
        self.state.clear();
    }
}

impl<C: Container, A: Arrange> Element for CompositeNode<C, A> {
    fn limits(&self, surface: &dyn Surface) -> ViewLimits {
        self.arrange.limits(surface, &self.children)
    }

    fn draw(&self, ctx: &Context<'_>) {
        let viewport = ctx.surface.viewport();
        for ix in 0..self.children.len() {
            let bounds = self.arrange.bounds_of(ctx, ix);
            if viewport.is_some_and(|v| v.intersect(bounds).area() <= 0.0) {
                continue;
            }
            let child = self.children.at(ix);
            child.draw(&ctx.child(child, bounds));
        }
    }

    fn layout(&self, ctx: &Context<'_>) {
        self.arrange.arrange(ctx, &self.children);
        for ix in 0..self.children.len() {
            let child = self.children.at(ix);
            child.layout(&ctx.child(child, self.arrange.bounds_of(ctx, ix)));
        }
    }

    fn hit_test(&self, ctx: &Context<'_>, p: Point) -> Option<&dyn Element> {
        self.hit_element(ctx, p).map(|hit| hit.target)
    }

    fn refresh(&self, ctx: &Context<'_>, element: &dyn Element, outward: usize) -> bool {
        if same_element(self, element) {
            ctx.refresh(outward);
            return true;
        }
        (0..self.children.len()).any(|ix| {
            let child = self.children.at(ix);
            child.refresh(
                &ctx.child(child, self.arrange.bounds_of(ctx, ix)),
                element,
                outward,
            )
        })
    }

    fn click(&self, ctx: &Context<'_>, btn: MouseButton) -> Option<&dyn Element> {
        if !btn.down {
            // Release goes to whoever took the press, wherever the pointer is now.
            let ix = self.state.drag_tracking.take()?;
            let child = self.child_at(ix)?;
            tracing::trace!(index = ix, "pointer capture released");
            return child.click(&ctx.child(child, self.arrange.bounds_of(ctx, ix)), btn);
        }

        let Some(hit) = self.hit_element(ctx, btn.pos) else {
            self.state.click_hit.set(None);
            self.state.drag_tracking.set(None);
            self.new_focus(Some(ctx), None);
            return None;
        };
        self.state.click_hit.set(Some(hit.into()));
        self.state.drag_tracking.set(Some(hit.index));
        tracing::trace!(index = hit.index, "pointer captured");

        if hit.element.wants_focus() {
            self.new_focus(Some(ctx), Some(hit.index));
        }
        hit.element.click(&ctx.child(hit.element, hit.bounds), btn)
    }

    fn drag(&self, ctx: &Context<'_>, btn: MouseButton) {
        let Some(ix) = self.tracked(&self.state.drag_tracking) else {
            return;
        };
        let child = self.children.at(ix);
        child.drag(&ctx.child(child, self.arrange.bounds_of(ctx, ix)), btn);
    }

    fn key(&self, ctx: &Context<'_>, k: KeyInfo) -> bool {
        let Some(ix) = self.tracked(&self.state.focus) else {
            return false;
        };
        let child = self.children.at(ix);
        child.key(&ctx.child(child, self.arrange.bounds_of(ctx, ix)), k)
    }

    fn text(&self, ctx: &Context<'_>, info: TextInfo) -> bool {
        let Some(ix) = self.tracked(&self.state.focus) else {
            return false;
        };
        let child = self.children.at(ix);
        child.text(&ctx.child(child, self.arrange.bounds_of(ctx, ix)), info)
    }

    fn cursor(&self, ctx: &Context<'_>, p: Point, status: CursorTracking) -> bool {
        let hit = match status {
            CursorTracking::Leaving => None,
            CursorTracking::Entering | CursorTracking::Hovering => self.hit_element(ctx, p),
        };
        let previous = self.hovered();

        if previous.map(|r| r.index) == hit.map(|h| h.index) {
            let Some(hit) = hit else {
                return false;
            };
            self.state.cursor_hit.set(Some(hit.into()));
            return hit.element.cursor(
                &ctx.child(hit.element, hit.bounds),
                p,
                CursorTracking::Hovering,
            );
        }

        let mut handled = false;
        if let Some(prev) = previous {
            let child = self.children.at(prev.index);
            let bounds = self.arrange.bounds_of(ctx, prev.index);
            handled |= child.cursor(&ctx.child(child, bounds), p, CursorTracking::Leaving);
        }
        self.state.cursor_hit.set(hit.map(HitRecord::from));
        tracing::trace!(
            from = ?previous.map(|r| r.index),
            to = ?hit.map(|h| h.index),
            "hover moved"
        );
        if let Some(hit) = hit {
            handled |= hit.element.cursor(
                &ctx.child(hit.element, hit.bounds),
                p,
                CursorTracking::Entering,
            );
        }
        handled
    }

    fn scroll(&self, ctx: &Context<'_>, dir: Vec2, p: Point) -> bool {
        self.hit_element(ctx, p).is_some_and(|hit| {
            hit.element
                .scroll(&ctx.child(hit.element, hit.bounds), dir, p)
        })
    }

    fn wants_focus(&self) -> bool {
        (0..self.children.len()).any(|ix| self.children.at(ix).wants_focus())
    }

    fn begin_focus(&self) {
        if self.tracked(&self.state.focus).is_some() {
            return;
        }
        let restore = self.tracked(&self.state.saved_focus).or_else(|| {
            (0..self.children.len()).find(|&ix| self.children.at(ix).wants_focus())
        });
        if let Some(ix) = restore {
            self.state.focus.set(Some(ix));
            self.children.at(ix).begin_focus();
            tracing::debug!(index = ix, "composite focus restored");
        }
    }

    fn end_focus(&self) {
        if let Some(ix) = self.tracked(&self.state.focus) {
            self.children.at(ix).end_focus();
            self.state.saved_focus.set(Some(ix));
            self.state.focus.set(None);
        }
    }

    fn focus(&self) -> Option<&dyn Element> {
        self.tracked(&self.state.focus)
            .map(|ix| self.children.at(ix))
    }

    fn is_control(&self) -> bool {
        true
    }

    fn as_composite(&self) -> Option<&dyn Composite> {
        Some(self)
    }
}
