// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Upward lookups along a context chain.

use core::ptr;

use crate::composite::Composite;
use crate::container::Container;
use crate::context::Context;
use crate::element::same_element;
use crate::error::FocusError;

/// Find the nearest composite above `ctx`.
///
/// Starting from `ctx.parent`, each context's element is checked; decorators
/// are unwrapped through [`Element::underlying`](crate::Element::underlying)
/// until a composite or a non-decorator turns up. The returned context is the
/// one the lookup stopped at, which belongs to the outermost decorator when the
/// composite was found behind one.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_element::{find_composite, Context, DamageSurface, Element, Layered, Proxy, VecComposite};
///
/// # #[derive(Debug)] struct Leaf;
/// # impl Element for Leaf {}
/// let group = Proxy::new(VecComposite::new(Vec::new(), Layered));
/// let leaf = Leaf;
/// let surface = DamageSurface::new();
/// let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
///
/// let outer = Context::new(&group, bounds, &surface);
/// let inner = outer.child(&leaf, bounds);
/// let (_, found) = find_composite(&inner).unwrap();
/// assert!(std::ptr::eq(found, &outer));
/// ```
pub fn find_composite<'a>(ctx: &Context<'a>) -> Option<(&'a dyn Composite, &'a Context<'a>)> {
    for (depth, level) in ctx.ancestors().enumerate() {
        let mut element = Some(level.element);
        while let Some(e) = element {
            if let Some(composite) = e.as_composite() {
                tracing::trace!(depth, "found composite ancestor");
                return Some((composite, level));
            }
            element = e.underlying();
        }
    }
    None
}

/// Put the element of `ctx` on the focus path.
///
/// Every composite above `ctx` focuses the child that leads down to it,
/// innermost first. Fails with [`FocusError::NoComposite`] when there is no
/// composite above `ctx` at all, and with [`FocusError::NotAChild`] when the
/// context chain does not line up with the tree.
pub fn request_focus(ctx: &Context<'_>) -> Result<(), FocusError> {
    let mut current = ctx;
    let mut found = false;
    while let Some((composite, level)) = find_composite(current) {
        found = true;
        // The context directly below `level` belongs to the composite's child.
        let mut below = current;
        for ancestor in current.ancestors() {
            if ptr::eq(ancestor, level) {
                break;
            }
            below = ancestor;
        }
        let index = (0..composite.len())
            .find(|&ix| same_element(composite.at(ix), below.element))
            .ok_or(FocusError::NotAChild)?;
        composite.set_focus(index)?;
        current = level;
    }
    if found {
        Ok(())
    } else {
        Err(FocusError::NoComposite)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use kurbo::Rect;

    use super::*;
    use crate::arrange::{Fixed, Layered};
    use crate::composite::VecComposite;
    use crate::damage::DamageSurface;
    use crate::element::{Element, ElementPtr};
    use crate::proxy::{Proxy, key_intercept};
    use crate::test_util::{Event, Journal, Probe};

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 30.0, 20.0);

    #[test]
    fn none_at_root() {
        let leaf = Probe::new(0);
        let surface = DamageSurface::new();
        let ctx = Context::new(&leaf, BOUNDS, &surface);
        assert!(find_composite(&ctx).is_none());
        assert_eq!(request_focus(&ctx), Err(FocusError::NoComposite));
    }

    #[test]
    fn skips_the_starting_context() {
        let group = VecComposite::new(vec![Probe::new(0).boxed()], Layered);
        let surface = DamageSurface::new();
        let ctx = Context::new(&group, BOUNDS, &surface);
        assert!(find_composite(&ctx).is_none());
    }

    #[test]
    fn tunnels_through_decorator_chain() {
        // leaf -> decorator -> decorator -> composite -> root
        let composite = VecComposite::new(vec![Probe::new(1).boxed()], Layered);
        let root = Probe::new(9);
        let deco_inner = key_intercept(Probe::new(2));
        let deco_outer = Proxy::new(Probe::new(3));
        let leaf = Probe::new(0);
        let surface = DamageSurface::new();

        let root_ctx = Context::new(&root, BOUNDS, &surface);
        let composite_ctx = root_ctx.child(&composite, BOUNDS);
        let outer_ctx = composite_ctx.child(&deco_outer, BOUNDS);
        let inner_ctx = outer_ctx.child(&deco_inner, BOUNDS);
        let leaf_ctx = inner_ctx.child(&leaf, BOUNDS);

        let (found, found_ctx) = find_composite(&leaf_ctx).unwrap();
        assert!(ptr::eq(found_ctx, &composite_ctx));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn returns_outer_context_when_composite_is_wrapped() {
        let wrapped = Proxy::new(Proxy::new(VecComposite::new(
            vec![Probe::new(1).boxed()],
            Layered,
        )));
        let leaf = Probe::new(0);
        let surface = DamageSurface::new();
        let wrapper_ctx = Context::new(&wrapped, BOUNDS, &surface);
        let leaf_ctx = wrapper_ctx.child(&leaf, BOUNDS);

        let (found, found_ctx) = find_composite(&leaf_ctx).unwrap();
        assert!(ptr::eq(found_ctx, &wrapper_ctx));
        assert!(same_element(
            found.at(0),
            &*wrapped.subject().subject().children()[0]
        ));
    }

    #[test]
    fn request_focus_focuses_whole_path() {
        let journal = Journal::default();
        let inner = VecComposite::new(
            vec![
                Probe::new(10).focusable().in_journal(&journal).boxed(),
                Probe::new(11).focusable().in_journal(&journal).boxed(),
            ],
            Fixed::new([Rect::new(0.0, 0.0, 10.0, 20.0), Rect::new(10.0, 0.0, 20.0, 20.0)]),
        );
        let outer = VecComposite::new(
            vec![
                Probe::new(0).focusable().in_journal(&journal).boxed(),
                Box::new(inner) as ElementPtr,
            ],
            Fixed::new([Rect::new(0.0, 0.0, 10.0, 20.0), Rect::new(10.0, 0.0, 30.0, 20.0)]),
        );
        outer.set_focus(0).unwrap();
        journal.clear();

        let surface = DamageSurface::new();
        let outer_ctx = Context::new(&outer, BOUNDS, &surface);
        let inner_el = outer.at(1);
        let inner_ctx = outer_ctx.child(inner_el, outer.bounds_of(&outer_ctx, 1));
        let inner_comp = inner_el.as_composite().unwrap();
        let leaf = inner_comp.at(1);
        let leaf_ctx = inner_ctx.child(leaf, inner_comp.bounds_of(&inner_ctx, 1));

        request_focus(&leaf_ctx).unwrap();
        assert_eq!(inner_comp.focus_index(), Some(1));
        assert_eq!(outer.focus_index(), Some(1));
        assert_eq!(
            journal.all(),
            [(11, Event::BeginFocus), (0, Event::EndFocus)]
        );
    }

    #[test]
    fn request_focus_rejects_detached_element() {
        let group = VecComposite::new(vec![Probe::new(0).boxed()], Layered);
        let stranger = Probe::new(1);
        let surface = DamageSurface::new();
        let ctx = Context::new(&group, BOUNDS, &surface);
        let stranger_ctx = ctx.child(&stranger, BOUNDS);
        assert_eq!(request_focus(&stranger_ctx), Err(FocusError::NotAChild));
        assert!(group.focus_index().is_none());
    }
}
