// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorators: elements that wrap exactly one subject.
//!
//! A [`Proxy`] owns its subject and forwards every operation to it through an
//! [`Intercept`]. Each `Intercept` method is provided with plain forwarding, so
//! an intercept overrides only the operations it cares about:
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_element::{Context, Element, Intercept, Proxy};
//!
//! /// Swallows horizontal scrolling.
//! #[derive(Debug)]
//! struct VerticalOnly;
//!
//! impl Intercept for VerticalOnly {
//!     fn scroll(&self, subject: &dyn Element, ctx: &Context<'_>, dir: Vec2, p: kurbo::Point) -> bool {
//!         dir.x == 0.0 && subject.scroll(ctx, dir, p)
//!     }
//! }
//!
//! # #[derive(Debug)] struct Leaf;
//! # impl Element for Leaf {}
//! let wrapped = Proxy::with_intercept(Leaf, VerticalOnly);
//! assert!(wrapped.is_decorator());
//! ```
//!
//! [`crate::find_composite`] sees through any chain of proxies via
//! [`Element::underlying`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::context::{Context, Surface};
use crate::element::{Element, same_element};
use crate::types::{CursorTracking, KeyInfo, MouseButton, TextInfo, ViewLimits};

/// Per-operation hooks of a [`Proxy`]; every method forwards by default.
pub trait Intercept {
    /// Size limits.
    fn limits(&self, subject: &dyn Element, surface: &dyn Surface) -> ViewLimits {
        subject.limits(surface)
    }

    /// Paint.
    fn draw(&self, subject: &dyn Element, ctx: &Context<'_>) {
        subject.draw(ctx);
    }

    /// Layout.
    fn layout(&self, subject: &dyn Element, ctx: &Context<'_>) {
        subject.layout(ctx);
    }

    /// Hit test.
    fn hit_test<'s>(
        &self,
        subject: &'s dyn Element,
        ctx: &Context<'_>,
        p: Point,
    ) -> Option<&'s dyn Element> {
        subject.hit_test(ctx, p)
    }

    /// Button press or release.
    fn click<'s>(
        &self,
        subject: &'s dyn Element,
        ctx: &Context<'_>,
        btn: MouseButton,
    ) -> Option<&'s dyn Element> {
        subject.click(ctx, btn)
    }

    /// Captured pointer movement.
    fn drag(&self, subject: &dyn Element, ctx: &Context<'_>, btn: MouseButton) {
        subject.drag(ctx, btn);
    }

    /// Key event.
    fn key(&self, subject: &dyn Element, ctx: &Context<'_>, k: KeyInfo) -> bool {
        subject.key(ctx, k)
    }

    /// Text input.
    fn text(&self, subject: &dyn Element, ctx: &Context<'_>, info: TextInfo) -> bool {
        subject.text(ctx, info)
    }

    /// Hover notification.
    fn cursor(
        &self,
        subject: &dyn Element,
        ctx: &Context<'_>,
        p: Point,
        status: CursorTracking,
    ) -> bool {
        subject.cursor(ctx, p, status)
    }

    /// Scroll.
    fn scroll(&self, subject: &dyn Element, ctx: &Context<'_>, dir: Vec2, p: Point) -> bool {
        subject.scroll(ctx, dir, p)
    }

    /// Focus eligibility.
    fn wants_focus(&self, subject: &dyn Element) -> bool {
        subject.wants_focus()
    }

    /// Focus arrived.
    fn begin_focus(&self, subject: &dyn Element) {
        subject.begin_focus();
    }

    /// Focus left.
    fn end_focus(&self, subject: &dyn Element) {
        subject.end_focus();
    }

    /// Interactivity.
    fn is_control(&self, subject: &dyn Element) -> bool {
        subject.is_control()
    }
}

/// Plain forwarding.
impl Intercept for () {}

/// An element wrapping one owned subject.
///
/// The subject lives exactly as long as the proxy. The proxy shares its
/// context with the subject: it never derives a new one.
#[derive(Clone, Debug)]
pub struct Proxy<S, I = ()> {
    subject: S,
    intercept: I,
}

impl<S: Element> Proxy<S> {
    /// Wrap `subject` with plain forwarding.
    pub fn new(subject: S) -> Self {
        Self {
            subject,
            intercept: (),
        }
    }
}

impl<S: Element, I: Intercept> Proxy<S, I> {
    /// Wrap `subject`, routing every operation through `intercept`.
    pub fn with_intercept(subject: S, intercept: I) -> Self {
        Self { subject, intercept }
    }

    /// The wrapped element.
    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// The wrapped element, mutably.
    pub fn subject_mut(&mut self) -> &mut S {
        &mut self.subject
    }

    /// The intercept hooks.
    pub fn intercept(&self) -> &I {
        &self.intercept
    }

    /// The intercept hooks, mutably.
    pub fn intercept_mut(&mut self) -> &mut I {
        &mut self.intercept
    }

    /// Unwrap into the subject.
    pub fn into_subject(self) -> S {
        self.subject
    }
}

impl<S: Element, I: Intercept> Element for Proxy<S, I> {
    fn limits(&self, surface: &dyn Surface) -> ViewLimits {
        self.intercept.limits(&self.subject, surface)
    }

    fn draw(&self, ctx: &Context<'_>) {
        self.intercept.draw(&self.subject, ctx);
    }

    fn layout(&self, ctx: &Context<'_>) {
        self.intercept.layout(&self.subject, ctx);
    }

    fn hit_test(&self, ctx: &Context<'_>, p: Point) -> Option<&dyn Element> {
        self.intercept.hit_test(&self.subject, ctx, p)
    }

    fn refresh(&self, ctx: &Context<'_>, element: &dyn Element, outward: usize) -> bool {
        if same_element(self, element) {
            ctx.refresh(outward);
            return true;
        }
        self.subject.refresh(ctx, element, outward)
    }

    fn click(&self, ctx: &Context<'_>, btn: MouseButton) -> Option<&dyn Element> {
        self.intercept.click(&self.subject, ctx, btn)
    }

    fn drag(&self, ctx: &Context<'_>, btn: MouseButton) {
        self.intercept.drag(&self.subject, ctx, btn);
    }

    fn key(&self, ctx: &Context<'_>, k: KeyInfo) -> bool {
        self.intercept.key(&self.subject, ctx, k)
    }

    fn text(&self, ctx: &Context<'_>, info: TextInfo) -> bool {
        self.intercept.text(&self.subject, ctx, info)
    }

    fn cursor(&self, ctx: &Context<'_>, p: Point, status: CursorTracking) -> bool {
        self.intercept.cursor(&self.subject, ctx, p, status)
    }

    fn scroll(&self, ctx: &Context<'_>, dir: Vec2, p: Point) -> bool {
        self.intercept.scroll(&self.subject, ctx, dir, p)
    }

    fn wants_focus(&self) -> bool {
        self.intercept.wants_focus(&self.subject)
    }

    fn begin_focus(&self) {
        self.intercept.begin_focus(&self.subject);
    }

    fn end_focus(&self) {
        self.intercept.end_focus(&self.subject);
    }

    fn focus(&self) -> Option<&dyn Element> {
        self.subject.focus()
    }

    fn is_control(&self) -> bool {
        self.intercept.is_control(&self.subject)
    }

    fn underlying(&self) -> Option<&dyn Element> {
        Some(&self.subject)
    }
}

/// Predicate type of [`KeyIntercept`]: returns `true` when it handled the key.
pub type KeyFn = Box<dyn Fn(KeyInfo) -> bool>;

/// Offers every key to a predicate before the subject sees it.
///
/// A proxy using this intercept always reports itself as a control that
/// wants focus, whatever the subject says.
pub struct KeyIntercept {
    on_key: KeyFn,
}

impl fmt::Debug for KeyIntercept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyIntercept").finish_non_exhaustive()
    }
}

impl Default for KeyIntercept {
    fn default() -> Self {
        Self {
            on_key: Box::new(|_| false),
        }
    }
}

impl KeyIntercept {
    /// Intercept keys with `on_key`.
    pub fn new(on_key: impl Fn(KeyInfo) -> bool + 'static) -> Self {
        Self {
            on_key: Box::new(on_key),
        }
    }
}

impl Intercept for KeyIntercept {
    fn key(&self, subject: &dyn Element, ctx: &Context<'_>, k: KeyInfo) -> bool {
        if (self.on_key)(k) {
            tracing::trace!(key = ?k.key, "key consumed by intercept");
            return true;
        }
        subject.key(ctx, k)
    }

    fn wants_focus(&self, _subject: &dyn Element) -> bool {
        true
    }

    fn is_control(&self, _subject: &dyn Element) -> bool {
        true
    }
}

impl<S: Element> Proxy<S, KeyIntercept> {
    /// Replace the key predicate.
    #[must_use]
    pub fn on_key(mut self, f: impl Fn(KeyInfo) -> bool + 'static) -> Self {
        self.set_on_key(f);
        self
    }

    /// Replace the key predicate in place.
    pub fn set_on_key(&mut self, f: impl Fn(KeyInfo) -> bool + 'static) {
        self.intercept.on_key = Box::new(f);
    }
}

/// Wrap `subject` so a key predicate sees every key first.
///
/// The initial predicate handles nothing; set one with [`Proxy::on_key`].
///
/// ```rust
/// use kurbo::Rect;
/// use understory_element::{key_intercept, Context, DamageSurface, Element, KeyCode, KeyInfo};
///
/// # #[derive(Debug)] struct Leaf;
/// # impl Element for Leaf {}
/// let field = key_intercept(Leaf).on_key(|k| k.key == KeyCode::Escape);
/// let surface = DamageSurface::new();
/// let ctx = Context::new(&field, Rect::new(0.0, 0.0, 10.0, 10.0), &surface);
///
/// assert!(field.key(&ctx, KeyInfo::press(KeyCode::Escape)));
/// assert!(!field.key(&ctx, KeyInfo::press(KeyCode::Enter)));
/// assert!(field.wants_focus());
/// ```
pub fn key_intercept<S: Element>(subject: S) -> Proxy<S, KeyIntercept> {
    Proxy::with_intercept(subject, KeyIntercept::default())
}
