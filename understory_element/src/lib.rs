// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element --heading-base-level=0

//! Understory Element: event routing and focus for a retained element tree.
//!
//! Understory Element is the dispatch core of a retained-mode UI. It does not paint, measure text,
//! or talk to a windowing system; it decides which element gets an event and keeps the state that
//! decision depends on.
//!
//! - [`Element`] is the capability surface every node implements, with leaf defaults for all of it.
//! - [`Proxy`] is a decorator that forwards to one subject and can override any operation
//!   through an [`Intercept`].
//! - [`CompositeNode`] owns an ordered set of children (a [`Container`]) and routes input to them:
//!   hit testing, pointer capture between press and release, hover tracking, and a per-composite
//!   focus index that survives losing and regaining focus.
//! - [`Context`] is the per-call traversal record: element, bounds, surface, and a link to the
//!   enclosing context, so that leaves can find their composite ([`find_composite`]) or ask for a
//!   redraw of their region ([`Context::refresh`]).
//!
//! ## Ownership and re-entrancy
//!
//! Every dispatch method takes `&self`. Composites keep their interaction state in `Cell`s, so a
//! child handler can call back into an enclosing composite through its context (for example to
//! move focus) while the walk is in progress. Structural changes (`insert`, `remove`, `clear`,
//! `children_mut`) need `&mut` and therefore cannot happen while any context is alive.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_element::{
//!     Composite, Context, DamageSurface, Element, ElementPtr, Fixed, KeyCode, KeyInfo,
//!     MouseButton, VecComposite, key_intercept,
//! };
//!
//! #[derive(Debug)]
//! struct Label;
//! impl Element for Label {}
//!
//! // A label and a key-handling field, side by side.
//! let field = key_intercept(Label).on_key(|k| k.key == KeyCode::Enter);
//! let row = VecComposite::new(
//!     vec![Box::new(Label) as ElementPtr, Box::new(field)],
//!     Fixed::new([Rect::new(0.0, 0.0, 50.0, 20.0), Rect::new(50.0, 0.0, 100.0, 20.0)]),
//! );
//!
//! let surface = DamageSurface::new();
//! let ctx = Context::new(&row, Rect::new(0.0, 0.0, 100.0, 20.0), &surface);
//!
//! // Pressing the field focuses it and marks its region for redraw.
//! row.click(&ctx, MouseButton::press(Point::new(60.0, 10.0)));
//! assert_eq!(row.focus_index(), Some(1));
//! assert!(surface.take().contains(Rect::new(50.0, 0.0, 100.0, 20.0)));
//!
//! // Keys now go to the field.
//! assert!(row.key(&ctx, KeyInfo::press(KeyCode::Enter)));
//! assert!(!row.key(&ctx, KeyInfo::press(KeyCode::Escape)));
//! ```
//!
//! ## Logging
//!
//! Focus changes are reported at `debug` level and routing decisions (capture, hover, key
//! interception, composite lookup) at `trace` level through [`tracing`]. Nothing is emitted unless
//! the host installs a subscriber.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arrange;
mod composite;
mod container;
mod context;
mod damage;
mod element;
mod error;
mod find;
mod proxy;
mod types;

#[cfg(test)]
mod test_util;

pub use arrange::{Arrange, Fixed, Layered};
pub use composite::{
    ArrayComposite, Composite, CompositeNode, HitInfo, HitRecord, RangeComposite, VecComposite,
};
pub use container::{Container, RangeView};
pub use context::{Context, Surface};
pub use damage::{Damage, DamageSurface};
pub use element::{AsElement, Basic, Element, ElementPtr, basic, same_element};
pub use error::FocusError;
pub use find::{find_composite, request_focus};
pub use proxy::{Intercept, KeyFn, KeyIntercept, Proxy, key_intercept};
pub use types::{
    ButtonKind, CursorTracking, KeyAction, KeyCode, KeyInfo, Modifiers, MouseButton, TextInfo,
    ViewLimits,
};
