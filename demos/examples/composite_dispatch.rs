// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small form routed through nested composites.
//!
//! This example builds a row holding a caption, a two-field form, and a button,
//! then feeds it pointer and keyboard input:
//! - pressing a field focuses it in its own composite and in the row,
//! - text goes to whichever field holds focus,
//! - a drag that starts on the button stays with it after leaving the row,
//! - damage regions are collected by a `DamageSurface`.
//!
//! Run with routing logs:
//! - `RUST_LOG=understory_element=trace cargo run -p understory_demos --example composite_dispatch`

use std::cell::{Cell, RefCell};

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_element::{
    Composite, Container, Context, CursorTracking, DamageSurface, Element, ElementPtr, Fixed,
    KeyCode, KeyInfo, Modifiers, MouseButton, TextInfo, VecComposite, basic, key_intercept,
};

/// A text field that accepts printable input and backspace.
#[derive(Debug)]
struct Field {
    name: &'static str,
    text: RefCell<String>,
}

impl Field {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            text: RefCell::new(String::new()),
        }
    }
}

impl Element for Field {
    fn draw(&self, ctx: &Context<'_>) {
        println!("  draw {:<6} {:?} at {:?}", self.name, self.text.borrow(), ctx.bounds);
    }

    fn key(&self, _ctx: &Context<'_>, k: KeyInfo) -> bool {
        if k.key != KeyCode::Backspace {
            return false;
        }
        self.text.borrow_mut().pop();
        true
    }

    fn text(&self, ctx: &Context<'_>, info: TextInfo) -> bool {
        self.text.borrow_mut().push(info.codepoint);
        ctx.refresh(0);
        true
    }

    fn wants_focus(&self) -> bool {
        true
    }

    fn begin_focus(&self) {
        println!("  {} focused", self.name);
    }

    fn end_focus(&self) {
        println!("  {} blurred", self.name);
    }

    fn is_control(&self) -> bool {
        true
    }
}

/// A button that counts completed presses and reports drags.
#[derive(Debug, Default)]
struct Button {
    presses: Cell<u32>,
}

impl Element for Button {
    fn click(&self, _ctx: &Context<'_>, btn: MouseButton) -> Option<&dyn Element> {
        if !btn.down {
            self.presses.set(self.presses.get() + 1);
        }
        Some(self)
    }

    fn drag(&self, _ctx: &Context<'_>, btn: MouseButton) {
        println!("  button dragged to ({:.1}, {:.1})", btn.pos.x, btn.pos.y);
    }

    fn cursor(&self, _ctx: &Context<'_>, _p: Point, status: CursorTracking) -> bool {
        println!("  button hover: {status:?}");
        true
    }

    fn is_control(&self) -> bool {
        true
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The second field swallows Tab before the field sees it.
    let form = VecComposite::new(
        vec![
            Box::new(Field::new("name")) as ElementPtr,
            Box::new(key_intercept(Field::new("email")).on_key(|k| k.key == KeyCode::Tab)),
        ],
        Fixed::new([Rect::new(0.0, 0.0, 100.0, 20.0), Rect::new(0.0, 20.0, 100.0, 40.0)]),
    )
    .with_focus_outward(1);

    let row = VecComposite::new(
        vec![
            Box::new(basic(|ctx: &Context<'_>| println!("  draw caption at {:?}", ctx.bounds)))
                as ElementPtr,
            Box::new(form),
            Box::new(Button::default()),
        ],
        Fixed::new([
            Rect::new(0.0, 0.0, 60.0, 40.0),
            Rect::new(60.0, 0.0, 160.0, 40.0),
            Rect::new(160.0, 0.0, 200.0, 40.0),
        ]),
    );

    let surface = DamageSurface::new();
    let ctx = Context::new(&row, Rect::new(0.0, 0.0, 200.0, 40.0), &surface);
    row.layout(&ctx);

    println!("== press the email field ==");
    row.click(&ctx, MouseButton::press(Point::new(80.0, 30.0)));
    row.click(&ctx, MouseButton::release(Point::new(80.0, 30.0)));
    if let Some(form) = row.at(1).as_composite() {
        println!("  row focus {:?}, form focus {:?}", row.focus_index(), form.focus_index());
    }

    println!("== type ==");
    for c in "ada".chars() {
        row.text(
            &ctx,
            TextInfo {
                codepoint: c,
                modifiers: Modifiers::empty(),
            },
        );
    }
    println!("  backspace handled: {}", row.key(&ctx, KeyInfo::press(KeyCode::Backspace)));
    println!("  tab handled: {}", row.key(&ctx, KeyInfo::press(KeyCode::Tab)));

    println!("== drag off the button ==");
    let press = MouseButton::press(Point::new(180.0, 20.0));
    row.cursor(&ctx, press.pos, CursorTracking::Entering);
    row.click(&ctx, press);
    row.drag(&ctx, press.moved_to(Point::new(250.0, 80.0)));
    row.click(&ctx, MouseButton::release(Point::new(250.0, 80.0)));
    row.cursor(&ctx, Point::new(250.0, 80.0), CursorTracking::Leaving);

    println!("== redraw ==");
    let damage = surface.take();
    tracing::info!(
        rects = damage.dirty_rects.len(),
        covering = ?damage.union_rect(),
        "damage collected"
    );
    row.draw(&ctx);
}
