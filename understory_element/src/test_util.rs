// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording leaf elements shared by the unit tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect, Vec2};

use crate::context::Context;
use crate::element::{Element, ElementPtr};
use crate::types::{CursorTracking, KeyCode, KeyInfo, MouseButton, TextInfo};

/// Something a [`Probe`] was told.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Draw(Rect),
    Layout(Rect),
    Click { down: bool, bounds: Rect },
    Drag(Point),
    Key(KeyCode),
    Text(char),
    Cursor(CursorTracking),
    Scroll(Vec2),
    BeginFocus,
    EndFocus,
}

/// Log shared by several probes, tagged with probe ids.
#[derive(Clone, Debug, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<(usize, Event)>>>);

impl Journal {
    pub(crate) fn events_of(&self, id: usize) -> Vec<Event> {
        self.0
            .borrow()
            .iter()
            .filter(|(who, _)| *who == id)
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub(crate) fn all(&self) -> Vec<(usize, Event)> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A leaf that records every notification and answers according to its flags.
#[derive(Debug, Default)]
pub(crate) struct Probe {
    pub(crate) id: usize,
    journal: Journal,
    focusable: bool,
    keys: bool,
    clicks: bool,
    scrolls: bool,
    hover: bool,
    transparent: bool,
}

impl Probe {
    pub(crate) fn new(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub(crate) fn in_journal(mut self, journal: &Journal) -> Self {
        self.journal = journal.clone();
        self
    }

    pub(crate) fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub(crate) fn handles_keys(mut self) -> Self {
        self.keys = true;
        self
    }

    pub(crate) fn claims_clicks(mut self) -> Self {
        self.clicks = true;
        self
    }

    pub(crate) fn handles_scroll(mut self) -> Self {
        self.scrolls = true;
        self
    }

    pub(crate) fn consumes_hover(mut self) -> Self {
        self.hover = true;
        self
    }

    /// Declines every hit test.
    pub(crate) fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub(crate) fn boxed(self) -> ElementPtr {
        Box::new(self)
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.journal.events_of(self.id)
    }

    fn record(&self, event: Event) {
        self.journal.0.borrow_mut().push((self.id, event));
    }
}

impl Element for Probe {
    fn draw(&self, ctx: &Context<'_>) {
        self.record(Event::Draw(ctx.bounds));
    }

    fn layout(&self, ctx: &Context<'_>) {
        self.record(Event::Layout(ctx.bounds));
    }

    fn hit_test(&self, ctx: &Context<'_>, p: Point) -> Option<&dyn Element> {
        if self.transparent || !ctx.bounds.contains(p) {
            return None;
        }
        Some(self)
    }

    fn click(&self, ctx: &Context<'_>, btn: MouseButton) -> Option<&dyn Element> {
        self.record(Event::Click {
            down: btn.down,
            bounds: ctx.bounds,
        });
        self.clicks.then_some(self as &dyn Element)
    }

    fn drag(&self, _ctx: &Context<'_>, btn: MouseButton) {
        self.record(Event::Drag(btn.pos));
    }

    fn key(&self, _ctx: &Context<'_>, k: KeyInfo) -> bool {
        self.record(Event::Key(k.key));
        self.keys
    }

    fn text(&self, _ctx: &Context<'_>, info: TextInfo) -> bool {
        self.record(Event::Text(info.codepoint));
        self.keys
    }

    fn cursor(&self, _ctx: &Context<'_>, _p: Point, status: CursorTracking) -> bool {
        self.record(Event::Cursor(status));
        self.hover
    }

    fn scroll(&self, _ctx: &Context<'_>, dir: Vec2, _p: Point) -> bool {
        self.record(Event::Scroll(dir));
        self.scrolls
    }

    fn wants_focus(&self) -> bool {
        self.focusable
    }

    fn begin_focus(&self) {
        self.record(Event::BeginFocus);
    }

    fn end_focus(&self) {
        self.record(Event::EndFocus);
    }

    fn is_control(&self) -> bool {
        self.focusable || self.clicks
    }
}

/// Three probes laid side by side: `[0,10)`, `[10,20)`, `[20,30)` by `[0,20)`.
pub(crate) fn three_columns() -> [Rect; 3] {
    [
        Rect::new(0.0, 0.0, 10.0, 20.0),
        Rect::new(10.0, 0.0, 20.0, 20.0),
        Rect::new(20.0, 0.0, 30.0, 20.0),
    ]
}
