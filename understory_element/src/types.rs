// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input payloads and size limits consumed by the element capability surface.

use kurbo::{Point, Size};

bitflags::bitflags! {
    /// Keyboard modifiers held while an input event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT   = 0b0000_0001;
        /// Either control key.
        const CONTROL = 0b0000_0010;
        /// Either alt/option key.
        const ALT     = 0b0000_0100;
        /// Either super/command/windows key.
        const SUPER   = 0b0000_1000;
    }
}

/// Which pointer button an event refers to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Primary button.
    #[default]
    Left,
    /// Middle button or wheel press.
    Middle,
    /// Secondary button.
    Right,
}

/// A pointer button event, used for both `click` and `drag`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseButton {
    /// `true` while the button is held.
    pub down: bool,
    /// Click count for multi-click detection (1 for a single click).
    pub num_clicks: u32,
    /// The button this event refers to.
    pub kind: ButtonKind,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Pointer position in the root coordinate space.
    pub pos: Point,
}

impl MouseButton {
    /// A single left-button press at `pos`.
    pub fn press(pos: Point) -> Self {
        Self {
            down: true,
            num_clicks: 1,
            kind: ButtonKind::Left,
            modifiers: Modifiers::empty(),
            pos,
        }
    }

    /// A left-button release at `pos`.
    pub fn release(pos: Point) -> Self {
        Self {
            down: false,
            ..Self::press(pos)
        }
    }

    /// The same button state moved to `pos`; used for drag notifications.
    #[must_use]
    pub fn moved_to(self, pos: Point) -> Self {
        Self { pos, ..self }
    }
}

/// Physical or logical key identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key producing a printable character.
    Character(char),
    /// Enter/Return.
    Enter,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Any other platform key code.
    Other(u32),
}

/// What happened to a key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// The key went down.
    #[default]
    Press,
    /// The key went up.
    Release,
    /// Auto-repeat while held.
    Repeat,
}

/// A keyboard event routed along the focus path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyInfo {
    /// The key.
    pub key: KeyCode,
    /// Press, release, or repeat.
    pub action: KeyAction,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

impl KeyInfo {
    /// A plain key press with no modifiers.
    pub fn press(key: KeyCode) -> Self {
        Self {
            key,
            action: KeyAction::Press,
            modifiers: Modifiers::empty(),
        }
    }
}

/// A text input event (one code point) routed along the focus path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInfo {
    /// The committed code point.
    pub codepoint: char,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

/// Hover phase delivered with `cursor` notifications.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CursorTracking {
    /// The pointer just moved over the element.
    Entering,
    /// The pointer keeps moving over the element.
    Hovering,
    /// The pointer left the element.
    Leaving,
}

/// Minimum and maximum extents an element accepts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewLimits {
    /// Smallest acceptable size.
    pub min: Size,
    /// Largest acceptable size.
    pub max: Size,
}

impl ViewLimits {
    /// No constraint at all: zero minimum, unbounded maximum.
    pub const FULL: Self = Self {
        min: Size::ZERO,
        max: Size::new(f64::INFINITY, f64::INFINITY),
    };

    /// Exactly `size`, no more and no less.
    pub const fn fixed(size: Size) -> Self {
        Self {
            min: size,
            max: size,
        }
    }
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self::FULL
    }
}
