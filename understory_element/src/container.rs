// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, indexable child collections.
//!
//! Three storage strategies implement [`Container`]:
//!
//! - `[ElementPtr; N]`: fixed capacity, owned.
//! - `Vec<ElementPtr>`: growable, owned.
//! - [`RangeView`]: a borrowed `[first, last)` window over another container.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::element::{Element, ElementPtr};

/// An ordered collection of elements addressed by index.
///
/// Indices are stable only between structural mutations of the collection.
pub trait Container {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the collection holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `ix`.
    ///
    /// # Panics
    ///
    /// Panics if `ix >= self.len()`. Callers range-check first.
    fn at(&self, ix: usize) -> &dyn Element;
}

impl<const N: usize> Container for [ElementPtr; N] {
    fn len(&self) -> usize {
        N
    }

    fn at(&self, ix: usize) -> &dyn Element {
        &*self[ix]
    }
}

impl Container for Vec<ElementPtr> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn at(&self, ix: usize) -> &dyn Element {
        &*self[ix]
    }
}

/// A window `[first, last)` onto another container.
///
/// The view owns nothing; `at(ix)` resolves to `container.at(first + ix)`.
/// It borrows the source container, so the source can neither be dropped nor
/// structurally mutated while the view exists:
///
/// ```compile_fail
/// use understory_element::{ElementPtr, RangeView};
///
/// let view = {
///     let source: Vec<ElementPtr> = Vec::new();
///     RangeView::new(&source, 0..0)
/// };
/// drop(view);
/// ```
#[derive(Clone, Copy)]
pub struct RangeView<'a> {
    container: &'a dyn Container,
    first: usize,
    last: usize,
}

impl fmt::Debug for RangeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeView")
            .field("first", &self.first)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl<'a> RangeView<'a> {
    /// View `range` of `container`.
    ///
    /// # Panics
    ///
    /// Panics if the range is reversed or extends past `container.len()`.
    pub fn new(container: &'a dyn Container, range: Range<usize>) -> Self {
        assert!(
            range.start <= range.end && range.end <= container.len(),
            "range {range:?} out of bounds for container of length {}",
            container.len()
        );
        Self {
            container,
            first: range.start,
            last: range.end,
        }
    }

    /// The viewed index range within the source container.
    pub fn range(&self) -> Range<usize> {
        self.first..self.last
    }
}

impl Container for RangeView<'_> {
    fn len(&self) -> usize {
        self.last - self.first
    }

    fn at(&self, ix: usize) -> &dyn Element {
        assert!(ix < self.len(), "index {ix} out of range view of length {}", self.len());
        self.container.at(self.first + ix)
    }
}
