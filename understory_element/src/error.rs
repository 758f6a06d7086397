// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by composite operations.

/// A focus request that could not be honored. Focus state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FocusError {
    /// The requested child index does not exist.
    #[error("focus index {index} out of range for a composite with {len} children")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of children at the time of the request.
        len: usize,
    },
    /// The element is not inside any composite.
    #[error("no composite ancestor to take focus")]
    NoComposite,
    /// The context chain does not match the composite's children, for
    /// example because it was built by hand around a detached element.
    #[error("element is not a child of its composite ancestor")]
    NotAChild,
}
