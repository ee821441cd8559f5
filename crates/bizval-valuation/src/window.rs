//! Year windows over a record.
//!
//! A [`Window`] is what callers ask for: either explicit half-open indices or
//! the last N years. Resolving it against a record length gives a [`Span`],
//! which is what the calculators index with. A span can still be handed a
//! different record, so every calculator checks it with [`Span::fit`] first.

use crate::error::{Result, ValuationError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Requested range of fiscal years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    /// Half-open index range `[start, end)`, index 0 being the earliest year
    #[display("[{start}, {end})")]
    Range {
        /// First year index, inclusive
        start: usize,
        /// Last year index, exclusive
        end: usize,
    },
    /// The most recent N years
    #[display("last {_0} years")]
    Last(usize),
}

impl Window {
    /// Explicit half-open index range.
    pub const fn range(start: usize, end: usize) -> Self {
        Self::Range { start, end }
    }

    /// Resolve against a record covering `len` years.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidWindow`] if the window reaches outside
    /// the record or is reversed.
    pub fn resolve(self, len: usize) -> Result<Span> {
        let (start, end) = match self {
            Self::Range { start, end } => (start, end),
            Self::Last(years) => {
                if years > len {
                    return Err(ValuationError::InvalidWindow { window: self, len });
                }
                (len - years, len)
            }
        };
        if start > end || end > len {
            return Err(ValuationError::InvalidWindow { window: self, len });
        }
        Ok(Span { start, end })
    }
}

/// A window resolved against a concrete record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// First year index, inclusive.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Last year index, exclusive.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of years covered.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether no years are covered.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Year indices covered.
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check that the span fits a record covering `len` years.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidWindow`] if the span ends past `len`.
    pub fn fit(self, len: usize) -> Result<Self> {
        if self.end > len {
            return Err(ValuationError::InvalidWindow {
                window: Window::range(self.start, self.end),
                len,
            });
        }
        Ok(self)
    }

    /// The covered part of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidWindow`] if the span ends past the
    /// series.
    pub fn slice<'a>(&self, values: &'a [f64]) -> Result<&'a [f64]> {
        self.fit(values.len())?;
        Ok(&values[self.indices()])
    }
}
