// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide geometry along the scroll axis.
//!
//! [`SlideLayout`] is the carousel's view of the render target: where each
//! slide sits in content coordinates, how wide the viewport is, and how far the
//! content extends. Hosts feed measured spans after layout, or build a uniform
//! layout up front when all slides share one width.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

/// Measured geometry of a horizontal strip of slides.
///
/// All values live in one caller-chosen 1D coordinate space (typically
/// logical pixels) where `0.0` is the start of the scrollable content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideLayout {
    spans: Vec<Option<Range<f64>>>,
    viewport_extent: f64,
    content_extent: f64,
}

impl SlideLayout {
    /// Creates a layout for `len` slides with no measurements yet.
    #[must_use]
    pub fn new(len: usize, viewport_extent: f64) -> Self {
        let mut spans = Vec::with_capacity(len);
        spans.resize(len, None);
        Self {
            spans,
            viewport_extent: sanitize(viewport_extent),
            content_extent: 0.0,
        }
    }

    /// Creates a fully measured layout of equally sized slides.
    ///
    /// Slide `i` starts at `inset + i * (slide_extent + gap)`. The content
    /// extent includes `inset` on both ends, matching a strip padded with
    /// spacer elements.
    #[must_use]
    pub fn uniform(
        len: usize,
        slide_extent: f64,
        gap: f64,
        inset: f64,
        viewport_extent: f64,
    ) -> Self {
        let slide_extent = sanitize(slide_extent);
        let gap = sanitize(gap);
        let inset = sanitize(inset);
        let mut spans = Vec::with_capacity(len);
        let mut cursor = inset;
        for _ in 0..len {
            spans.push(Some(cursor..cursor + slide_extent));
            cursor += slide_extent + gap;
        }
        let content_extent = if len == 0 {
            2.0 * inset
        } else {
            cursor - gap + inset
        };
        Self {
            spans,
            viewport_extent: sanitize(viewport_extent),
            content_extent,
        }
    }

    /// Returns the number of slides this layout describes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the layout describes no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Grows or shrinks the layout to `len` slides.
    ///
    /// New slides start unmeasured.
    pub fn set_len(&mut self, len: usize) {
        self.spans.resize(len, None);
    }

    /// Returns the viewport extent.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Sets the viewport extent (the visible width of the scroll container).
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = sanitize(extent);
    }

    /// Returns the total scrollable content extent.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Sets the total scrollable content extent.
    pub fn set_content_extent(&mut self, extent: f64) {
        self.content_extent = sanitize(extent);
    }

    /// Returns the measured span of slide `index`, if any.
    #[must_use]
    pub fn slide_span(&self, index: usize) -> Option<Range<f64>> {
        self.spans.get(index).cloned().flatten()
    }

    /// Records the measured span of slide `index`.
    ///
    /// The content extent grows to cover the span if needed.
    pub fn set_slide_span(&mut self, index: usize, span: Range<f64>) -> Result<(), LayoutError> {
        let len = self.spans.len();
        let slot = self
            .spans
            .get_mut(index)
            .ok_or(LayoutError::IndexOutOfRange { index, len })?;
        if !span.start.is_finite() || !span.end.is_finite() || span.end < span.start {
            return Err(LayoutError::InvalidSpan { index });
        }
        self.content_extent = self.content_extent.max(span.end);
        *slot = Some(span);
        Ok(())
    }

    /// Forgets the measurement for slide `index`.
    pub fn clear_slide_span(&mut self, index: usize) {
        if let Some(slot) = self.spans.get_mut(index) {
            *slot = None;
        }
    }

    /// Largest valid scroll offset: `content_extent - viewport_extent`, never
    /// negative.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Clamps `offset` into `[0, max_scroll_offset]`.
    #[must_use]
    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll_offset())
    }

    /// Scroll offset that brings slide `index` to the viewport start.
    ///
    /// The offset is measured relative to the first slide, so leading insets do
    /// not push the target past the slide, and is clamped to the scrollable
    /// range. Returns `None` when either the target or the first slide has not
    /// been measured.
    #[must_use]
    pub fn scroll_target(&self, index: usize) -> Option<f64> {
        let first = self.slide_span(0)?;
        let target = self.slide_span(index)?;
        Some(self.clamp_scroll_offset(target.start - first.start))
    }

    /// Fraction of slide `index` visible at `scroll_offset`, in `[0, 1]`.
    ///
    /// Unmeasured and zero-width slides report `0.0`.
    #[must_use]
    pub fn intersection_ratio(&self, index: usize, scroll_offset: f64) -> f64 {
        let Some(span) = self.slide_span(index) else {
            return 0.0;
        };
        let extent = span.end - span.start;
        if extent <= 0.0 {
            return 0.0;
        }
        let visible_start = span.start.max(scroll_offset);
        let visible_end = span.end.min(scroll_offset + self.viewport_extent);
        ((visible_end - visible_start) / extent).clamp(0.0, 1.0)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Error returned when a slide measurement is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The slide index is not part of the layout.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The number of slides in the layout.
        len: usize,
    },
    /// The span was non-finite or ended before it started.
    InvalidSpan {
        /// The slide whose span was rejected.
        index: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "slide index {index} is out of range for {len} slides")
            }
            Self::InvalidSpan { index } => write!(f, "slide {index} has an invalid span"),
        }
    }
}

impl core::error::Error for LayoutError {}
