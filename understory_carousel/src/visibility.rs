// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide visibility bookkeeping.
//!
//! ## Usage
//!
//! 1) Forward each intersection report for a slide as a [`VisibilityEntry`].
//! 2) [`VisibilityTracker::record`] keeps the latest report per slide.
//! 3) [`VisibilityTracker::most_visible`] answers which slide currently shows
//!    the most of itself.
//!
//! Hosts without a native intersection service can derive entries from a
//! [`SlideLayout`] with [`ThresholdObserver`], which only reports slides whose
//! threshold bucket changed since the previous observation.
//!
//! ## Minimal example
//!
//! ```
//! use understory_carousel::{VisibilityEntry, VisibilityTracker};
//!
//! let mut tracker = VisibilityTracker::new(3);
//! tracker.record(VisibilityEntry::new(0, 0.4, true));
//! tracker.record(VisibilityEntry::new(1, 0.6, true));
//! assert_eq!(tracker.most_visible(), Some(1));
//!
//! // Slide 1 scrolls out of view.
//! tracker.record(VisibilityEntry::new(1, 0.0, false));
//! assert_eq!(tracker.most_visible(), Some(0));
//! ```

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::SlideLayout;

/// One intersection report for one slide.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisibilityEntry {
    /// Display index of the slide.
    pub index: usize,
    /// Visible fraction of the slide in `[0, 1]`.
    pub ratio: f64,
    /// Whether the slide intersects the viewport at all.
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    /// Creates an entry, clamping `ratio` into `[0, 1]`.
    ///
    /// Non-finite ratios are treated as `0.0`.
    #[must_use]
    pub fn new(index: usize, ratio: f64, is_intersecting: bool) -> Self {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            index,
            ratio,
            is_intersecting,
        }
    }
}

/// Latest visibility per slide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityTracker {
    // `None` means "not intersecting" (or never reported); otherwise the
    // ratio and the arrival sequence of the report.
    ratios: Vec<Option<(f64, u64)>>,
    next_seq: u64,
}

impl VisibilityTracker {
    /// Creates a tracker for `len` slides, none of them visible.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut ratios = Vec::with_capacity(len);
        ratios.resize(len, None);
        Self {
            ratios,
            next_seq: 0,
        }
    }

    /// Returns the number of tracked slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Returns `true` if no slides are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Forgets all reports and resizes to `len` slides.
    pub fn reset(&mut self, len: usize) {
        self.ratios.clear();
        self.ratios.resize(len, None);
        self.next_seq = 0;
    }

    /// Records an entry. Returns `false` if the index is not tracked.
    pub fn record(&mut self, entry: VisibilityEntry) -> bool {
        let Some(slot) = self.ratios.get_mut(entry.index) else {
            return false;
        };
        *slot = entry
            .is_intersecting
            .then_some((entry.ratio, self.next_seq));
        self.next_seq += 1;
        true
    }

    /// Returns the last recorded ratio of an intersecting slide.
    #[must_use]
    pub fn ratio(&self, index: usize) -> Option<f64> {
        self.ratios.get(index).copied().flatten().map(|(ratio, _)| ratio)
    }

    /// Returns the intersecting slide with the highest ratio.
    ///
    /// Ties resolve to the slide whose current report was recorded first, so
    /// within one batch the earliest entry wins.
    #[must_use]
    pub fn most_visible(&self) -> Option<usize> {
        let mut best: Option<(usize, f64, u64)> = None;
        for (index, report) in self.ratios.iter().enumerate() {
            let Some((ratio, seq)) = *report else { continue };
            match best {
                Some((_, best_ratio, best_seq))
                    if ratio < best_ratio || (ratio <= best_ratio && seq > best_seq) => {}
                _ => best = Some((index, ratio, seq)),
            }
        }
        best.map(|(index, _, _)| index)
    }
}

/// Entries produced by a single observation pass.
pub type VisibilityBatch = SmallVec<[VisibilityEntry; 4]>;

/// Derives threshold-crossing reports from slide geometry.
///
/// Each slide is assigned a bucket: the number of thresholds its ratio meets
/// or exceeds. A slide is reported when its bucket or its intersecting flag
/// changes. The first observation after creation or [`Self::reset`] reports
/// every slide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThresholdObserver {
    thresholds: Vec<f64>,
    last: Vec<Option<(usize, bool)>>,
}

impl ThresholdObserver {
    /// Creates an observer with ascending `thresholds`.
    #[must_use]
    pub fn new(thresholds: &[f64]) -> Self {
        Self {
            thresholds: thresholds.to_vec(),
            last: Vec::new(),
        }
    }

    /// Forgets previously observed buckets.
    pub fn reset(&mut self) {
        self.last.clear();
    }

    /// Observes `layout` at `scroll_offset` and returns the changed slides in
    /// display order.
    pub fn observe(&mut self, layout: &SlideLayout, scroll_offset: f64) -> VisibilityBatch {
        let len = layout.len();
        self.last.resize(len, None);
        let mut batch = VisibilityBatch::new();
        for index in 0..len {
            let ratio = layout.intersection_ratio(index, scroll_offset);
            let is_intersecting = ratio > 0.0;
            let bucket = self.thresholds.iter().filter(|&&t| ratio >= t).count();
            let current = Some((bucket, is_intersecting));
            if self.last[index] != current {
                self.last[index] = current;
                batch.push(VisibilityEntry::new(index, ratio, is_intersecting));
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::{SlideLayout, ThresholdObserver, VisibilityEntry, VisibilityTracker};

    #[test]
    fn entry_clamps_ratio() {
        assert_eq!(VisibilityEntry::new(0, 1.5, true).ratio, 1.0);
        assert_eq!(VisibilityEntry::new(0, -0.5, true).ratio, 0.0);
        assert_eq!(VisibilityEntry::new(0, f64::NAN, true).ratio, 0.0);
    }

    #[test]
    fn empty_tracker_has_no_winner() {
        let tracker = VisibilityTracker::new(0);
        assert!(tracker.is_empty());
        assert_eq!(tracker.most_visible(), None);
    }

    #[test]
    fn non_intersecting_entries_do_not_compete() {
        let mut tracker = VisibilityTracker::new(2);
        tracker.record(VisibilityEntry::new(0, 0.9, false));
        tracker.record(VisibilityEntry::new(1, 0.1, true));
        assert_eq!(tracker.most_visible(), Some(1));
        assert_eq!(tracker.ratio(0), None);
    }

    #[test]
    fn ties_resolve_to_first_recorded() {
        let mut tracker = VisibilityTracker::new(3);
        tracker.record(VisibilityEntry::new(2, 0.5, true));
        tracker.record(VisibilityEntry::new(1, 0.5, true));
        assert_eq!(tracker.most_visible(), Some(2));

        // A fresh report for slide 2 moves it behind slide 1.
        tracker.record(VisibilityEntry::new(2, 0.5, true));
        assert_eq!(tracker.most_visible(), Some(1));
    }

    #[test]
    fn out_of_range_entries_are_rejected() {
        let mut tracker = VisibilityTracker::new(1);
        assert!(!tracker.record(VisibilityEntry::new(4, 1.0, true)));
        assert_eq!(tracker.most_visible(), None);
    }

    #[test]
    fn reset_forgets_reports() {
        let mut tracker = VisibilityTracker::new(2);
        tracker.record(VisibilityEntry::new(1, 1.0, true));
        tracker.reset(4);
        assert_eq!(tracker.len(), 4);
        assert_eq!(tracker.most_visible(), None);
    }

    #[test]
    fn observer_reports_everything_first_then_only_changes() {
        let layout = SlideLayout::uniform(3, 100.0, 0.0, 0.0, 100.0);
        let mut observer = ThresholdObserver::new(&[0.35, 0.6, 0.75]);

        let first = observer.observe(&layout, 0.0);
        assert_eq!(first.len(), 3);
        assert!(first[0].is_intersecting);
        assert!(!first[1].is_intersecting);

        // Nothing moved.
        assert!(observer.observe(&layout, 0.0).is_empty());

        // Slide 0 drops from 1.0 to 0.9 (same bucket); slide 1 appears at 0.1.
        let batch = observer.observe(&layout, 10.0);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].index, 1);
        assert!(batch[0].is_intersecting);

        // Slide 0 falls below 0.75, slide 1 stays under 0.35.
        let batch = observer.observe(&layout, 30.0);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].index, 0);
    }

    #[test]
    fn observer_reset_reports_everything_again() {
        let layout = SlideLayout::uniform(2, 100.0, 0.0, 0.0, 100.0);
        let mut observer = ThresholdObserver::new(&[0.5]);
        assert_eq!(observer.observe(&layout, 0.0).len(), 2);
        observer.reset();
        assert_eq!(observer.observe(&layout, 0.0).len(), 2);
    }
}
