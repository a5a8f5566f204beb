// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Point;
use tracing::{debug, trace};

use crate::{
    CarouselConfig, CarouselEvent, ChangeSource, ConfigError, DragScroll, ListenerId, Listeners,
    NavigationKey, Phase, ScrollBehavior, ScrollRequest, SettleTimer, SlideLayout,
    ThresholdObserver, VisibilityEntry, VisibilityTracker,
};

/// The carousel's observable state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CarouselState {
    active_index: usize,
    is_programmatic_scroll: bool,
    snap_enabled: bool,
    revision: u64,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            active_index: 0,
            is_programmatic_scroll: false,
            snap_enabled: true,
            revision: 0,
        }
    }
}

impl CarouselState {
    /// The slide considered current for indicators and relative navigation.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// `true` while a programmatic scroll is in flight.
    #[must_use]
    pub fn is_programmatic_scroll(&self) -> bool {
        self.is_programmatic_scroll
    }

    /// Whether native scroll snapping should be applied to the viewport.
    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    /// Monotonic counter bumped by every operation that changed this state.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The arbitration phase implied by [`Self::is_programmatic_scroll`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_programmatic_scroll {
            Phase::Navigating
        } else {
            Phase::Idle
        }
    }
}

/// Result of feeding a key to [`ScrollCarousel::handle_key`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    /// The key was not consumed; the host should apply its default behavior.
    Ignored,
    /// The key was consumed. The host should suppress its default behavior
    /// and apply the scroll request, if any.
    Handled(Option<ScrollRequest>),
}

/// One pagination indicator.
///
/// The `Display` impl renders the indicator's accessible label.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaginationDot {
    /// Slide this indicator jumps to.
    pub index: usize,
    /// Whether this is the active slide.
    pub is_current: bool,
}

impl fmt::Display for PaginationDot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Go to slide {}", self.index + 1)
    }
}

/// A horizontally scrolling strip of slides with one authoritative active
/// index.
///
/// Two sources update the active index: visibility reports (user scrolling)
/// and navigation calls (buttons, indicators, keys). Navigation enters
/// [`Phase::Navigating`], turns snapping off and arms a settle deadline; until
/// that deadline passes in [`Self::tick`], visibility reports are dropped so a
/// passing slide cannot overwrite the navigation target mid-animation.
#[derive(Debug)]
pub struct ScrollCarousel {
    slide_count: usize,
    state: CarouselState,
    config: CarouselConfig,
    layout: SlideLayout,
    visibility: VisibilityTracker,
    observer: ThresholdObserver,
    settle: SettleTimer,
    drag: DragScroll,
    scroll_offset: f64,
    focused: bool,
    listeners: Listeners,
}

impl ScrollCarousel {
    /// Mounts a carousel over `slide_count` slides with no layout yet.
    ///
    /// The active index starts at `0`, snapping is on, and visibility reports
    /// are authoritative.
    #[must_use]
    pub fn new(slide_count: usize, config: CarouselConfig) -> Self {
        Self::with_layout(SlideLayout::new(slide_count, 0.0), config)
    }

    /// Mounts a carousel over the slides described by `layout`.
    ///
    /// A `config` that fails [`CarouselConfig::validate`] is replaced by
    /// [`CarouselConfig::default`]. Use [`Self::try_with_layout`] to surface
    /// the error instead.
    #[must_use]
    pub fn with_layout(layout: SlideLayout, config: CarouselConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(error) => {
                debug!(%error, "invalid carousel config, using defaults");
                CarouselConfig::default()
            }
        };
        Self::mount(layout, config)
    }

    /// Mounts a carousel over `slide_count` slides, rejecting an invalid
    /// `config`.
    pub fn try_new(slide_count: usize, config: CarouselConfig) -> Result<Self, ConfigError> {
        Self::try_with_layout(SlideLayout::new(slide_count, 0.0), config)
    }

    /// Mounts a carousel over the slides described by `layout`, rejecting an
    /// invalid `config`.
    pub fn try_with_layout(
        layout: SlideLayout,
        config: CarouselConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::mount(layout, config))
    }

    fn mount(layout: SlideLayout, config: CarouselConfig) -> Self {
        let slide_count = layout.len();
        debug!(slide_count, "mounting carousel");
        Self {
            slide_count,
            state: CarouselState::default(),
            observer: ThresholdObserver::new(config.thresholds()),
            visibility: VisibilityTracker::new(slide_count),
            config,
            layout,
            settle: SettleTimer::new(),
            drag: DragScroll::default(),
            scroll_offset: 0.0,
            focused: false,
            listeners: Listeners::new(),
        }
    }

    /// Tears the carousel down.
    ///
    /// Cancels the pending settle deadline and detaches all listeners. Taking
    /// `self` guarantees no report or timer can reach the carousel afterwards.
    /// Returns `true` if a settle deadline was still pending.
    pub fn unmount(mut self) -> bool {
        let cancelled = self.settle.cancel();
        let listeners = self.listeners.len();
        self.listeners.clear();
        self.visibility.reset(0);
        debug!(cancelled, listeners, "unmounting carousel");
        cancelled
    }

    /// Number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Active slide index.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    /// Current arbitration phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Whether native snapping should be on.
    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.state.snap_enabled
    }

    /// The configuration this carousel was mounted with.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Current slide geometry.
    #[must_use]
    pub fn layout(&self) -> &SlideLayout {
        &self.layout
    }

    /// Mutable access for feeding measurements after layout.
    ///
    /// Changing the number of slides here does not change [`Self::slide_count`];
    /// use [`Self::set_slide_count`] for that.
    pub fn layout_mut(&mut self) -> &mut SlideLayout {
        &mut self.layout
    }

    /// Replaces the slide geometry, keeping the slide count.
    pub fn set_layout(&mut self, mut layout: SlideLayout) {
        layout.set_len(self.slide_count);
        self.layout = layout;
        self.observer.reset();
        self.scroll_offset = self.layout.clamp_scroll_offset(self.scroll_offset);
    }

    /// Changes the number of slides.
    ///
    /// Visibility is re-observed from scratch and the active index is clamped
    /// into the new range.
    pub fn set_slide_count(&mut self, slide_count: usize) {
        if slide_count == self.slide_count {
            return;
        }
        debug!(from = self.slide_count, to = slide_count, "slide count changed");
        self.slide_count = slide_count;
        self.layout.set_len(slide_count);
        self.visibility.reset(slide_count);
        self.observer.reset();
        let clamped = self.state.active_index.min(slide_count.saturating_sub(1));
        if self.set_active(clamped, ChangeSource::SlideCount) {
            self.bump_revision();
        }
    }

    /// Registers a callback for state changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&CarouselEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Tells the carousel whether its viewport has keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the viewport has keyboard focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Records one visibility report.
    ///
    /// See [`Self::report_visibility_batch`].
    pub fn report_visibility(&mut self, entry: VisibilityEntry) -> bool {
        self.report_visibility_batch(core::iter::once(entry))
    }

    /// Records a batch of visibility reports, then picks the active slide.
    ///
    /// Among all slides currently intersecting, the one with the highest ratio
    /// becomes active. While a programmatic scroll is in flight the pick is
    /// skipped; it is not replayed later. Returns `true` if the active index
    /// changed.
    pub fn report_visibility_batch(
        &mut self,
        entries: impl IntoIterator<Item = VisibilityEntry>,
    ) -> bool {
        for entry in entries {
            if !self.visibility.record(entry) {
                trace!(index = entry.index, "ignoring report for unknown slide");
            }
        }
        if self.state.is_programmatic_scroll {
            trace!("dropping visibility update during programmatic scroll");
            return false;
        }
        let Some(most_visible) = self.visibility.most_visible() else {
            return false;
        };
        let changed = self.set_active(most_visible, ChangeSource::Visibility);
        if changed {
            self.bump_revision();
        }
        changed
    }

    /// Smoothly scrolls to slide `target`, clamped to the valid range.
    ///
    /// The active index switches to the target immediately. Snapping stays off
    /// and visibility reports stay suppressed until the settle delay after the
    /// most recent call has elapsed. Returns the scroll the host must perform,
    /// or `None` if there are no slides or the target has not been measured.
    pub fn scroll_to_index(&mut self, target: usize, now: u64) -> Option<ScrollRequest> {
        if self.slide_count == 0 {
            return None;
        }
        let target = target.min(self.slide_count - 1);
        if self.settle.cancel() {
            debug!(index = target, "restarting programmatic scroll");
        }

        let mut changed = self.set_programmatic(true);
        changed |= self.set_snap(false);

        let request = self.layout.scroll_target(target).map(|offset| ScrollRequest {
            offset,
            behavior: ScrollBehavior::Smooth,
        });
        match request {
            Some(request) => self.emit(CarouselEvent::ScrollRequested(request)),
            None => debug!(index = target, "slide not measured, skipping scroll"),
        }

        changed |= self.set_active(target, ChangeSource::Navigation);
        self.settle.arm(now, self.config.settle_delay_ms());
        if changed {
            self.bump_revision();
        }
        request
    }

    /// Scrolls to the next slide, staying on the last one at the end.
    pub fn next(&mut self, now: u64) -> Option<ScrollRequest> {
        if self.slide_count == 0 {
            return None;
        }
        let target = (self.state.active_index + 1).min(self.slide_count - 1);
        self.scroll_to_index(target, now)
    }

    /// Scrolls to the previous slide, staying on the first one at the start.
    pub fn previous(&mut self, now: u64) -> Option<ScrollRequest> {
        if self.slide_count == 0 {
            return None;
        }
        self.scroll_to_index(self.state.active_index.saturating_sub(1), now)
    }

    /// Handles a key by its W3C `KeyboardEvent.key` name.
    ///
    /// `"ArrowRight"` moves forward and `"ArrowLeft"` moves back. Other keys,
    /// keys received without focus, and keys on an empty carousel are ignored.
    pub fn handle_key(&mut self, key: &str, now: u64) -> KeyOutcome {
        match NavigationKey::from_key_name(key) {
            Some(key) => self.handle_navigation_key(key, now),
            None => KeyOutcome::Ignored,
        }
    }

    /// Typed variant of [`Self::handle_key`].
    pub fn handle_navigation_key(&mut self, key: NavigationKey, now: u64) -> KeyOutcome {
        if !self.focused || self.slide_count == 0 {
            trace!(?key, focused = self.focused, "ignoring navigation key");
            return KeyOutcome::Ignored;
        }
        let request = match key {
            NavigationKey::ArrowLeft => self.previous(now),
            NavigationKey::ArrowRight => self.next(now),
        };
        KeyOutcome::Handled(request)
    }

    /// Advances time. Fires the settle deadline when `now` has reached it.
    ///
    /// Returns `true` if the carousel settled back to [`Phase::Idle`].
    pub fn tick(&mut self, now: u64) -> bool {
        if !self.settle.poll(now) {
            return false;
        }
        self.settle_now();
        true
    }

    /// Settles immediately, for hosts that can observe the end of a smooth
    /// scroll directly. Returns `false` if nothing was pending.
    pub fn finish_programmatic_scroll(&mut self) -> bool {
        if !self.settle.cancel() {
            return false;
        }
        self.settle_now();
        true
    }

    /// When the host should next call [`Self::tick`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.settle.deadline()
    }

    /// Last scroll offset reported by the host or produced by a drag.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Reports the viewport's scroll offset after native or animated scrolling.
    ///
    /// Visibility is derived from the layout using the configured thresholds
    /// and fed through [`Self::report_visibility_batch`]. Hosts that already
    /// have an intersection service should call that directly instead.
    /// Returns `true` if the active index changed.
    pub fn on_user_scroll(&mut self, offset: f64) -> bool {
        self.scroll_offset = self.layout.clamp_scroll_offset(offset);
        let batch = self.observer.observe(&self.layout, self.scroll_offset);
        if batch.is_empty() {
            return false;
        }
        self.report_visibility_batch(batch)
    }

    /// Starts a drag-to-scroll gesture.
    pub fn pointer_down(&mut self, pos: Point) {
        self.drag.start(pos, self.scroll_offset);
    }

    /// Continues a drag. Returns the clamped offset the viewport should jump
    /// to, or `None` when no drag is active.
    pub fn pointer_move(&mut self, pos: Point) -> Option<f64> {
        let offset = self.layout.clamp_scroll_offset(self.drag.update(pos)?);
        self.on_user_scroll(offset);
        Some(offset)
    }

    /// Ends a drag-to-scroll gesture.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Whether [`Self::previous`] would move.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.state.active_index > 0
    }

    /// Whether [`Self::next`] would move.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.state.active_index + 1 < self.slide_count
    }

    /// One indicator per slide, in display order.
    pub fn pagination(&self) -> impl Iterator<Item = PaginationDot> {
        let active = self.state.active_index;
        (0..self.slide_count).map(move |index| PaginationDot {
            index,
            is_current: index == active,
        })
    }

    fn settle_now(&mut self) {
        let mut changed = self.set_snap(true);
        changed |= self.set_programmatic(false);
        if changed {
            self.bump_revision();
        }
    }

    fn set_active(&mut self, index: usize, source: ChangeSource) -> bool {
        let previous = self.state.active_index;
        if previous == index {
            return false;
        }
        self.state.active_index = index;
        self.emit(CarouselEvent::ActiveIndexChanged {
            previous,
            current: index,
            source,
        });
        true
    }

    fn set_programmatic(&mut self, on: bool) -> bool {
        if self.state.is_programmatic_scroll == on {
            return false;
        }
        self.state.is_programmatic_scroll = on;
        let phase = self.state.phase();
        debug!(?phase, "carousel phase changed");
        self.emit(CarouselEvent::PhaseChanged(phase));
        true
    }

    fn set_snap(&mut self, on: bool) -> bool {
        if self.state.snap_enabled == on {
            return false;
        }
        self.state.snap_enabled = on;
        self.emit(CarouselEvent::SnapChanged(on));
        true
    }

    fn bump_revision(&mut self) {
        self.state.revision += 1;
    }

    fn emit(&mut self, event: CarouselEvent) {
        self.listeners.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::{PaginationDot, ScrollCarousel};
    use crate::{CarouselConfig, Phase, SlideLayout};

    #[test]
    fn mounts_idle_at_first_slide() {
        let carousel = ScrollCarousel::new(4, CarouselConfig::default());
        let state = carousel.state();
        assert_eq!(state.active_index(), 0);
        assert!(!state.is_programmatic_scroll());
        assert!(state.snap_enabled());
        assert_eq!(state.revision(), 0);
        assert_eq!(carousel.phase(), Phase::Idle);
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn revision_bumps_once_per_changing_operation() {
        let layout = SlideLayout::uniform(3, 100.0, 0.0, 0.0, 100.0);
        let mut carousel = ScrollCarousel::with_layout(layout, CarouselConfig::default());
        carousel.scroll_to_index(2, 0);
        assert_eq!(carousel.state().revision(), 1);
        // Same target while navigating changes nothing observable.
        carousel.scroll_to_index(2, 10);
        assert_eq!(carousel.state().revision(), 1);
        carousel.tick(1_000);
        assert_eq!(carousel.state().revision(), 2);
    }

    #[test]
    fn finish_programmatic_scroll_settles_early() {
        let mut carousel = ScrollCarousel::new(3, CarouselConfig::default());
        assert!(!carousel.finish_programmatic_scroll());
        carousel.scroll_to_index(1, 0);
        assert!(carousel.finish_programmatic_scroll());
        assert_eq!(carousel.phase(), Phase::Idle);
        assert!(carousel.snap_enabled());
        assert!(!carousel.tick(10_000));
    }

    #[test]
    fn shrinking_slide_count_clamps_active_index() {
        let mut carousel = ScrollCarousel::new(5, CarouselConfig::default());
        carousel.scroll_to_index(4, 0);
        carousel.set_slide_count(2);
        assert_eq!(carousel.active_index(), 1);
        assert_eq!(carousel.layout().len(), 2);
        carousel.set_slide_count(0);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn pagination_marks_active_slide_and_labels_dots() {
        let mut carousel = ScrollCarousel::new(3, CarouselConfig::default());
        carousel.scroll_to_index(1, 0);
        let dots: Vec<PaginationDot> = carousel.pagination().collect();
        assert_eq!(dots.len(), 3);
        assert!(dots[1].is_current);
        assert!(!dots[0].is_current && !dots[2].is_current);
        assert_eq!(dots[2].to_string(), "Go to slide 3");
        assert!(carousel.can_go_previous());
        assert!(carousel.can_go_next());
    }

    #[test]
    fn unmount_reports_pending_settle() {
        let mut carousel = ScrollCarousel::new(2, CarouselConfig::default());
        carousel.subscribe(|_| {});
        carousel.next(0);
        assert!(carousel.unmount());

        let idle = ScrollCarousel::new(2, CarouselConfig::default());
        assert!(!idle.unmount());
    }
}
