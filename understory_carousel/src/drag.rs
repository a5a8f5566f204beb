// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-scroll helper: turn horizontal pointer movement into scroll offsets.
//!
//! ## Usage
//!
//! 1) On pointer down, call [`DragScroll::start`] with the pointer position and
//!    the viewport's current scroll offset.
//! 2) On each move, call [`DragScroll::update`] to get the scroll offset that
//!    keeps the content under the pointer.
//! 3) On pointer up or cancel, call [`DragScroll::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::DragScroll;
//!
//! let mut drag = DragScroll::default();
//! drag.start(Point::new(300.0, 40.0), 100.0);
//!
//! // Dragging left by 50px scrolls the content right by 50px.
//! assert_eq!(drag.update(Point::new(250.0, 45.0)), Some(150.0));
//! ```

use kurbo::Point;

/// Tracks a horizontal drag over the carousel viewport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DragScroll {
    start_pos: Option<Point>,
    start_offset: f64,
    last_pos: Option<Point>,
}

impl DragScroll {
    /// Starts a drag at `pos` while the viewport is scrolled to `scroll_offset`.
    pub fn start(&mut self, pos: Point, scroll_offset: f64) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.start_offset = scroll_offset;
    }

    /// Updates the drag with a new pointer position.
    ///
    /// Returns the unclamped scroll offset implied by the total horizontal
    /// movement since [`Self::start`], or `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<f64> {
        let start = self.start_pos?;
        self.last_pos = Some(pos);
        Some(self.start_offset - (pos - start).x)
    }

    /// Horizontal movement between the start and the last update.
    #[must_use]
    pub fn total_delta(&self) -> Option<f64> {
        Some((self.last_pos? - self.start_pos?).x)
    }

    /// Ends the current drag and resets state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::DragScroll;

    #[test]
    fn new_drag_is_idle() {
        let mut drag = DragScroll::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.total_delta(), None);
    }

    #[test]
    fn offsets_follow_total_horizontal_movement() {
        let mut drag = DragScroll::default();
        drag.start(Point::new(100.0, 0.0), 20.0);

        assert_eq!(drag.update(Point::new(90.0, 3.0)), Some(30.0));
        assert_eq!(drag.update(Point::new(130.0, -7.0)), Some(-10.0));
        assert_eq!(drag.total_delta(), Some(30.0));
    }

    #[test]
    fn end_resets_state() {
        let mut drag = DragScroll::default();
        drag.start(Point::new(5.0, 5.0), 0.0);
        drag.end();
        assert!(!drag.is_dragging());
        assert_eq!(drag, DragScroll::default());
    }

    #[test]
    fn start_overwrites_previous_drag() {
        let mut drag = DragScroll::default();
        drag.start(Point::new(0.0, 0.0), 0.0);
        drag.update(Point::new(-40.0, 0.0));

        drag.start(Point::new(200.0, 0.0), 40.0);
        assert_eq!(drag.update(Point::new(190.0, 0.0)), Some(50.0));
    }
}
