// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_carousel --heading-base-level=0

//! Understory Carousel: headless state for scroll-snap carousels.
//!
//! A carousel here is a horizontally scrollable viewport over `N` slides with
//! previous/next buttons, pagination indicators and arrow-key navigation. The
//! interesting part is arbitration: two sources want to decide which slide is
//! "active".
//!
//! - **Visibility reports** arrive while the user scrolls natively and name
//!   the slide that currently shows the most of itself.
//! - **Navigation calls** (buttons, indicators, keys) ask the viewport to
//!   smooth-scroll to a slide and expect that slide to be active right away.
//!
//! [`ScrollCarousel`] keeps one authoritative active index. Navigation switches
//! it immediately, turns native snapping off so it does not fight the
//! animation, and drops visibility reports until a settle delay has elapsed.
//! Because there is no portable "smooth scroll finished" signal, the settle
//! delay is a plain deadline on a caller-supplied clock, fired from
//! [`ScrollCarousel::tick`].
//!
//! The crate does not own any widgets or rendering. Callers are expected to:
//! - Measure slides and feed a [`SlideLayout`].
//! - Forward intersection reports as [`VisibilityEntry`] values, or report raw
//!   scroll offsets and let [`ThresholdObserver`] derive them.
//! - Apply returned [`ScrollRequest`]s and toggle native snapping from
//!   [`ScrollCarousel::snap_enabled`].
//! - Call [`ScrollCarousel::tick`] at or after [`ScrollCarousel::next_deadline`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_carousel::{CarouselConfig, Phase, ScrollCarousel, SlideLayout, VisibilityEntry};
//!
//! // Three 600px slides with a 24px gap in an 800px viewport.
//! let layout = SlideLayout::uniform(3, 600.0, 24.0, 16.0, 800.0);
//! let mut carousel = ScrollCarousel::with_layout(layout, CarouselConfig::default());
//!
//! // Pagination click on the last slide at t = 1000ms.
//! let request = carousel.scroll_to_index(2, 1_000).unwrap();
//! assert_eq!(carousel.active_index(), 2);
//! assert_eq!(carousel.phase(), Phase::Navigating);
//! assert!(!carousel.snap_enabled());
//! assert!(request.offset > 0.0);
//!
//! // The animation passes slide 1; its report is dropped.
//! carousel.report_visibility(VisibilityEntry::new(1, 0.8, true));
//! assert_eq!(carousel.active_index(), 2);
//!
//! // Once the settle delay has elapsed, reports drive the index again.
//! assert!(carousel.tick(1_000 + carousel.config().settle_delay_ms()));
//! assert!(carousel.snap_enabled());
//! carousel.report_visibility(VisibilityEntry::new(1, 0.9, true));
//! assert_eq!(carousel.active_index(), 1);
//! ```
//!
//! ## Listening for changes
//!
//! Hosts that re-render on change can subscribe instead of polling state:
//!
//! ```rust
//! use understory_carousel::{CarouselConfig, CarouselEvent, ScrollCarousel};
//!
//! let mut carousel = ScrollCarousel::new(4, CarouselConfig::default());
//! carousel.subscribe(|event| {
//!     if let CarouselEvent::ActiveIndexChanged { current, .. } = event {
//!         // Re-render pagination with `current` highlighted.
//!         let _ = current;
//!     }
//! });
//! carousel.set_focused(true);
//! carousel.handle_key("ArrowRight", 0);
//! assert_eq!(carousel.active_index(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics are emitted through
//! `tracing` at `debug` and `trace` levels.

#![no_std]

extern crate alloc;

mod carousel;
mod config;
mod drag;
mod events;
mod keys;
mod layout;
mod settle;
mod visibility;

pub use carousel::{CarouselState, KeyOutcome, PaginationDot, ScrollCarousel};
pub use config::{CarouselConfig, ConfigError, DEFAULT_SETTLE_DELAY_MS, DEFAULT_THRESHOLDS};
pub use drag::DragScroll;
pub use events::{
    CarouselEvent, ChangeSource, ListenerId, Listeners, Phase, ScrollBehavior, ScrollRequest,
};
pub use keys::NavigationKey;
pub use layout::{LayoutError, SlideLayout};
pub use settle::SettleTimer;
pub use visibility::{ThresholdObserver, VisibilityBatch, VisibilityEntry, VisibilityTracker};
