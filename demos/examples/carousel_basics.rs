// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel basics.
//!
//! Drive a `ScrollCarousel` through a scripted session: the user drags the
//! strip, clicks a pagination dot while the animation reports intermediate
//! offsets, then keeps navigating with the arrow keys.
//!
//! Run:
//! - `cargo run -p understory_demos --example carousel_basics`
//! - `RUST_LOG=understory_carousel=trace cargo run -p understory_demos --example carousel_basics`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_carousel::{
    CarouselConfig, CarouselEvent, KeyOutcome, ScrollCarousel, ScrollRequest, SlideLayout,
};
use understory_demos::render_dots;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Four 640px slides with a 24px gap and 16px spacers in a 900px viewport.
    let layout = SlideLayout::uniform(4, 640.0, 24.0, 16.0, 900.0);
    let mut carousel = ScrollCarousel::with_layout(layout, CarouselConfig::default());
    carousel.subscribe(|event| match event {
        CarouselEvent::ActiveIndexChanged {
            previous,
            current,
            source,
        } => println!("  active {previous} -> {current} ({source:?})"),
        CarouselEvent::PhaseChanged(phase) => println!("  phase {phase:?}"),
        CarouselEvent::SnapChanged(on) => println!("  snap {}", if *on { "on" } else { "off" }),
        CarouselEvent::ScrollRequested(ScrollRequest { offset, behavior }) => {
            println!("  scroll to {offset:.0}px ({behavior:?})");
        }
    });

    println!("user drags the strip left by 500px");
    carousel.pointer_down(Point::new(800.0, 200.0));
    carousel.pointer_move(Point::new(300.0, 204.0));
    carousel.pointer_up();
    print_dots(&carousel);

    let mut now = 1_000;
    println!("user clicks the last dot at t={now}");
    let request = carousel.scroll_to_index(3, now);

    // The smooth scroll reports intermediate offsets every 100ms.
    if let Some(request) = request {
        let start = carousel.scroll_offset();
        for step in 1..=4_u8 {
            now += 100;
            let progress = f64::from(step) / 4.0;
            carousel.tick(now);
            carousel.on_user_scroll(start + (request.offset - start) * progress);
        }
    }
    print_dots(&carousel);

    now = carousel.next_deadline().unwrap_or(now);
    println!("settle deadline reached at t={now}");
    carousel.tick(now);

    carousel.set_focused(true);
    for key in ["ArrowLeft", "ArrowLeft", "Tab"] {
        now += 50;
        match carousel.handle_key(key, now) {
            KeyOutcome::Handled(_) => println!("{key}: handled"),
            KeyOutcome::Ignored => println!("{key}: ignored"),
        }
    }
    print_dots(&carousel);

    let pending = carousel.unmount();
    println!("unmounted (pending settle cancelled: {pending})");
}

fn print_dots(carousel: &ScrollCarousel) {
    println!("  dots: {}", render_dots(carousel));
}
