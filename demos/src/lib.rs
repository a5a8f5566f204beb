// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.

use understory_carousel::ScrollCarousel;

/// Renders the carousel's pagination as one line, bracketing the active dot.
#[must_use]
pub fn render_dots(carousel: &ScrollCarousel) -> String {
    carousel
        .pagination()
        .map(|dot| {
            if dot.is_current {
                format!("[{dot}]")
            } else {
                dot.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
