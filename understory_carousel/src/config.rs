// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel configuration: settle delay and visibility thresholds.

use alloc::vec::Vec;
use core::fmt;

/// Default settle delay after a programmatic scroll, in milliseconds.
///
/// Long enough for a typical smooth-scroll animation to finish.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 450;

/// Default intersection thresholds used when observing slides.
pub const DEFAULT_THRESHOLDS: [f64; 3] = [0.35, 0.6, 0.75];

/// Tunables for a [`ScrollCarousel`](crate::ScrollCarousel).
///
/// The defaults match a full-width, snap-aligned strip of slides. Hosts that
/// register their own intersection observer should use [`Self::thresholds`]
/// as the observer's ratio buckets so the carousel sees the same updates the
/// built-in [`ThresholdObserver`](crate::ThresholdObserver) would produce.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselConfig {
    settle_delay_ms: u64,
    thresholds: Vec<f64>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

impl CarouselConfig {
    /// Creates a configuration with the default settle delay and thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the settle delay in milliseconds.
    #[must_use]
    pub fn settle_delay_ms(&self) -> u64 {
        self.settle_delay_ms
    }

    /// Returns the intersection thresholds, sorted ascending.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Sets the settle delay.
    ///
    /// A zero delay would re-enable observer updates in the same instant a
    /// programmatic scroll starts, so it is rejected.
    pub fn with_settle_delay_ms(mut self, delay_ms: u64) -> Result<Self, ConfigError> {
        if delay_ms == 0 {
            return Err(ConfigError::ZeroSettleDelay);
        }
        self.settle_delay_ms = delay_ms;
        Ok(self)
    }

    /// Sets the intersection thresholds.
    ///
    /// Thresholds must be finite and lie in `[0, 1]`. They are sorted and
    /// de-duplicated before being stored.
    pub fn with_thresholds(
        mut self,
        thresholds: impl IntoIterator<Item = f64>,
    ) -> Result<Self, ConfigError> {
        let mut values = Vec::new();
        for value in thresholds {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange(value));
            }
            values.push(value);
        }
        if values.is_empty() {
            return Err(ConfigError::NoThresholds);
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        self.thresholds = values;
        Ok(self)
    }

    /// Checks a configuration that was built without the validating setters,
    /// for example one deserialized from a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_delay_ms == 0 {
            return Err(ConfigError::ZeroSettleDelay);
        }
        if self.thresholds.is_empty() {
            return Err(ConfigError::NoThresholds);
        }
        if let Some(&bad) = self
            .thresholds
            .iter()
            .find(|t| !t.is_finite() || !(0.0..=1.0).contains(*t))
        {
            return Err(ConfigError::ThresholdOutOfRange(bad));
        }
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnsortedThresholds);
        }
        Ok(())
    }
}

/// Error returned when a [`CarouselConfig`] value is rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The settle delay was zero.
    ZeroSettleDelay,
    /// No thresholds were supplied.
    NoThresholds,
    /// A threshold was non-finite or outside `[0, 1]`.
    ThresholdOutOfRange(f64),
    /// Thresholds were not strictly ascending.
    UnsortedThresholds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSettleDelay => write!(f, "settle delay must be greater than zero"),
            Self::NoThresholds => write!(f, "at least one visibility threshold is required"),
            Self::ThresholdOutOfRange(value) => {
                write!(f, "visibility threshold {value} is outside [0, 1]")
            }
            Self::UnsortedThresholds => {
                write!(f, "visibility thresholds must be strictly ascending")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
