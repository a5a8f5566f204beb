// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation keys.

/// Keys the carousel responds to while its viewport has focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    /// Move to the previous slide.
    ArrowLeft,
    /// Move to the next slide.
    ArrowRight,
}

impl NavigationKey {
    /// Maps a W3C `KeyboardEvent.key` name to a navigation key.
    ///
    /// Names are matched exactly; `"ArrowUp"`, `"Enter"` and everything else
    /// map to `None`.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationKey;

    #[test]
    fn maps_only_horizontal_arrows() {
        assert_eq!(
            NavigationKey::from_key_name("ArrowLeft"),
            Some(NavigationKey::ArrowLeft)
        );
        assert_eq!(
            NavigationKey::from_key_name("ArrowRight"),
            Some(NavigationKey::ArrowRight)
        );
        assert_eq!(NavigationKey::from_key_name("ArrowUp"), None);
        assert_eq!(NavigationKey::from_key_name("arrowright"), None);
        assert_eq!(NavigationKey::from_key_name(""), None);
    }
}
