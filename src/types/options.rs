// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light channel options and sensor thresholds.

use crate::types::ChannelLevel;

/// A partial set of light channel values.
///
/// Used both as the payload of a set-light command (only the channels that
/// are present are changed) and as the stored custom preset slots on the
/// device.
///
/// # Examples
///
/// ```
/// use aquori_lib::types::{ChannelLevel, LightOptions};
///
/// let options = LightOptions::new()
///     .with_intensity(ChannelLevel::new(80).unwrap())
///     .with_red(ChannelLevel::new(10).unwrap());
///
/// assert_eq!(options.intensity.unwrap().value(), 80);
/// assert!(options.green.is_none());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub struct LightOptions {
    /// Overall intensity channel.
    pub intensity: Option<ChannelLevel>,
    /// Red channel.
    pub red: Option<ChannelLevel>,
    /// Green channel.
    pub green: Option<ChannelLevel>,
    /// Blue channel.
    pub blue: Option<ChannelLevel>,
    /// White channel.
    pub white: Option<ChannelLevel>,
}

impl LightOptions {
    /// Creates an empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the intensity channel.
    #[must_use]
    pub const fn with_intensity(mut self, level: ChannelLevel) -> Self {
        self.intensity = Some(level);
        self
    }

    /// Sets the red channel.
    #[must_use]
    pub const fn with_red(mut self, level: ChannelLevel) -> Self {
        self.red = Some(level);
        self
    }

    /// Sets the green channel.
    #[must_use]
    pub const fn with_green(mut self, level: ChannelLevel) -> Self {
        self.green = Some(level);
        self
    }

    /// Sets the blue channel.
    #[must_use]
    pub const fn with_blue(mut self, level: ChannelLevel) -> Self {
        self.blue = Some(level);
        self
    }

    /// Sets the white channel.
    #[must_use]
    pub const fn with_white(mut self, level: ChannelLevel) -> Self {
        self.white = Some(level);
        self
    }

    /// Returns `true` if no channel is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.intensity.is_none()
            && self.red.is_none()
            && self.green.is_none()
            && self.blue.is_none()
            && self.white.is_none()
    }
}

/// Alerting bounds for a sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Thresholds {
    /// Lower bound, inclusive.
    pub min_value: f32,
    /// Upper bound, inclusive.
    pub max_value: f32,
}

impl Thresholds {
    /// Creates a new threshold pair.
    #[must_use]
    pub const fn new(min_value: f32, max_value: f32) -> Self {
        Self {
            min_value,
            max_value,
        }
    }

    /// Returns `true` if the reading is within bounds, inclusive.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_is_empty() {
        assert!(LightOptions::new().is_empty());
    }

    #[test]
    fn options_builder() {
        let options = LightOptions::new()
            .with_intensity(ChannelLevel::MAX)
            .with_white(ChannelLevel::MIN);
        assert!(!options.is_empty());
        assert_eq!(options.intensity, Some(ChannelLevel::MAX));
        assert_eq!(options.white, Some(ChannelLevel::MIN));
        assert!(options.red.is_none());
    }

    #[test]
    fn thresholds_contains_is_inclusive() {
        let bounds = Thresholds::new(20.0, 30.0);
        assert!(bounds.contains(20.0));
        assert!(bounds.contains(25.0));
        assert!(bounds.contains(30.0));
        assert!(!bounds.contains(19.9));
        assert!(!bounds.contains(30.1));
    }
}
