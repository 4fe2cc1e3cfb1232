// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel level type for light output control.
//!
//! This module provides a type-safe representation of channel values
//! (intensity, red, green, blue, white), ensuring values are always within
//! the device range of 0-100%.
//!
//! Smart-home platforms address light channels in an 8-bit range (0-255);
//! the Ori device expects percentages (0-100). [`ChannelLevel::from_wire`]
//! and [`ChannelLevel::to_wire`] carry this conversion.
//!
//! # Rounding policy
//!
//! Both conversion directions round half-to-even (banker's rounding). The
//! two directions are not exact inverses: 10% maps back to 26, not 25, and
//! a full round trip may drift by up to one scaling step. That drift is
//! expected, not a bug.

use std::fmt;

use crate::error::ValueError;

/// Scales `value * num / den`, rounding half-to-even.
// Truncation is safe: callers only scale into [0, 255].
#[allow(clippy::cast_possible_truncation)]
const fn scale(value: u16, num: u32, den: u32) -> u8 {
    let n = value as u32 * num;
    let q = n / den;
    let r = n % den;
    if 2 * r > den || (2 * r == den && q % 2 == 1) {
        (q + 1) as u8
    } else {
        q as u8
    }
}

/// Light channel level as a percentage (0-100).
///
/// The Ori device uses 0-100 for all five light channels, where 0 is off
/// and 100 is full output.
///
/// # Examples
///
/// ```
/// use aquori_lib::types::ChannelLevel;
///
/// // Create a channel level at 75%
/// let level = ChannelLevel::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// // Use predefined values
/// assert_eq!(ChannelLevel::MIN.value(), 0);
/// assert_eq!(ChannelLevel::MAX.value(), 100);
///
/// // Invalid values return error
/// assert!(ChannelLevel::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ChannelLevel(u8);

impl ChannelLevel {
    /// Minimum channel level (0%).
    pub const MIN: Self = Self(0);

    /// Maximum channel level (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new channel level.
    ///
    /// # Arguments
    ///
    /// * `value` - The channel percentage (0-100)
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    ///
    /// # Examples
    ///
    /// ```
    /// use aquori_lib::types::ChannelLevel;
    ///
    /// let level = ChannelLevel::new(50).unwrap();
    /// assert_eq!(level.value(), 50);
    /// ```
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a channel level, clamping to the valid range.
    ///
    /// Values above 100 are clamped to 100.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Converts an 8-bit wire value (0-255) into a channel level.
    ///
    /// Rounds half-to-even; see the module documentation.
    ///
    /// # Examples
    ///
    /// ```
    /// use aquori_lib::types::ChannelLevel;
    ///
    /// assert_eq!(ChannelLevel::from_wire(128).value(), 50);
    /// assert_eq!(ChannelLevel::from_wire(255).value(), 100);
    /// ```
    #[must_use]
    pub const fn from_wire(value: u8) -> Self {
        Self(scale(value as u16, 100, 255))
    }

    /// Converts this channel level into the 8-bit wire range (0-255).
    ///
    /// Rounds half-to-even; see the module documentation.
    ///
    /// # Examples
    ///
    /// ```
    /// use aquori_lib::types::ChannelLevel;
    ///
    /// let level = ChannelLevel::new(80).unwrap();
    /// assert_eq!(level.to_wire(), 204);
    /// ```
    #[must_use]
    pub const fn to_wire(self) -> u8 {
        scale(self.0 as u16, 255, 100)
    }

    /// Returns the channel percentage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ChannelLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for ChannelLevel {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
