// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Time curve type for scheduled lighting.
//!
//! A time curve is one scheduled time-of-day lighting configuration: a
//! 24-hour clock time plus the five channel levels the light ramps to at
//! that time. A schedule is an ordered sequence of time curves; the codec
//! enforces no ordering or uniqueness between entries.
//!
//! The compact text form is `"H,M,I,R,G,B,W"`; see
//! [`schedule`](crate::schedule) for the list-level codec.

use std::fmt;
use std::str::FromStr;

use crate::error::{ScheduleError, ValueError};
use crate::schedule;
use crate::types::ChannelLevel;

/// Highest valid hour field.
const LAST_HOUR: u8 = 23;

/// Highest valid minute field.
const LAST_MINUTE: u8 = 59;

/// One scheduled lighting configuration.
///
/// # Examples
///
/// ```
/// use aquori_lib::types::TimeCurve;
///
/// // Parse the compact text form; internal whitespace is ignored.
/// let curve: TimeCurve = "8, 0, 50, 10, 20, 30, 40".parse().unwrap();
/// assert_eq!(curve.hour, 8);
/// assert_eq!(curve.intensity.value(), 50);
///
/// // Invalid strings report the offending input.
/// assert!("24,0,0,0,0,0,0".parse::<TimeCurve>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeCurve {
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub minute: u8,
    /// Overall intensity channel.
    pub intensity: ChannelLevel,
    /// Red channel.
    pub red: ChannelLevel,
    /// Green channel.
    pub green: ChannelLevel,
    /// Blue channel.
    pub blue: ChannelLevel,
    /// White channel.
    pub white: ChannelLevel,
}

impl TimeCurve {
    /// Creates a new time curve.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if hour exceeds 23 or minute
    /// exceeds 59. Channel levels are range-checked at their own
    /// construction.
    pub fn new(
        hour: u8,
        minute: u8,
        intensity: ChannelLevel,
        red: ChannelLevel,
        green: ChannelLevel,
        blue: ChannelLevel,
        white: ChannelLevel,
    ) -> Result<Self, ValueError> {
        if hour > LAST_HOUR {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(LAST_HOUR),
                actual: u16::from(hour),
            });
        }
        if minute > LAST_MINUTE {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: u16::from(LAST_MINUTE),
                actual: u16::from(minute),
            });
        }
        Ok(Self {
            hour,
            minute,
            intensity,
            red,
            green,
            blue,
            white,
        })
    }

    /// Returns the `"HH:MM"` clock label for this curve, zero-padded.
    #[must_use]
    pub fn clock_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl fmt::Display for TimeCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.hour,
            self.minute,
            self.intensity.value(),
            self.red.value(),
            self.green.value(),
            self.blue.value(),
            self.white.value()
        )
    }
}

impl FromStr for TimeCurve {
    type Err = ScheduleError;

    /// Parses the compact `"H,M,I,R,G,B,W"` form.
    ///
    /// All whitespace is stripped before validation. The error carries the
    /// input exactly as provided.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = schedule::curve_fields(s).ok_or_else(|| ScheduleError::InvalidTimeCurve {
            curve: s.to_string(),
        })?;

        Ok(Self {
            hour: fields[0],
            minute: fields[1],
            intensity: ChannelLevel::clamped(fields[2]),
            red: ChannelLevel::clamped(fields[3]),
            green: ChannelLevel::clamped(fields[4]),
            blue: ChannelLevel::clamped(fields[5]),
            white: ChannelLevel::clamped(fields[6]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: u8) -> ChannelLevel {
        ChannelLevel::new(value).unwrap()
    }

    #[test]
    fn new_validates_clock_fields() {
        assert!(
            TimeCurve::new(23, 59, level(0), level(0), level(0), level(0), level(0)).is_ok()
        );
        assert!(
            TimeCurve::new(24, 0, level(0), level(0), level(0), level(0), level(0)).is_err()
        );
        assert!(
            TimeCurve::new(0, 60, level(0), level(0), level(0), level(0), level(0)).is_err()
        );
    }

    #[test]
    fn parse_positional_mapping() {
        let curve: TimeCurve = "12,30,50,60,70,80,90".parse().unwrap();
        assert_eq!(curve.hour, 12);
        assert_eq!(curve.minute, 30);
        assert_eq!(curve.intensity.value(), 50);
        assert_eq!(curve.red.value(), 60);
        assert_eq!(curve.green.value(), 70);
        assert_eq!(curve.blue.value(), 80);
        assert_eq!(curve.white.value(), 90);
    }

    #[test]
    fn parse_strips_whitespace() {
        let curve: TimeCurve = " 8 , 0 , 50 , 10 , 20 , 30 , 40 ".parse().unwrap();
        assert_eq!(curve.hour, 8);
        assert_eq!(curve.white.value(), 40);
    }

    #[test]
    fn parse_error_carries_input() {
        let err = "99,99,99,99,99,99,99".parse::<TimeCurve>().unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidTimeCurve {
                curve: "99,99,99,99,99,99,99".to_string()
            }
        );
    }

    #[test]
    fn display_round_trips() {
        let curve: TimeCurve = "18,30,80,60,70,80,90".parse().unwrap();
        assert_eq!(curve.to_string(), "18,30,80,60,70,80,90");
        assert_eq!(curve.to_string().parse::<TimeCurve>().unwrap(), curve);
    }

    #[test]
    fn clock_label_is_zero_padded() {
        let curve: TimeCurve = "8,5,0,0,0,0,0".parse().unwrap();
        assert_eq!(curve.clock_label(), "08:05");
    }
}
