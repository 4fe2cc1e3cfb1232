// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schedule string codec.
//!
//! Light schedules cross the user/CLI boundary as compact strings, one per
//! curve entry: `"H,M,I,R,G,B,W"` with hour 0-23, minute 0-59 and the five
//! channels 0-100. Internal whitespace is allowed and stripped before
//! validation.
//!
//! Parsing is fail-fast: one malformed string rejects the whole batch with
//! [`ScheduleError::InvalidTimeCurve`] carrying the offending input, so no
//! partial schedule is ever applied and the previously active schedule
//! stays in effect.
//!
//! # Examples
//!
//! ```
//! use aquori_lib::schedule::{parse_timecurves, render_schedule, validate_curve};
//!
//! assert!(validate_curve("12,30,50,60,70,80,90"));
//! assert!(!validate_curve("24,30,50,60,70,80,90"));
//!
//! let curves = parse_timecurves(&["8,0,50,10,20,30,40", "18,30,80,60,70,80,90"]).unwrap();
//! assert_eq!(curves.len(), 2);
//!
//! let rendered = render_schedule(Some(&curves)).unwrap();
//! assert_eq!(rendered["08:00"].intensity, 50);
//! ```

use std::collections::BTreeMap;

use crate::error::ScheduleError;
use crate::types::TimeCurve;

/// Number of comma-separated fields in a curve string.
const FIELD_COUNT: usize = 7;

/// Upper bounds per field position: hour, minute, then five channels.
const FIELD_MAX: [u32; FIELD_COUNT] = [23, 59, 100, 100, 100, 100, 100];

/// Splits a curve string into its validated numeric fields.
///
/// Strips all whitespace first. Returns `None` on any violation: wrong
/// field count, non-digit characters, or out-of-range values.
pub(crate) fn curve_fields(curve: &str) -> Option<[u8; FIELD_COUNT]> {
    let normalized: String = curve.chars().filter(|c| !c.is_whitespace()).collect();

    let mut fields = [0u8; FIELD_COUNT];
    let mut count = 0;
    for part in normalized.split(',') {
        if count == FIELD_COUNT {
            return None;
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value: u32 = part.parse().ok()?;
        if value > FIELD_MAX[count] {
            return None;
        }
        fields[count] = u8::try_from(value).ok()?;
        count += 1;
    }

    (count == FIELD_COUNT).then_some(fields)
}

/// Validates a single time curve string.
///
/// The string must consist of exactly 7 comma-separated nonnegative
/// integers; the hour must be 0-23, the minute 0-59, and the five channel
/// fields 0-100. Whitespace is stripped before validation. Never panics.
#[must_use]
pub fn validate_curve(curve: &str) -> bool {
    curve_fields(curve).is_some()
}

/// Parses time curves from a list of strings.
///
/// Output order matches input order; entries are not sorted, merged or
/// de-duplicated.
///
/// # Errors
///
/// Returns `ScheduleError::InvalidTimeCurve` for the first string that
/// fails validation, carrying that string unmodified. No curves are
/// returned in that case.
pub fn parse_timecurves<S: AsRef<str>>(curves: &[S]) -> Result<Vec<TimeCurve>, ScheduleError> {
    curves.iter().map(|curve| curve.as_ref().parse()).collect()
}

/// Channel levels of one rendered schedule slot, in the device 0-100 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SchedulePoint {
    /// Overall intensity channel.
    pub intensity: u8,
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// White channel.
    pub white: u8,
}

impl From<&TimeCurve> for SchedulePoint {
    fn from(curve: &TimeCurve) -> Self {
        Self {
            intensity: curve.intensity.value(),
            red: curve.red.value(),
            green: curve.green.value(),
            blue: curve.blue.value(),
            white: curve.white.value(),
        }
    }
}

/// Renders stored curve entries into a display mapping keyed by `"HH:MM"`.
///
/// Returns `None` when no schedule is known. Channel values are taken
/// verbatim from the entries and stay in the device 0-100 range.
///
/// Entries sharing the same clock time overwrite earlier ones
/// (last-write-wins); this is the intended collision policy, not an error.
#[must_use]
pub fn render_schedule(
    timecurve: Option<&[TimeCurve]>,
) -> Option<BTreeMap<String, SchedulePoint>> {
    let timecurve = timecurve?;

    let mut schedule = BTreeMap::new();
    for curve in timecurve {
        schedule.insert(curve.clock_label(), SchedulePoint::from(curve));
    }

    Some(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_curve() {
        assert!(validate_curve("12,30,50,60,70,80,90"));
        assert!(validate_curve("0,0,0,0,0,0,0"));
        assert!(validate_curve("23,59,100,100,100,100,100"));
    }

    #[test]
    fn validate_rejects_wrong_field_count() {
        assert!(!validate_curve("12,30,50,60,70,80"));
        assert!(!validate_curve("12,30,50,60,70,80,90,100"));
        assert!(!validate_curve(""));
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        assert!(!validate_curve("24,30,50,60,70,80,90"));
        assert!(!validate_curve("12,60,50,60,70,80,90"));
        assert!(!validate_curve("12,30,101,60,70,80,90"));
        assert!(!validate_curve("12,30,50,60,70,80,101"));
    }

    #[test]
    fn validate_rejects_non_digit_characters() {
        // A sign is not a digit, so negative values fail the pattern.
        assert!(!validate_curve("12,30,-1,60,70,80,90"));
        assert!(!validate_curve("12,30,abc,60,70,80,90"));
        assert!(!validate_curve("12,,50,60,70,80,90"));
    }

    #[test]
    fn validate_rejects_oversized_numbers() {
        assert!(!validate_curve("12,30,99999999999,60,70,80,90"));
    }

    #[test]
    fn parse_preserves_order() {
        let curves =
            parse_timecurves(&["12,30,50,60,70,80,90", "0,0,0,0,0,0,0"]).unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].hour, 12);
        assert_eq!(curves[1].hour, 0);
    }

    #[test]
    fn parse_fails_fast_on_invalid_curve() {
        let err = parse_timecurves(&["12,30,50,60,70,80,90", "99,99,99,99,99,99,99"])
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidTimeCurve {
                curve: "99,99,99,99,99,99,99".to_string()
            }
        );
    }

    #[test]
    fn parse_error_reports_original_unstripped_string() {
        let err = parse_timecurves(&["99, 99, 99, 99, 99, 99, 99"]).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidTimeCurve {
                curve: "99, 99, 99, 99, 99, 99, 99".to_string()
            }
        );
    }

    #[test]
    fn render_none_schedule() {
        assert!(render_schedule(None).is_none());
    }

    #[test]
    fn render_keys_are_zero_padded() {
        let curves = parse_timecurves(&["8,0,50,10,20,30,40"]).unwrap();
        let rendered = render_schedule(Some(&curves)).unwrap();
        let point = &rendered["08:00"];
        assert_eq!(point.intensity, 50);
        assert_eq!(point.red, 10);
        assert_eq!(point.green, 20);
        assert_eq!(point.blue, 30);
        assert_eq!(point.white, 40);
    }

    #[test]
    fn render_last_write_wins_on_duplicate_slot() {
        let curves =
            parse_timecurves(&["8,0,50,10,20,30,40", "8,0,90,0,0,0,0"]).unwrap();
        let rendered = render_schedule(Some(&curves)).unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered["08:00"].intensity, 90);
    }

    #[test]
    fn render_empty_schedule_is_empty_map() {
        let rendered = render_schedule(Some(&[])).unwrap();
        assert!(rendered.is_empty());
    }
}
