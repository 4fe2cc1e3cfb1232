// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode and dynamic mode types.
//!
//! An Ori light carries two independent mode flags:
//!
//! - [`OperatingMode`]: whether the light follows its stored schedule
//!   (`Automatic`) or direct channel settings (`Manual`).
//! - [`DynamicMode`]: whether the built-in dynamic effect is running.
//!
//! The flags combine into the user-facing effect label; see
//! [`LightEffect`](crate::entity::light::LightEffect) for the projection
//! and its precedence rules.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode of an Ori light.
///
/// # Examples
///
/// ```
/// use aquori_lib::types::OperatingMode;
///
/// assert_eq!(OperatingMode::Manual.as_str(), "MANUAL");
/// assert_eq!("AUTOMATIC".parse::<OperatingMode>().unwrap(), OperatingMode::Automatic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OperatingMode {
    /// Channels are driven directly by commands.
    Manual,
    /// Channels follow the stored time curve schedule.
    Automatic,
}

impl OperatingMode {
    /// Returns the option name used by select surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Automatic => "AUTOMATIC",
        }
    }

    /// Returns the numeric value used in device payloads.
    #[must_use]
    pub const fn as_num(self) -> u8 {
        match self {
            Self::Manual => 0,
            Self::Automatic => 1,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MANUAL" | "0" => Ok(Self::Manual),
            "AUTOMATIC" | "1" => Ok(Self::Automatic),
            _ => Err(ValueError::InvalidMode(s.to_string())),
        }
    }
}

/// Dynamic effect mode of an Ori light.
///
/// # Examples
///
/// ```
/// use aquori_lib::types::DynamicMode;
///
/// assert_eq!(DynamicMode::On.as_str(), "ON");
/// assert_eq!("OFF".parse::<DynamicMode>().unwrap(), DynamicMode::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DynamicMode {
    /// Dynamic effect is not running.
    Off,
    /// Dynamic effect is running.
    On,
}

impl DynamicMode {
    /// Returns the option name used by select surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Returns the numeric value used in device payloads.
    #[must_use]
    pub const fn as_num(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl fmt::Display for DynamicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DynamicMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" | "0" => Ok(Self::Off),
            "ON" | "1" => Ok(Self::On),
            _ => Err(ValueError::InvalidDynamicMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operating_mode_round_trip() {
        for mode in [OperatingMode::Manual, OperatingMode::Automatic] {
            assert_eq!(mode.as_str().parse::<OperatingMode>().unwrap(), mode);
        }
    }

    #[test]
    fn operating_mode_invalid() {
        assert!("TURBO".parse::<OperatingMode>().is_err());
    }

    #[test]
    fn dynamic_mode_round_trip() {
        for mode in [DynamicMode::Off, DynamicMode::On] {
            assert_eq!(mode.as_str().parse::<DynamicMode>().unwrap(), mode);
        }
    }

    #[test]
    fn mode_payload_values() {
        assert_eq!(OperatingMode::Manual.as_num(), 0);
        assert_eq!(OperatingMode::Automatic.as_num(), 1);
        assert_eq!(DynamicMode::Off.as_num(), 0);
        assert_eq!(DynamicMode::On.as_num(), 1);
    }
}
