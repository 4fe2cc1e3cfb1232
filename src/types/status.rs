// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connectivity and sensor status types.

use std::fmt;

/// Connectivity status of a device as reported by the vendor cloud.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum ConnectionStatus {
    /// Device is not reachable.
    #[default]
    Offline,
    /// Device is reachable and reporting state.
    Online,
}

impl ConnectionStatus {
    /// Returns `true` if the device is online.
    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Offline => "offline",
            Self::Online => "online",
        };
        write!(f, "{s}")
    }
}

/// Kind of environmental sensor attached to the light fixture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum SensorType {
    /// No sensor attached.
    #[default]
    None,
    /// Water temperature probe.
    Temperature,
}

/// Whether the attached sensor is currently delivering valid readings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum SensorValidity {
    /// Readings are stale or the probe is disconnected.
    #[default]
    Invalid,
    /// Readings are current.
    Valid,
}

/// Hardware model of the light fixture.
///
/// Used as the model identifier in device registry projections; unknown
/// models fall back to the raw hardware id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LightType {
    /// Standard four-channel RGBW fixture.
    Rgbw,
    /// High-output RGBW fixture.
    RgbwUltra,
}

impl LightType {
    /// Returns the model name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgbw => "RGBW",
            Self::RgbwUltra => "RGBW_ULTRA",
        }
    }
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
