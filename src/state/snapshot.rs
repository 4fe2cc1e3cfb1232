// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshot of one Ori device's reported state.

use chrono::{DateTime, Utc};

use crate::types::{
    ChannelLevel, ConnectionStatus, DynamicMode, LightOptions, LightType, OperatingMode,
    PowerState, SensorType, SensorValidity, Thresholds, TimeCurve,
};

/// The externally-owned, periodically-refreshed state record for one
/// physical light/sensor unit.
///
/// The transport populates a snapshot from cloud and push updates; this
/// library only reads it. All dynamic fields are optional because state may
/// not be known until the device reports it. Entity projections are pure
/// functions over a snapshot and never mutate it.
///
/// # Examples
///
/// ```
/// use aquori_lib::state::DeviceSnapshot;
/// use aquori_lib::types::ConnectionStatus;
///
/// let mut snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
/// snapshot.status = ConnectionStatus::Online;
/// assert!(snapshot.status.is_online());
/// assert!(snapshot.intensity.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceSnapshot {
    /// Vendor account device id.
    pub id: String,
    /// Hardware device id.
    pub devid: String,
    /// User-assigned device name.
    pub name: String,
    /// Manufacturer brand string.
    pub brand: String,
    /// Fixture model, when recognized.
    pub light_type: Option<LightType>,

    /// Cloud connectivity status.
    pub status: ConnectionStatus,
    /// Timestamp the device last came online.
    pub online_time: Option<DateTime<Utc>>,

    /// Network MAC address.
    pub mac: String,
    /// Bluetooth MAC address.
    pub bluetooth_mac: Option<String>,
    /// Local IP address.
    pub ip: Option<String>,
    /// Local control port.
    pub port: Option<u16>,
    /// WiFi signal strength in dBm.
    pub rssi: Option<i16>,
    /// WiFi network name.
    pub ssid: Option<String>,

    /// Installed firmware version.
    pub version: Option<String>,
    /// Latest firmware version available from the vendor.
    pub latest_firmware_version: Option<u32>,
    /// Latest firmware file name.
    pub firmware_name: Option<String>,
    /// Latest firmware download URL.
    pub firmware_path: Option<String>,

    /// Light power state.
    pub power: Option<PowerState>,
    /// Operating mode.
    pub mode: Option<OperatingMode>,
    /// Dynamic effect mode.
    pub dynamic_mode: Option<DynamicMode>,
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

    /// Stored schedule, in reported order.
    pub timecurve: Option<Vec<TimeCurve>>,
    /// Custom preset slot 1.
    pub custom1: Option<LightOptions>,
    /// Custom preset slot 2.
    pub custom2: Option<LightOptions>,
    /// Custom preset slot 3.
    pub custom3: Option<LightOptions>,
    /// Custom preset slot 4.
    pub custom4: Option<LightOptions>,

    /// Attached sensor kind.
    pub sensor_type: Option<SensorType>,
    /// Whether sensor readings are currently valid.
    pub sensor_valid: Option<SensorValidity>,
    /// Water temperature in °C.
    pub water_temperature: Option<f32>,
    /// Alerting bounds for the water temperature.
    pub water_temperature_thresholds: Option<Thresholds>,
    /// Whether the vendor app raises notifications for this device.
    pub app_notifications: Option<bool>,
}

impl DeviceSnapshot {
    /// Creates a snapshot with identity fields set and everything else
    /// unknown.
    #[must_use]
    pub fn new(id: &str, devid: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            devid: devid.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Returns the model identifier: the fixture model name when known,
    /// the hardware id otherwise.
    #[must_use]
    pub fn model_id(&self) -> String {
        self.light_type
            .map_or_else(|| self.devid.clone(), |t| t.name().to_string())
    }

    /// Returns the preset stored in the given slot (1-4), if any.
    #[must_use]
    pub fn preset(&self, slot: u8) -> Option<LightOptions> {
        match slot {
            1 => self.custom1,
            2 => self.custom2,
            3 => self.custom3,
            4 => self.custom4,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_snapshot_is_unknown() {
        let snapshot = DeviceSnapshot::new("id", "devid", "name");
        assert_eq!(snapshot.status, ConnectionStatus::Offline);
        assert!(snapshot.power.is_none());
        assert!(snapshot.mode.is_none());
        assert!(snapshot.timecurve.is_none());
        assert!(snapshot.water_temperature.is_none());
    }

    #[test]
    fn model_id_prefers_light_type() {
        let mut snapshot = DeviceSnapshot::new("id", "ORI001", "name");
        assert_eq!(snapshot.model_id(), "ORI001");

        snapshot.light_type = Some(LightType::RgbwUltra);
        assert_eq!(snapshot.model_id(), "RGBW_ULTRA");
    }

    #[test]
    fn preset_slots() {
        let mut snapshot = DeviceSnapshot::new("id", "devid", "name");
        let preset = LightOptions::new().with_intensity(ChannelLevel::MAX);
        snapshot.custom2 = Some(preset);

        assert_eq!(snapshot.preset(2), Some(preset));
        assert!(snapshot.preset(1).is_none());
        assert!(snapshot.preset(5).is_none());
    }
}
