// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor entities.
//!
//! One measurement sensor (water temperature, when a probe is attached)
//! plus a set of network diagnostics. Diagnostic sensors are disabled by
//! default, matching how rarely they are looked at.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::state::DeviceSnapshot;
use crate::types::{SensorType, SensorValidity};

/// Degrees Celsius.
pub const UNIT_CELSIUS: &str = "°C";

/// Signal strength in decibel-milliwatts.
pub const UNIT_DBM: &str = "dBm";

/// Semantic class of a sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDeviceClass {
    /// Temperature in a native temperature unit.
    Temperature,
    /// Radio signal strength.
    SignalStrength,
    /// Point in time.
    Timestamp,
}

/// Statistics handling of a sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorStateClass {
    /// Current measurement, suitable for long-term statistics.
    Measurement,
}

/// A single sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorValue {
    /// Free-form text value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f32),
    /// Timestamp value.
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

/// Description of one sensor entity.
#[derive(Debug, Clone, Copy)]
pub struct SensorDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
    /// Semantic class of the reading.
    pub device_class: Option<SensorDeviceClass>,
    /// Statistics handling of the reading.
    pub state_class: Option<SensorStateClass>,
    /// Native unit of the reading.
    pub unit: Option<&'static str>,
    /// Produces the current reading from a snapshot.
    pub value_fn: fn(&DeviceSnapshot) -> Option<SensorValue>,
}

fn sensor_is_valid(snapshot: &DeviceSnapshot) -> bool {
    snapshot.sensor_valid == Some(SensorValidity::Valid)
}

fn ip_attributes(snapshot: &DeviceSnapshot) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(
        "port".to_string(),
        snapshot
            .port
            .map_or(Value::Null, |port| Value::String(port.to_string())),
    );
    attributes
}

/// Sensor entity descriptions.
pub const DESCRIPTIONS: &[SensorDescription] = &[
    // Regular sensors
    SensorDescription {
        entity: EntityDescription::new("water_temperature")
            .available_when(sensor_is_valid)
            .supported_when(|s| s.sensor_type == Some(SensorType::Temperature))
            .enabled_default_when(|s| sensor_is_valid(s) && s.water_temperature.is_some()),
        device_class: Some(SensorDeviceClass::Temperature),
        state_class: Some(SensorStateClass::Measurement),
        unit: Some(UNIT_CELSIUS),
        value_fn: |s| s.water_temperature.map(SensorValue::Float),
    },
    // Diagnostic sensors
    SensorDescription {
        entity: EntityDescription::new("bluetooth_mac")
            .diagnostic()
            .disabled_by_default(),
        device_class: None,
        state_class: None,
        unit: None,
        value_fn: |s| s.bluetooth_mac.clone().map(SensorValue::Text),
    },
    SensorDescription {
        entity: EntityDescription::new("ip")
            .diagnostic()
            .disabled_by_default()
            .with_attributes(ip_attributes),
        device_class: None,
        state_class: None,
        unit: None,
        value_fn: |s| s.ip.clone().map(SensorValue::Text),
    },
    SensorDescription {
        entity: EntityDescription::new("mac")
            .diagnostic()
            .disabled_by_default(),
        device_class: None,
        state_class: None,
        unit: None,
        value_fn: |s| Some(SensorValue::Text(s.mac.clone())),
    },
    SensorDescription {
        entity: EntityDescription::new("rssi")
            .diagnostic()
            .disabled_by_default(),
        device_class: Some(SensorDeviceClass::SignalStrength),
        state_class: Some(SensorStateClass::Measurement),
        unit: Some(UNIT_DBM),
        value_fn: |s| s.rssi.map(|v| SensorValue::Int(v.into())),
    },
    SensorDescription {
        entity: EntityDescription::new("ssid")
            .diagnostic()
            .disabled_by_default(),
        device_class: None,
        state_class: None,
        unit: None,
        value_fn: |s| s.ssid.clone().map(SensorValue::Text),
    },
    SensorDescription {
        entity: EntityDescription::new("uptime")
            .diagnostic()
            .disabled_by_default(),
        device_class: Some(SensorDeviceClass::Timestamp),
        state_class: None,
        unit: None,
        value_fn: |s| s.online_time.map(SensorValue::Timestamp),
    },
];

/// The projected sensor entity for one device.
pub struct Sensor {
    device: Arc<Device>,
    description: &'static SensorDescription,
}

impl Sensor {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static SensorDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Returns the current reading.
    #[must_use]
    pub fn native_value(&self) -> Option<SensorValue> {
        (self.description.value_fn)(&self.device.snapshot())
    }

    /// Returns the full sensor description.
    #[must_use]
    pub const fn sensor_description(&self) -> &'static SensorDescription {
        self.description
    }
}

impl Entity for Sensor {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }
}

/// Builds sensor entities for every supported device/description pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<Sensor> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| Sensor::new(device.clone(), description))
        })
        .collect()
}
