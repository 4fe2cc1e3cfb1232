// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary sensor entities.
//!
//! Connectivity plus the water temperature alert. The connectivity sensor
//! handles availability locally so it stays available while the device is
//! offline — that is the state it exists to report.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::state::DeviceSnapshot;
use crate::types::{SensorType, SensorValidity};

/// Semantic class of a binary sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySensorDeviceClass {
    /// On means connected.
    Connectivity,
    /// On means a problem is detected.
    Problem,
}

/// Description of one binary sensor entity.
#[derive(Debug, Clone, Copy)]
pub struct BinarySensorDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
    /// Semantic class of the sensor.
    pub device_class: BinarySensorDeviceClass,
    /// Produces the current on/off state from a snapshot.
    pub value_fn: fn(&DeviceSnapshot) -> bool,
}

fn temperature_out_of_bounds(snapshot: &DeviceSnapshot) -> bool {
    match (
        snapshot.water_temperature_thresholds,
        snapshot.water_temperature,
    ) {
        (Some(bounds), Some(reading)) => !bounds.contains(reading),
        // Missing bounds or reading counts as a problem.
        _ => true,
    }
}

fn temperature_problem_attributes(snapshot: &DeviceSnapshot) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(
        "water_temperature".to_string(),
        snapshot.water_temperature.map_or(Value::Null, Value::from),
    );
    attributes.insert(
        "min_value".to_string(),
        snapshot
            .water_temperature_thresholds
            .map_or(Value::Null, |b| Value::from(b.min_value)),
    );
    attributes.insert(
        "max_value".to_string(),
        snapshot
            .water_temperature_thresholds
            .map_or(Value::Null, |b| Value::from(b.max_value)),
    );
    attributes.insert(
        "app_notifications".to_string(),
        snapshot.app_notifications.map_or(Value::Null, Value::from),
    );
    attributes
}

/// Binary sensor entity descriptions.
pub const DESCRIPTIONS: &[BinarySensorDescription] = &[
    BinarySensorDescription {
        entity: EntityDescription::new("status").diagnostic(),
        device_class: BinarySensorDeviceClass::Connectivity,
        value_fn: |s| s.status.is_online(),
    },
    BinarySensorDescription {
        entity: EntityDescription::new("water_temperature_problem")
            .disabled_by_default()
            .available_when(|s| {
                s.status.is_online()
                    && s.sensor_valid == Some(SensorValidity::Valid)
                    && s.water_temperature_thresholds.is_some()
            })
            .supported_when(|s| {
                s.sensor_type == Some(SensorType::Temperature)
                    && s.water_temperature_thresholds.is_some()
            })
            .with_attributes(temperature_problem_attributes),
        device_class: BinarySensorDeviceClass::Problem,
        value_fn: temperature_out_of_bounds,
    },
];

/// The projected binary sensor entity for one device.
pub struct BinarySensor {
    device: Arc<Device>,
    description: &'static BinarySensorDescription,
}

impl BinarySensor {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static BinarySensorDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Returns true if the binary sensor is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        (self.description.value_fn)(&self.device.snapshot())
    }

    /// Returns the full binary sensor description.
    #[must_use]
    pub const fn sensor_description(&self) -> &'static BinarySensorDescription {
        self.description
    }
}

impl Entity for BinarySensor {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }

    /// Availability is handled per description so the connectivity sensor
    /// stays available while the device is offline.
    fn available(&self) -> bool {
        (self.description.entity.available_fn)(&self.device.snapshot())
    }
}

/// Builds binary sensor entities for every supported device/description
/// pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<BinarySensor> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| BinarySensor::new(device.clone(), description))
        })
        .collect()
}
