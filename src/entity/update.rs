// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware update entity.
//!
//! Tracks the installed firmware against the latest version the vendor
//! publishes. Installation itself happens through the vendor app; the
//! entity only surfaces the versions and the download location.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::state::DeviceSnapshot;

/// Semantic class of an update entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDeviceClass {
    /// Device firmware update.
    Firmware,
}

/// Description of one update entity.
#[derive(Debug, Clone, Copy)]
pub struct UpdateDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
    /// Semantic class of the update.
    pub device_class: UpdateDeviceClass,
}

fn firmware_attributes(snapshot: &DeviceSnapshot) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(
        "filename".to_string(),
        snapshot
            .firmware_name
            .clone()
            .map_or(Value::Null, Value::String),
    );
    attributes.insert(
        "download_url".to_string(),
        snapshot
            .firmware_path
            .clone()
            .map_or(Value::Null, Value::String),
    );
    attributes
}

/// Update entity descriptions.
pub const DESCRIPTIONS: &[UpdateDescription] = &[UpdateDescription {
    entity: EntityDescription::new("firmware").with_attributes(firmware_attributes),
    device_class: UpdateDeviceClass::Firmware,
}];

/// The projected update entity for one device.
pub struct Update {
    device: Arc<Device>,
    description: &'static UpdateDescription,
}

impl Update {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static UpdateDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Version installed and in use.
    #[must_use]
    pub fn installed_version(&self) -> Option<String> {
        self.device.snapshot().version
    }

    /// Latest version available for install.
    #[must_use]
    pub fn latest_version(&self) -> Option<String> {
        self.device
            .snapshot()
            .latest_firmware_version
            .map(|v| v.to_string())
    }

    /// Returns true if a newer firmware is available.
    #[must_use]
    pub fn update_available(&self) -> bool {
        match (self.installed_version(), self.latest_version()) {
            (Some(installed), Some(latest)) => installed != latest,
            _ => false,
        }
    }

    /// Returns the full update description.
    #[must_use]
    pub const fn update_description(&self) -> &'static UpdateDescription {
        self.description
    }
}

impl Entity for Update {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }
}

/// Builds update entities for every supported device/description pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<Update> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| Update::new(device.clone(), description))
        })
        .collect()
}
