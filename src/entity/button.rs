// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Button entities for custom preset recall.
//!
//! The device stores four user presets. Pressing a button turns the light
//! on with the stored channels; the preset contents are exposed as state
//! attributes so the user can see what a press will do.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::error::{DeviceError, Result};
use crate::state::DeviceSnapshot;
use crate::types::{LightOptions, PowerState};

/// Description of one button entity.
#[derive(Debug, Clone, Copy)]
pub struct ButtonDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
    /// Reads the preset recalled by this button from a snapshot.
    pub preset_fn: fn(&DeviceSnapshot) -> Option<LightOptions>,
}

fn preset_attributes(preset: Option<LightOptions>) -> Map<String, Value> {
    let mut attributes = Map::new();
    for (key, level) in [
        ("intensity", preset.and_then(|p| p.intensity)),
        ("red", preset.and_then(|p| p.red)),
        ("green", preset.and_then(|p| p.green)),
        ("blue", preset.and_then(|p| p.blue)),
        ("white", preset.and_then(|p| p.white)),
    ] {
        attributes.insert(
            key.to_string(),
            level.map_or(Value::Null, |l| Value::from(l.value())),
        );
    }
    attributes
}

/// Button entity descriptions, one per preset slot.
pub const DESCRIPTIONS: &[ButtonDescription] = &[
    ButtonDescription {
        entity: EntityDescription::new("custom1")
            .with_attributes(|s| preset_attributes(s.custom1)),
        preset_fn: |s| s.custom1,
    },
    ButtonDescription {
        entity: EntityDescription::new("custom2")
            .with_attributes(|s| preset_attributes(s.custom2)),
        preset_fn: |s| s.custom2,
    },
    ButtonDescription {
        entity: EntityDescription::new("custom3")
            .with_attributes(|s| preset_attributes(s.custom3)),
        preset_fn: |s| s.custom3,
    },
    ButtonDescription {
        entity: EntityDescription::new("custom4")
            .with_attributes(|s| preset_attributes(s.custom4)),
        preset_fn: |s| s.custom4,
    },
];

/// The projected button entity for one device.
pub struct Button {
    device: Arc<Device>,
    description: &'static ButtonDescription,
}

impl Button {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static ButtonDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Handles the button press: turns the light on with the stored
    /// preset.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::MissingPreset` if the slot is empty, or a
    /// dispatch error if the transport cannot deliver the command.
    pub fn press(&self) -> Result<()> {
        info!(
            key = self.description.entity.key,
            devid = %self.device.devid(),
            "pressing button"
        );

        let preset = (self.description.preset_fn)(&self.device.snapshot()).ok_or_else(|| {
            DeviceError::MissingPreset {
                key: self.description.entity.key.to_string(),
            }
        })?;

        self.device.set_light(PowerState::On, preset)
    }
}

impl Entity for Button {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }
}

/// Builds button entities for every supported device/description pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<Button> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| Button::new(device.clone(), description))
        })
        .collect()
}
