// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Number entities for direct channel adjustment.
//!
//! One entity per channel, in the device 0-100 range. Only meaningful in
//! plain manual operation: in automatic mode or with the dynamic effect
//! running the firmware owns the channels, so the entities go unavailable.

use std::sync::Arc;

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::error::Result;
use crate::state::DeviceSnapshot;
use crate::types::{ChannelLevel, DynamicMode, OperatingMode};

/// Description of one number entity.
#[derive(Debug, Clone, Copy)]
pub struct NumberDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
    /// Lowest settable value.
    pub min_value: u8,
    /// Highest settable value.
    pub max_value: u8,
    /// Adjustment step.
    pub step: u8,
    /// Reads the current channel value from a snapshot.
    pub value_fn: fn(&DeviceSnapshot) -> Option<u8>,
    /// Dispatches a new channel value to the device.
    pub set_fn: fn(&Device, ChannelLevel) -> Result<()>,
}

fn channels_adjustable(snapshot: &DeviceSnapshot) -> bool {
    snapshot.mode == Some(OperatingMode::Manual)
        && snapshot.dynamic_mode == Some(DynamicMode::Off)
}

const fn channel_description(key: &'static str) -> EntityDescription {
    EntityDescription::new(key)
        .disabled_by_default()
        .available_when(channels_adjustable)
}

/// Number entity descriptions, one per channel.
pub const DESCRIPTIONS: &[NumberDescription] = &[
    NumberDescription {
        entity: channel_description("intensity"),
        min_value: 0,
        max_value: 100,
        step: 1,
        value_fn: |s| s.intensity.map(ChannelLevel::value),
        set_fn: |device, level| device.set_intensity(level),
    },
    NumberDescription {
        entity: channel_description("red"),
        min_value: 0,
        max_value: 100,
        step: 1,
        value_fn: |s| s.red.map(ChannelLevel::value),
        set_fn: |device, level| device.set_red(level),
    },
    NumberDescription {
        entity: channel_description("green"),
        min_value: 0,
        max_value: 100,
        step: 1,
        value_fn: |s| s.green.map(ChannelLevel::value),
        set_fn: |device, level| device.set_green(level),
    },
    NumberDescription {
        entity: channel_description("blue"),
        min_value: 0,
        max_value: 100,
        step: 1,
        value_fn: |s| s.blue.map(ChannelLevel::value),
        set_fn: |device, level| device.set_blue(level),
    },
    NumberDescription {
        entity: channel_description("white"),
        min_value: 0,
        max_value: 100,
        step: 1,
        value_fn: |s| s.white.map(ChannelLevel::value),
        set_fn: |device, level| device.set_white(level),
    },
];

/// The projected number entity for one device.
pub struct Number {
    device: Arc<Device>,
    description: &'static NumberDescription,
}

impl Number {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static NumberDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Returns the current channel value.
    #[must_use]
    pub fn native_value(&self) -> Option<u8> {
        (self.description.value_fn)(&self.device.snapshot())
    }

    /// Sets a new channel value.
    ///
    /// # Errors
    ///
    /// Returns a `ValueError` for values above 100, or a dispatch error if
    /// the transport cannot deliver the command.
    pub fn set_native_value(&self, value: u8) -> Result<()> {
        let level = ChannelLevel::new(value)?;
        (self.description.set_fn)(&self.device, level)
    }

    /// Returns the full number description.
    #[must_use]
    pub const fn number_description(&self) -> &'static NumberDescription {
        self.description
    }
}

impl Entity for Number {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }
}

/// Builds number entities for every supported device/description pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<Number> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| Number::new(device.clone(), description))
        })
        .collect()
}
