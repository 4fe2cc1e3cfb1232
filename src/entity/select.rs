// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Select entities for the mode flags.
//!
//! Two selects: operating mode and dynamic mode. The dynamic mode select
//! is only available in manual operation, since automatic mode overrides
//! the dynamic flag anyway.

use std::sync::Arc;

use tracing::info;

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::error::Result;
use crate::state::DeviceSnapshot;
use crate::types::{DynamicMode, OperatingMode};

/// Description of one select entity.
#[derive(Debug, Clone, Copy)]
pub struct SelectDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
    /// Selectable option names.
    pub options: &'static [&'static str],
    /// Reads the current option from a snapshot.
    pub current_fn: fn(&DeviceSnapshot) -> Option<&'static str>,
    /// Parses and dispatches a selected option.
    pub select_fn: fn(&Device, &str) -> Result<()>,
}

/// Select entity descriptions.
pub const DESCRIPTIONS: &[SelectDescription] = &[
    SelectDescription {
        entity: EntityDescription::new("dynamic_mode")
            .available_when(|s| s.mode == Some(OperatingMode::Manual)),
        options: &["OFF", "ON"],
        current_fn: |s| s.dynamic_mode.map(DynamicMode::as_str),
        select_fn: |device, option| device.set_dynamic_mode(option.parse()?),
    },
    SelectDescription {
        entity: EntityDescription::new("mode"),
        options: &["MANUAL", "AUTOMATIC"],
        current_fn: |s| s.mode.map(OperatingMode::as_str),
        select_fn: |device, option| device.set_mode(option.parse()?),
    },
];

/// The projected select entity for one device.
pub struct Select {
    device: Arc<Device>,
    description: &'static SelectDescription,
}

impl Select {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static SelectDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Returns the selectable option names.
    #[must_use]
    pub const fn options(&self) -> &'static [&'static str] {
        self.description.options
    }

    /// Returns the currently selected option.
    #[must_use]
    pub fn current_option(&self) -> Option<&'static str> {
        (self.description.current_fn)(&self.device.snapshot())
    }

    /// Changes the selected option.
    ///
    /// # Errors
    ///
    /// Returns a `ValueError` for unknown options, or a dispatch error if
    /// the transport cannot deliver the command.
    pub fn select_option(&self, option: &str) -> Result<()> {
        info!(
            key = self.description.entity.key,
            option,
            devid = %self.device.devid(),
            "changing select"
        );
        (self.description.select_fn)(&self.device, option)
    }
}

impl Entity for Select {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }
}

/// Builds select entities for every supported device/description pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<Select> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| Select::new(device.clone(), description))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandSink, DeviceCommand};
    use crate::error::DispatchError;
    use crate::types::ConnectionStatus;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<DeviceCommand>>,
    }

    impl CommandSink for RecordingSink {
        fn dispatch(&self, _devid: &str, command: DeviceCommand) -> std::result::Result<(), DispatchError> {
            self.calls.lock().push(command);
            Ok(())
        }
    }

    fn device(sink: Arc<RecordingSink>) -> Arc<Device> {
        let mut snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
        snapshot.status = ConnectionStatus::Online;
        snapshot.mode = Some(OperatingMode::Manual);
        snapshot.dynamic_mode = Some(DynamicMode::Off);
        Arc::new(Device::new(snapshot, sink))
    }

    fn find<'a>(selects: &'a [Select], key: &str) -> &'a Select {
        selects
            .iter()
            .find(|s| s.description().key == key)
            .unwrap_or_else(|| panic!("no select {key}"))
    }

    #[test]
    fn current_options_reflect_snapshot() {
        let selects = setup(&[device(Arc::default())]);
        assert_eq!(find(&selects, "mode").current_option(), Some("MANUAL"));
        assert_eq!(find(&selects, "dynamic_mode").current_option(), Some("OFF"));
    }

    #[test]
    fn current_option_unknown_when_unreported() {
        let d = device(Arc::default());
        d.update(|s| s.mode = None);
        let selects = setup(&[d]);
        assert_eq!(find(&selects, "mode").current_option(), None);
    }

    #[test]
    fn selecting_mode_dispatches_command() {
        let sink = Arc::new(RecordingSink::default());
        let selects = setup(&[device(sink.clone())]);

        find(&selects, "mode").select_option("AUTOMATIC").unwrap();

        assert_eq!(
            sink.calls.lock()[0],
            DeviceCommand::SetMode(OperatingMode::Automatic)
        );
    }

    #[test]
    fn selecting_dynamic_mode_dispatches_command() {
        let sink = Arc::new(RecordingSink::default());
        let selects = setup(&[device(sink.clone())]);

        find(&selects, "dynamic_mode").select_option("ON").unwrap();

        assert_eq!(
            sink.calls.lock()[0],
            DeviceCommand::SetDynamicMode(DynamicMode::On)
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let sink = Arc::new(RecordingSink::default());
        let selects = setup(&[device(sink.clone())]);

        assert!(find(&selects, "mode").select_option("TURBO").is_err());
        assert!(sink.calls.lock().is_empty());
    }

    #[test]
    fn dynamic_mode_unavailable_in_automatic() {
        let d = device(Arc::default());
        let selects = setup(&[d.clone()]);
        assert!(find(&selects, "dynamic_mode").available());
        assert!(find(&selects, "mode").available());

        d.update(|s| s.mode = Some(OperatingMode::Automatic));
        assert!(!find(&selects, "dynamic_mode").available());
        assert!(find(&selects, "mode").available());
    }
}
