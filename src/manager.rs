// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of known devices.
//!
//! The transport registers one [`Device`] per unit the account can see;
//! entity setup and services look devices up here. The registry does not
//! manage connections — that belongs to the transport.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::device::Device;

/// Registry of the devices known to one account session.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use aquori_lib::command::{CommandSink, DeviceCommand};
/// use aquori_lib::error::DispatchError;
/// use aquori_lib::state::DeviceSnapshot;
/// use aquori_lib::{Device, DeviceRegistry};
///
/// struct NullSink;
///
/// impl CommandSink for NullSink {
///     fn dispatch(&self, _devid: &str, _command: DeviceCommand) -> Result<(), DispatchError> {
///         Ok(())
///     }
/// }
///
/// let registry = DeviceRegistry::new();
/// let snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
/// registry.add(Arc::new(Device::new(snapshot, Arc::new(NullSink))));
///
/// assert_eq!(registry.devices().len(), 1);
/// assert!(registry.find("device123").is_some());
/// ```
#[derive(Default)]
pub struct DeviceRegistry {
    devices: RwLock<Vec<Arc<Device>>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device.
    pub fn add(&self, device: Arc<Device>) {
        info!(id = %device.id(), devid = %device.devid(), "registering device");
        self.devices.write().push(device);
    }

    /// Returns all registered devices, in registration order.
    #[must_use]
    pub fn devices(&self) -> Vec<Arc<Device>> {
        self.devices.read().clone()
    }

    /// Looks up a device by its vendor account id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<Arc<Device>> {
        self.devices
            .read()
            .iter()
            .find(|device| device.id() == id)
            .cloned()
    }
}
