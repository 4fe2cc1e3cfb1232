// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aquori Lib - A Rust library to adapt Aquatlantis Ori aquarium lights to
//! smart-home entity models.
//!
//! This library projects the reported state of Ori light/sensor units into
//! typed smart-home entities (light, sensors, binary sensors, numbers,
//! selects, buttons, firmware update) and encodes the commands those
//! entities send back. The network transport (HTTP/MQTT client,
//! authentication, reconnection) is not part of this crate: commands leave
//! through the [`command::CommandSink`] seam, and the transport refreshes
//! device snapshots through [`Device::update`].
//!
//! # Supported Features
//!
//! - **Light control**: power, effects (manual/automatic/dynamic), RGBW
//!   channels with wire-range (0-255) to device-range (0-100) scaling
//! - **Schedules**: compact curve string parsing/validation and `"HH:MM"`
//!   display rendering
//! - **Presets**: four custom preset recall buttons
//! - **Monitoring**: water temperature with threshold alerting, network
//!   diagnostics, firmware version tracking
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use aquori_lib::command::{CommandSink, DeviceCommand};
//! use aquori_lib::entity::light;
//! use aquori_lib::error::DispatchError;
//! use aquori_lib::state::DeviceSnapshot;
//! use aquori_lib::types::{ChannelLevel, ConnectionStatus, PowerState};
//! use aquori_lib::{Device, DeviceRegistry};
//!
//! // The transport implements the sink; here a no-op stands in.
//! struct NullSink;
//!
//! impl CommandSink for NullSink {
//!     fn dispatch(&self, _devid: &str, _command: DeviceCommand) -> Result<(), DispatchError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
//! snapshot.status = ConnectionStatus::Online;
//! snapshot.power = Some(PowerState::On);
//! snapshot.intensity = Some(ChannelLevel::new(80).unwrap());
//!
//! let registry = DeviceRegistry::new();
//! registry.add(Arc::new(Device::new(snapshot, Arc::new(NullSink))));
//!
//! // Cross-product setup: every supported description for every device.
//! let lights = light::setup(&registry.devices());
//! assert_eq!(lights.len(), 1);
//! assert!(lights[0].is_on());
//! assert_eq!(lights[0].brightness(), 204);
//! ```
//!
//! # Schedules
//!
//! ```
//! use aquori_lib::schedule::{parse_timecurves, render_schedule};
//!
//! let curves = parse_timecurves(&["8,0,50,10,20,30,40"]).unwrap();
//! let rendered = render_schedule(Some(&curves)).unwrap();
//! assert_eq!(rendered["08:00"].intensity, 50);
//! ```

pub mod command;
mod device;
pub mod entity;
pub mod error;
mod manager;
pub mod schedule;
mod services;
pub mod state;
pub mod types;

pub use device::Device;
pub use entity::{DeviceInfo, Entity, EntityCategory, EntityDescription};
pub use error::{DeviceError, DispatchError, Error, Result, ScheduleError, ValueError};
pub use manager::DeviceRegistry;
pub use services::Services;
pub use types::{
    ChannelLevel, ConnectionStatus, DynamicMode, LightOptions, LightType, OperatingMode,
    PowerState, SensorType, SensorValidity, Thresholds, TimeCurve,
};
