// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ori command definitions.
//!
//! This module provides typed representations of the commands a device
//! accepts, plus the [`CommandSink`] seam through which they leave the
//! library. The sink is implemented by the transport (HTTP/MQTT client),
//! which is not part of this crate.
//!
//! # Available Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`DeviceCommand::SetPower`] | Turn the light on or off |
//! | [`DeviceCommand::SetMode`] | Switch between manual and automatic mode |
//! | [`DeviceCommand::SetDynamicMode`] | Start or stop the dynamic effect |
//! | [`DeviceCommand::SetLight`] | Set power plus any subset of channels |
//! | [`DeviceCommand::SetSchedule`] | Replace the stored time curve schedule |
//!
//! # Examples
//!
//! ```
//! use aquori_lib::command::DeviceCommand;
//! use aquori_lib::types::PowerState;
//!
//! let cmd = DeviceCommand::SetPower(PowerState::On);
//! assert_eq!(cmd.name(), "power");
//! assert_eq!(cmd.payload().to_string(), r#"{"power":1}"#);
//! ```

use serde_json::{Value, json};

use crate::error::DispatchError;
use crate::types::{DynamicMode, LightOptions, OperatingMode, PowerState, TimeCurve};

/// A command that can be sent to an Ori device.
///
/// Commands are encoded to the device parameter format for transmission by
/// a [`CommandSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    /// Set the light power state.
    SetPower(PowerState),
    /// Set the operating mode.
    SetMode(OperatingMode),
    /// Set the dynamic effect mode.
    SetDynamicMode(DynamicMode),
    /// Set power plus any subset of channel levels in one update.
    SetLight {
        /// Power state to apply together with the channels.
        power: PowerState,
        /// Channels to change; absent channels keep their value.
        options: LightOptions,
    },
    /// Replace the stored schedule with the given curve entries.
    SetSchedule(Vec<TimeCurve>),
}

impl DeviceCommand {
    /// Returns the command name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetPower(_) => "power",
            Self::SetMode(_) => "mode",
            Self::SetDynamicMode(_) => "dynamic_mode",
            Self::SetLight { .. } => "light",
            Self::SetSchedule(_) => "schedule",
        }
    }

    /// Returns the device parameter payload for this command.
    ///
    /// Schedules are flattened into the count-prefixed field list the
    /// device firmware expects: `[n, h1, m1, i1, r1, g1, b1, w1, h2, ...]`.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::SetPower(state) => json!({ "power": state.as_num() }),
            Self::SetMode(mode) => json!({ "mode": mode.as_num() }),
            Self::SetDynamicMode(mode) => json!({ "dynamic_mode": mode.as_num() }),
            Self::SetLight { power, options } => {
                let mut payload = serde_json::Map::new();
                payload.insert("power".to_string(), Value::from(power.as_num()));
                for (key, level) in [
                    ("intensity", options.intensity),
                    ("red", options.red),
                    ("green", options.green),
                    ("blue", options.blue),
                    ("white", options.white),
                ] {
                    if let Some(level) = level {
                        payload.insert(key.to_string(), Value::from(level.value()));
                    }
                }
                Value::Object(payload)
            }
            Self::SetSchedule(curves) => {
                let mut flat = Vec::with_capacity(1 + curves.len() * 7);
                flat.push(u8::try_from(curves.len()).unwrap_or(u8::MAX));
                for curve in curves {
                    flat.extend([
                        curve.hour,
                        curve.minute,
                        curve.intensity.value(),
                        curve.red.value(),
                        curve.green.value(),
                        curve.blue.value(),
                        curve.white.value(),
                    ]);
                }
                json!({ "timecurve": flat })
            }
        }
    }
}

/// Transport-side collaborator that delivers commands to a device.
///
/// The network client implements this trait; the entity layer only encodes
/// commands and hands them over. Implementations must be safe to call from
/// multiple threads.
pub trait CommandSink: Send + Sync {
    /// Delivers one command to the device identified by its hardware id.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] if the command cannot be delivered.
    fn dispatch(&self, devid: &str, command: DeviceCommand) -> Result<(), DispatchError>;
}
