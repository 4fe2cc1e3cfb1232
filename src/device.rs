// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device handle pairing reported state with a command channel.
//!
//! A [`Device`] owns the snapshot for one physical unit and the
//! [`CommandSink`](crate::command::CommandSink) used to reach it. The
//! transport refreshes the snapshot through [`Device::update`]; entity
//! projections read it through [`Device::snapshot`]. Commands do not touch
//! the snapshot: state changes come back from the device as push updates.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use aquori_lib::command::{CommandSink, DeviceCommand};
//! use aquori_lib::error::DispatchError;
//! use aquori_lib::state::DeviceSnapshot;
//! use aquori_lib::types::PowerState;
//! use aquori_lib::Device;
//!
//! struct NullSink;
//!
//! impl CommandSink for NullSink {
//!     fn dispatch(&self, _devid: &str, _command: DeviceCommand) -> Result<(), DispatchError> {
//!         Ok(())
//!     }
//! }
//!
//! let snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
//! let device = Device::new(snapshot, Arc::new(NullSink));
//! device.set_power(PowerState::On).unwrap();
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::debug;

use crate::command::{CommandSink, DeviceCommand};
use crate::error::Result;
use crate::state::DeviceSnapshot;
use crate::types::{ChannelLevel, DynamicMode, LightOptions, OperatingMode, PowerState, TimeCurve};

/// Handle for one Ori device.
///
/// Cheap to share via `Arc`; the snapshot lock is only held for the
/// duration of a clone or an update closure.
pub struct Device {
    snapshot: RwLock<DeviceSnapshot>,
    sink: Arc<dyn CommandSink>,
    updates: watch::Sender<DeviceSnapshot>,
}

impl Device {
    /// Creates a device handle from an initial snapshot and a command sink.
    #[must_use]
    pub fn new(snapshot: DeviceSnapshot, sink: Arc<dyn CommandSink>) -> Self {
        let (updates, _) = watch::channel(snapshot.clone());
        Self {
            snapshot: RwLock::new(snapshot),
            sink,
            updates,
        }
    }

    /// Returns the vendor account device id.
    #[must_use]
    pub fn id(&self) -> String {
        self.snapshot.read().id.clone()
    }

    /// Returns the hardware device id.
    #[must_use]
    pub fn devid(&self) -> String {
        self.snapshot.read().devid.clone()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.snapshot.read().clone()
    }

    /// Mutates the snapshot and republishes it to watchers.
    ///
    /// Called by the transport when cloud or push data arrives.
    pub fn update(&self, apply: impl FnOnce(&mut DeviceSnapshot)) {
        let snapshot = {
            let mut guard = self.snapshot.write();
            apply(&mut guard);
            guard.clone()
        };
        self.updates.send_replace(snapshot);
    }

    /// Returns a receiver that observes every snapshot update.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceSnapshot> {
        self.updates.subscribe()
    }

    fn send(&self, command: DeviceCommand) -> Result<()> {
        let devid = self.devid();
        debug!(devid = %devid, command = command.name(), "dispatching command");
        self.sink.dispatch(&devid, command)?;
        Ok(())
    }

    /// Sets the light power state.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_power(&self, state: PowerState) -> Result<()> {
        self.send(DeviceCommand::SetPower(state))
    }

    /// Sets the operating mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_mode(&self, mode: OperatingMode) -> Result<()> {
        self.send(DeviceCommand::SetMode(mode))
    }

    /// Sets the dynamic effect mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_dynamic_mode(&self, mode: DynamicMode) -> Result<()> {
        self.send(DeviceCommand::SetDynamicMode(mode))
    }

    /// Sets power plus any subset of channels in one update.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_light(&self, power: PowerState, options: LightOptions) -> Result<()> {
        self.send(DeviceCommand::SetLight { power, options })
    }

    /// Sets a single channel, keeping the current power state.
    ///
    /// Unknown power is treated as on, since single-channel adjustments
    /// are only offered while the light is controllable.
    fn set_channel(&self, options: LightOptions) -> Result<()> {
        let power = self.snapshot.read().power.unwrap_or(PowerState::On);
        self.set_light(power, options)
    }

    /// Sets the overall intensity channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_intensity(&self, level: ChannelLevel) -> Result<()> {
        self.set_channel(LightOptions::new().with_intensity(level))
    }

    /// Sets the red channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_red(&self, level: ChannelLevel) -> Result<()> {
        self.set_channel(LightOptions::new().with_red(level))
    }

    /// Sets the green channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_green(&self, level: ChannelLevel) -> Result<()> {
        self.set_channel(LightOptions::new().with_green(level))
    }

    /// Sets the blue channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_blue(&self, level: ChannelLevel) -> Result<()> {
        self.set_channel(LightOptions::new().with_blue(level))
    }

    /// Sets the white channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_white(&self, level: ChannelLevel) -> Result<()> {
        self.set_channel(LightOptions::new().with_white(level))
    }

    /// Replaces the stored schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver the command.
    pub fn set_timecurve(&self, curves: Vec<TimeCurve>) -> Result<()> {
        self.send(DeviceCommand::SetSchedule(curves))
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("snapshot", &*self.snapshot.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::types::ConnectionStatus;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(String, DeviceCommand)>>,
    }

    impl CommandSink for RecordingSink {
        fn dispatch(&self, devid: &str, command: DeviceCommand) -> std::result::Result<(), DispatchError> {
            self.calls.lock().push((devid.to_string(), command));
            Ok(())
        }
    }

    fn device_with_sink() -> (Arc<RecordingSink>, Device) {
        let sink = Arc::new(RecordingSink::default());
        let snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
        let device = Device::new(snapshot, sink.clone());
        (sink, device)
    }

    #[test]
    fn commands_reach_the_sink_with_devid() {
        let (sink, device) = device_with_sink();

        device.set_power(PowerState::On).unwrap();
        device.set_mode(OperatingMode::Automatic).unwrap();

        let calls = sink.calls.lock();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            ("ORI001".to_string(), DeviceCommand::SetPower(PowerState::On))
        );
        assert_eq!(
            calls[1],
            (
                "ORI001".to_string(),
                DeviceCommand::SetMode(OperatingMode::Automatic)
            )
        );
    }

    #[test]
    fn single_channel_set_uses_current_power() {
        let (sink, device) = device_with_sink();
        device.update(|s| s.power = Some(PowerState::Off));

        device
            .set_intensity(ChannelLevel::new(40).unwrap())
            .unwrap();

        let calls = sink.calls.lock();
        let DeviceCommand::SetLight { power, options } = &calls[0].1 else {
            panic!("expected SetLight, got {:?}", calls[0].1);
        };
        assert_eq!(*power, PowerState::Off);
        assert_eq!(options.intensity.unwrap().value(), 40);
        assert!(options.red.is_none());
    }

    #[test]
    fn single_channel_set_defaults_to_on_when_power_unknown() {
        let (sink, device) = device_with_sink();

        device.set_white(ChannelLevel::new(10).unwrap()).unwrap();

        let calls = sink.calls.lock();
        let DeviceCommand::SetLight { power, .. } = &calls[0].1 else {
            panic!("expected SetLight");
        };
        assert_eq!(*power, PowerState::On);
    }

    #[test]
    fn update_mutates_snapshot() {
        let (_, device) = device_with_sink();

        device.update(|s| {
            s.status = ConnectionStatus::Online;
            s.power = Some(PowerState::On);
        });

        let snapshot = device.snapshot();
        assert!(snapshot.status.is_online());
        assert_eq!(snapshot.power, Some(PowerState::On));
    }

    #[test]
    fn watch_observes_updates() {
        let (_, device) = device_with_sink();
        let rx = device.watch();
        assert!(!rx.borrow().status.is_online());

        device.update(|s| s.status = ConnectionStatus::Online);

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow().status.is_online());
    }
}
