// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operator-facing services.
//!
//! Services accept raw user input, validate it fully and only then touch a
//! device. The schedule service is fail-fast: if any curve string is
//! malformed, nothing is dispatched and the device keeps its previous
//! schedule, while the error names the offending string.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::manager::DeviceRegistry;
use crate::schedule::parse_timecurves;

/// Service dispatcher bound to a device registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use aquori_lib::command::{CommandSink, DeviceCommand};
/// use aquori_lib::error::DispatchError;
/// use aquori_lib::state::DeviceSnapshot;
/// use aquori_lib::{Device, DeviceRegistry, Services};
///
/// struct NullSink;
///
/// impl CommandSink for NullSink {
///     fn dispatch(&self, _devid: &str, _command: DeviceCommand) -> Result<(), DispatchError> {
///         Ok(())
///     }
/// }
///
/// let registry = Arc::new(DeviceRegistry::new());
/// let snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
/// registry.add(Arc::new(Device::new(snapshot, Arc::new(NullSink))));
///
/// let services = Services::new(registry);
/// services
///     .set_schedule("device123", &["8,0,50,10,20,30,40"])
///     .unwrap();
/// ```
pub struct Services {
    registry: Arc<DeviceRegistry>,
}

impl Services {
    /// Creates the service dispatcher.
    #[must_use]
    pub const fn new(registry: Arc<DeviceRegistry>) -> Self {
        Self { registry }
    }

    /// Replaces a device's schedule from raw curve strings.
    ///
    /// The strings are parsed and validated before the device is even
    /// resolved; order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidTimeCurve` (wrapped in [`Error`]) for
    /// the first malformed curve string, `Error::DeviceNotFound` for an
    /// unknown device id, or a dispatch error from the transport. In every
    /// error case the device schedule is left untouched.
    pub fn set_schedule<S: AsRef<str>>(&self, device_id: &str, curves: &[S]) -> Result<()> {
        let schedule = parse_timecurves(curves)?;
        let device = self.registry.find(device_id).ok_or(Error::DeviceNotFound)?;

        debug!(device_id, entries = schedule.len(), "setting new schedule");

        device.set_timecurve(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandSink, DeviceCommand};
    use crate::device::Device;
    use crate::error::{DispatchError, ScheduleError};
    use crate::state::DeviceSnapshot;
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

    fn services(sink: Arc<RecordingSink>) -> Services {
        let registry = Arc::new(DeviceRegistry::new());
        let snapshot = DeviceSnapshot::new("device123", "ORI001", "Tank light");
        registry.add(Arc::new(Device::new(snapshot, sink)));
        Services::new(registry)
    }

    #[test]
    fn set_schedule_dispatches_parsed_curves() {
        let sink = Arc::new(RecordingSink::default());
        let services = services(sink.clone());

        services
            .set_schedule("device123", &["8,0,50,10,20,30,40", "18,30,80,60,70,80,90"])
            .unwrap();

        let calls = sink.calls.lock();
        let DeviceCommand::SetSchedule(curves) = &calls[0] else {
            panic!("expected SetSchedule, got {:?}", calls[0]);
        };
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].hour, 8);
        assert_eq!(curves[1].minute, 30);
    }

    #[test]
    fn invalid_curve_leaves_schedule_untouched() {
        let sink = Arc::new(RecordingSink::default());
        let services = services(sink.clone());

        let err = services
            .set_schedule("device123", &["8,0,50,10,20,30,40", "99,99,99,99,99,99,99"])
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Schedule(ScheduleError::InvalidTimeCurve { curve })
                if curve == "99,99,99,99,99,99,99"
        ));
        assert!(sink.calls.lock().is_empty());
    }

    #[test]
    fn unknown_device_is_rejected_after_validation() {
        let sink = Arc::new(RecordingSink::default());
        let services = services(sink.clone());

        let err = services
            .set_schedule("device999", &["8,0,50,10,20,30,40"])
            .unwrap_err();

        assert!(matches!(err, Error::DeviceNotFound));
        assert!(sink.calls.lock().is_empty());
    }
}
