// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Aquori library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, schedule parsing, command dispatch, and device
//! operations.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when projecting
/// device state or encoding commands for Aquatlantis Ori devices.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing a light schedule.
    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Error occurred while dispatching a command to the transport.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Device was not found in the registry.
    #[error("device not found")]
    DeviceNotFound,
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An invalid operating mode string was provided.
    #[error("invalid operating mode: {0}")]
    InvalidMode(String),

    /// An invalid dynamic mode string was provided.
    #[error("invalid dynamic mode: {0}")]
    InvalidDynamicMode(String),

    /// An invalid light effect name was provided.
    #[error("invalid light effect: {0}")]
    InvalidEffect(String),
}

/// Errors related to parsing and validating light schedules.
///
/// Schedule parsing is fail-fast: the first invalid curve string aborts the
/// whole operation and no partial schedule is ever produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time curve string failed validation.
    ///
    /// Carries the offending string exactly as it was provided, so the
    /// operator can correct just that entry.
    #[error("invalid time curve: {curve}")]
    InvalidTimeCurve {
        /// The raw curve string that failed validation.
        curve: String,
    },
}

/// Errors returned by a [`CommandSink`](crate::command::CommandSink) when a
/// command cannot be delivered to the device.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The transport is not connected to the device.
    #[error("device is not connected")]
    NotConnected,

    /// The internal command channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),

    /// The device rejected the command.
    #[error("command rejected: {0}")]
    Rejected(String),
}

/// Errors related to device operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// A preset button was pressed but the device has no stored preset.
    #[error("no light preset stored for {key}")]
    MissingPreset {
        /// The preset slot that was empty.
        key: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
