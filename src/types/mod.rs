// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Ori device control.
//!
//! This module provides type-safe representations of values used in Ori
//! commands and state. Each type ensures values are within their valid
//! ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`PowerState`] - On/Off power state
//! - [`OperatingMode`] - Manual/Automatic scheduling mode
//! - [`DynamicMode`] - Dynamic effect flag
//! - [`ChannelLevel`] - Light channel percentage (0-100%), with wire-range
//!   (0-255) conversion
//! - [`LightOptions`] - Partial set of channel values for set-light commands
//!   and presets
//! - [`TimeCurve`] - One scheduled lighting configuration
//! - [`ConnectionStatus`], [`SensorType`], [`SensorValidity`], [`LightType`],
//!   [`Thresholds`] - device status and sensing metadata

mod channel;
mod mode;
mod options;
mod power;
mod status;
mod timecurve;

pub use channel::ChannelLevel;
pub use mode::{DynamicMode, OperatingMode};
pub use options::{LightOptions, Thresholds};
pub use power::PowerState;
pub use status::{ConnectionStatus, LightType, SensorType, SensorValidity};
pub use timecurve::TimeCurve;
