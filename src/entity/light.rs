// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light entity and the light mode projection.
//!
//! The device reports two independent flags, operating mode and dynamic
//! mode; the user sees one tri-state effect label. The projection rules:
//!
//! - Automatic mode wins outright: an automatic device reports
//!   [`LightEffect::Automatic`] whatever the dynamic flag says.
//! - Otherwise dynamic on means [`LightEffect::Dynamic`].
//! - Otherwise [`LightEffect::Manual`].
//!
//! The same flags drive the color capability: in automatic or dynamic
//! operation the channels are firmware-driven and the light only supports
//! on/off; only plain manual operation exposes RGBW control. And a light
//! in automatic mode is always considered logically on, since the schedule
//! keeps driving it regardless of the explicit power flag.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::device::Device;
use crate::entity::{Entity, EntityDescription};
use crate::error::{Result, ValueError};
use crate::schedule::render_schedule;
use crate::state::DeviceSnapshot;
use crate::types::{ChannelLevel, DynamicMode, LightOptions, OperatingMode, PowerState};

/// User-facing effect label summarizing the two mode flags.
///
/// # Examples
///
/// ```
/// use aquori_lib::entity::light::LightEffect;
/// use aquori_lib::types::{DynamicMode, OperatingMode};
///
/// // Automatic overrides the dynamic flag entirely.
/// let effect = LightEffect::from_flags(OperatingMode::Automatic, DynamicMode::On);
/// assert_eq!(effect, LightEffect::Automatic);
///
/// assert_eq!(
///     LightEffect::from_flags(OperatingMode::Manual, DynamicMode::On),
///     LightEffect::Dynamic
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightEffect {
    /// Channels follow direct commands.
    Manual,
    /// Channels follow the stored schedule.
    Automatic,
    /// The built-in dynamic effect is running.
    Dynamic,
}

/// All selectable effects, in display order.
pub const EFFECTS: [LightEffect; 3] = [
    LightEffect::Manual,
    LightEffect::Automatic,
    LightEffect::Dynamic,
];

impl LightEffect {
    /// Derives the effect from the two device flags.
    ///
    /// Automatic mode overrides the dynamic flag entirely; this precedence
    /// is fixed policy.
    #[must_use]
    pub const fn from_flags(mode: OperatingMode, dynamic: DynamicMode) -> Self {
        match (mode, dynamic) {
            (OperatingMode::Automatic, _) => Self::Automatic,
            (OperatingMode::Manual, DynamicMode::On) => Self::Dynamic,
            (OperatingMode::Manual, DynamicMode::Off) => Self::Manual,
        }
    }

    /// Derives the effect from a snapshot, treating unknown flags as
    /// manual/off.
    #[must_use]
    pub fn for_snapshot(snapshot: &DeviceSnapshot) -> Self {
        Self::from_flags(
            snapshot.mode.unwrap_or(OperatingMode::Manual),
            snapshot.dynamic_mode.unwrap_or(DynamicMode::Off),
        )
    }

    /// Returns the effect label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for LightEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LightEffect {
    type Err = ValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "automatic" => Ok(Self::Automatic),
            "dynamic" => Ok(Self::Dynamic),
            _ => Err(ValueError::InvalidEffect(s.to_string())),
        }
    }
}

/// Color capability of the light in its current operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCapability {
    /// Only on/off control is possible.
    OnOff,
    /// Full RGBW channel control is possible.
    Rgbw,
}

impl ColorCapability {
    /// Derives the capability from the two device flags.
    ///
    /// In automatic mode or with the dynamic effect running, the firmware
    /// drives the channels and only on/off remains.
    #[must_use]
    pub const fn from_flags(mode: OperatingMode, dynamic: DynamicMode) -> Self {
        match (mode, dynamic) {
            (OperatingMode::Automatic, _) | (_, DynamicMode::On) => Self::OnOff,
            _ => Self::Rgbw,
        }
    }

    /// Derives the capability from a snapshot, treating unknown flags as
    /// manual/off.
    #[must_use]
    pub fn for_snapshot(snapshot: &DeviceSnapshot) -> Self {
        Self::from_flags(
            snapshot.mode.unwrap_or(OperatingMode::Manual),
            snapshot.dynamic_mode.unwrap_or(DynamicMode::Off),
        )
    }

    /// Returns the capability label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnOff => "onoff",
            Self::Rgbw => "rgbw",
        }
    }
}

impl fmt::Display for ColorCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the light counts as on.
///
/// A light in automatic mode is always logically on: the schedule keeps
/// driving it regardless of the explicit power flag.
#[must_use]
pub const fn is_light_on(power: PowerState, mode: OperatingMode) -> bool {
    matches!(power, PowerState::On) || matches!(mode, OperatingMode::Automatic)
}

fn light_attributes(snapshot: &DeviceSnapshot) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert(
        "light_mode".to_string(),
        Value::String(LightEffect::for_snapshot(snapshot).to_string()),
    );
    let schedule = render_schedule(snapshot.timecurve.as_deref());
    attributes.insert(
        "schedule".to_string(),
        serde_json::to_value(schedule).unwrap_or(Value::Null),
    );
    attributes
}

/// Description of a light entity.
#[derive(Debug, Clone, Copy)]
pub struct LightDescription {
    /// Shared entity behavior.
    pub entity: EntityDescription,
}

/// Light entity descriptions.
pub const DESCRIPTIONS: &[LightDescription] = &[LightDescription {
    entity: EntityDescription::new("light").with_attributes(light_attributes),
}];

/// Options accepted by [`Light::turn_on`].
///
/// Brightness and color arrive from the platform in the 8-bit wire range
/// and are scaled to the device range before dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnOnRequest {
    /// Wire-range brightness (0-255).
    pub brightness: Option<u8>,
    /// Wire-range RGBW color (each 0-255).
    pub rgbw: Option<[u8; 4]>,
    /// Effect to switch to before applying channels.
    pub effect: Option<LightEffect>,
}

impl TurnOnRequest {
    /// Creates an empty request (plain turn-on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a wire-range brightness.
    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Requests a wire-range RGBW color.
    #[must_use]
    pub const fn with_rgbw(mut self, rgbw: [u8; 4]) -> Self {
        self.rgbw = Some(rgbw);
        self
    }

    /// Requests an effect change.
    #[must_use]
    pub const fn with_effect(mut self, effect: LightEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// The projected light entity for one device.
pub struct Light {
    device: Arc<Device>,
    description: &'static LightDescription,
}

impl Light {
    /// Creates the entity from a device and its description.
    #[must_use]
    pub const fn new(device: Arc<Device>, description: &'static LightDescription) -> Self {
        Self {
            device,
            description,
        }
    }

    /// Returns true if the light counts as on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        let snapshot = self.device.snapshot();
        is_light_on(
            snapshot.power.unwrap_or(PowerState::Off),
            snapshot.mode.unwrap_or(OperatingMode::Manual),
        )
    }

    /// Returns the wire-range brightness (0-255).
    #[must_use]
    pub fn brightness(&self) -> u8 {
        let snapshot = self.device.snapshot();
        snapshot.intensity.unwrap_or(ChannelLevel::MIN).to_wire()
    }

    /// Returns the wire-range RGBW color.
    #[must_use]
    pub fn rgbw_color(&self) -> [u8; 4] {
        let snapshot = self.device.snapshot();
        [snapshot.red, snapshot.green, snapshot.blue, snapshot.white]
            .map(|channel| channel.unwrap_or(ChannelLevel::MIN).to_wire())
    }

    /// Returns the current effect.
    #[must_use]
    pub fn effect(&self) -> LightEffect {
        LightEffect::for_snapshot(&self.device.snapshot())
    }

    /// Returns the selectable effects.
    #[must_use]
    pub const fn effect_list(&self) -> &'static [LightEffect] {
        &EFFECTS
    }

    /// Returns the current color mode.
    #[must_use]
    pub fn color_mode(&self) -> ColorCapability {
        ColorCapability::for_snapshot(&self.device.snapshot())
    }

    /// Returns the supported color modes (always a single capability).
    #[must_use]
    pub fn supported_color_modes(&self) -> [ColorCapability; 1] {
        [self.color_mode()]
    }

    /// Turns the light on, optionally switching effect and channels.
    ///
    /// Effect changes are applied first. Switching to automatic stops
    /// here: the schedule takes over and no channel or power commands are
    /// sent. Other paths scale the requested wire-range values to the
    /// device range and send one set-light command with power on.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver a command.
    pub fn turn_on(&self, request: &TurnOnRequest) -> Result<()> {
        info!(
            key = self.description.entity.key,
            devid = %self.device.devid(),
            "turning on or changing light"
        );

        if let Some(effect) = request.effect {
            match effect {
                LightEffect::Manual => {
                    self.device.set_mode(OperatingMode::Manual)?;
                    self.device.set_dynamic_mode(DynamicMode::Off)?;
                }
                LightEffect::Automatic => {
                    self.device.set_mode(OperatingMode::Automatic)?;
                    self.device.set_dynamic_mode(DynamicMode::Off)?;
                    // Automatic mode needs no RGBW settings or power change.
                    return Ok(());
                }
                LightEffect::Dynamic => {
                    self.device.set_mode(OperatingMode::Manual)?;
                    self.device.set_dynamic_mode(DynamicMode::On)?;
                }
            }
        }

        let mut options = LightOptions::new();
        if let Some([red, green, blue, white]) = request.rgbw {
            options = options
                .with_red(ChannelLevel::from_wire(red))
                .with_green(ChannelLevel::from_wire(green))
                .with_blue(ChannelLevel::from_wire(blue))
                .with_white(ChannelLevel::from_wire(white));
        }
        if let Some(brightness) = request.brightness {
            options = options.with_intensity(ChannelLevel::from_wire(brightness));
        }

        self.device.set_light(PowerState::On, options)
    }

    /// Turns the light off, dropping back to manual mode first.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot deliver a command.
    pub fn turn_off(&self) -> Result<()> {
        info!(
            key = self.description.entity.key,
            devid = %self.device.devid(),
            "turning off light"
        );
        self.device.set_mode(OperatingMode::Manual)?;
        self.device.set_power(PowerState::Off)
    }
}

impl Entity for Light {
    fn device(&self) -> &Arc<Device> {
        &self.device
    }

    fn description(&self) -> &EntityDescription {
        &self.description.entity
    }
}

/// Builds light entities for every supported device/description pair.
#[must_use]
pub fn setup(devices: &[Arc<Device>]) -> Vec<Light> {
    devices
        .iter()
        .flat_map(|device| {
            DESCRIPTIONS
                .iter()
                .filter(|description| (description.entity.is_supported_fn)(&device.snapshot()))
                .map(|description| Light::new(device.clone(), description))
        })
        .collect()
}
