// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity projection layer.
//!
//! Each entity kind is described declaratively: a static table of
//! descriptions, each holding a key plus plain function pointers that read
//! a [`DeviceSnapshot`] and produce values, availability, support and extra
//! attributes. Entity setup is the cross-product of registered devices and
//! descriptions, filtered by the support function.
//!
//! Keeping the behavior in pure `fn(&DeviceSnapshot) -> _` pointers keeps
//! every projection independently testable against a bare snapshot.
//!
//! # Entity kinds
//!
//! - [`light::Light`] - the main light with effects, color modes and the
//!   schedule attribute
//! - [`sensor::Sensor`] - water temperature and network diagnostics
//! - [`binary_sensor::BinarySensor`] - connectivity and temperature alerts
//! - [`number::Number`] - direct channel adjustment
//! - [`select::Select`] - operating and dynamic mode
//! - [`button::Button`] - custom preset recall
//! - [`update::Update`] - firmware version tracking

pub mod binary_sensor;
pub mod button;
pub mod light;
pub mod number;
pub mod select;
pub mod sensor;
pub mod update;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::device::Device;
use crate::state::DeviceSnapshot;

/// Integration domain, used in device identifiers.
pub const DOMAIN: &str = "aquatlantis_ori";

/// Predicate over a device snapshot.
pub type ConditionFn = fn(&DeviceSnapshot) -> bool;

/// Extra state attribute producer.
pub type AttributesFn = fn(&DeviceSnapshot) -> Map<String, Value>;

/// Registry category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    /// Diagnostic entity, hidden from the main device page.
    Diagnostic,
}

fn always(_: &DeviceSnapshot) -> bool {
    true
}

fn never(_: &DeviceSnapshot) -> bool {
    false
}

fn no_attributes(_: &DeviceSnapshot) -> Map<String, Value> {
    Map::new()
}

/// Behavior shared by every entity kind.
///
/// All fields default to permissive values; descriptions override only
/// what differs.
#[derive(Debug, Clone, Copy)]
pub struct EntityDescription {
    /// Stable entity key, unique per device.
    pub key: &'static str,
    /// Registry category, if not a primary entity.
    pub category: Option<EntityCategory>,
    /// Whether the entity is currently available.
    pub available_fn: ConditionFn,
    /// Whether the entity is enabled when first registered.
    pub enabled_default_fn: ConditionFn,
    /// Whether this description applies to the device at all.
    pub is_supported_fn: ConditionFn,
    /// Extra state attributes.
    pub state_attributes_fn: AttributesFn,
}

impl EntityDescription {
    /// Creates a description with permissive defaults.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            category: None,
            available_fn: always,
            enabled_default_fn: always,
            is_supported_fn: always,
            state_attributes_fn: no_attributes,
        }
    }

    /// Marks the entity as diagnostic.
    #[must_use]
    pub const fn diagnostic(mut self) -> Self {
        self.category = Some(EntityCategory::Diagnostic);
        self
    }

    /// Disables the entity by default.
    #[must_use]
    pub const fn disabled_by_default(mut self) -> Self {
        self.enabled_default_fn = never;
        self
    }

    /// Sets the availability predicate.
    #[must_use]
    pub const fn available_when(mut self, f: ConditionFn) -> Self {
        self.available_fn = f;
        self
    }

    /// Sets the enabled-by-default predicate.
    #[must_use]
    pub const fn enabled_default_when(mut self, f: ConditionFn) -> Self {
        self.enabled_default_fn = f;
        self
    }

    /// Sets the support predicate.
    #[must_use]
    pub const fn supported_when(mut self, f: ConditionFn) -> Self {
        self.is_supported_fn = f;
        self
    }

    /// Sets the extra state attribute producer.
    #[must_use]
    pub const fn with_attributes(mut self, f: AttributesFn) -> Self {
        self.state_attributes_fn = f;
        self
    }
}

/// Device registry projection for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// User-assigned device name.
    pub name: String,
    /// Identifier within the integration domain.
    pub identifier: (&'static str, String),
    /// Network MAC connection.
    pub mac: String,
    /// Manufacturer brand.
    pub manufacturer: String,
    /// Product family.
    pub model: &'static str,
    /// Concrete model name or hardware id.
    pub model_id: String,
    /// Installed firmware version.
    pub sw_version: Option<String>,
}

impl DeviceInfo {
    /// Builds the registry projection for a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &DeviceSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            identifier: (DOMAIN, snapshot.id.clone()),
            mac: snapshot.mac.clone(),
            manufacturer: snapshot.brand.clone(),
            model: "Ori",
            model_id: snapshot.model_id(),
            sw_version: snapshot.version.clone(),
        }
    }
}

/// Behavior common to all projected entities.
pub trait Entity {
    /// The device this entity belongs to.
    fn device(&self) -> &Arc<Device>;

    /// The shared part of this entity's description.
    fn description(&self) -> &EntityDescription;

    /// Stable unique id: device id plus entity key, lowercased.
    fn unique_id(&self) -> String {
        format!("{}_{}", self.device().id(), self.description().key).to_lowercase()
    }

    /// Registry category.
    fn category(&self) -> Option<EntityCategory> {
        self.description().category
    }

    /// Whether the entity is available: the device must be online and the
    /// description's own predicate must hold.
    fn available(&self) -> bool {
        let snapshot = self.device().snapshot();
        snapshot.status.is_online() && (self.description().available_fn)(&snapshot)
    }

    /// Whether the entity starts out enabled in the registry.
    fn enabled_by_default(&self) -> bool {
        (self.description().enabled_default_fn)(&self.device().snapshot())
    }

    /// Device registry projection.
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::from_snapshot(&self.device().snapshot())
    }

    /// Entity-specific extra state attributes.
    fn extra_state_attributes(&self) -> Map<String, Value> {
        (self.description().state_attributes_fn)(&self.device().snapshot())
    }
}
