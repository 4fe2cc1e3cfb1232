// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end projection tests against a fully populated device.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;

use aquori_lib::command::{CommandSink, DeviceCommand};
use aquori_lib::entity::light::{self, ColorCapability, LightEffect, TurnOnRequest};
use aquori_lib::entity::{Entity, binary_sensor, button, number, select, sensor, update};
use aquori_lib::error::DispatchError;
use aquori_lib::state::DeviceSnapshot;
use aquori_lib::types::{
    ChannelLevel, ConnectionStatus, DynamicMode, LightOptions, LightType, OperatingMode,
    PowerState, SensorType, SensorValidity, Thresholds,
};
use aquori_lib::{Device, DeviceRegistry};

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<(String, DeviceCommand)>>,
}

impl RecordingSink {
    fn commands(&self) -> Vec<DeviceCommand> {
        self.calls.lock().iter().map(|(_, c)| c.clone()).collect()
    }
}

impl CommandSink for RecordingSink {
    fn dispatch(&self, devid: &str, command: DeviceCommand) -> Result<(), DispatchError> {
        self.calls.lock().push((devid.to_string(), command));
        Ok(())
    }
}

fn level(value: u8) -> ChannelLevel {
    ChannelLevel::new(value).unwrap()
}

/// A fully reported device, mirroring what the transport delivers after
/// the first cloud and push updates.
fn test_snapshot() -> DeviceSnapshot {
    let mut snapshot = DeviceSnapshot::new("device123", "testdevid", "Test Device");
    snapshot.brand = "Aquatlantis".to_string();
    snapshot.light_type = Some(LightType::RgbwUltra);
    snapshot.status = ConnectionStatus::Online;
    snapshot.online_time = Some(Utc.timestamp_millis_opt(1_719_400_000_000).unwrap());
    snapshot.mac = "00:11:22:33:44:55".to_string();
    snapshot.bluetooth_mac = Some("00:11:22:33:44:66".to_string());
    snapshot.ip = Some("192.168.1.100".to_string());
    snapshot.port = Some(8080);
    snapshot.rssi = Some(-70);
    snapshot.ssid = Some("TestWiFi".to_string());
    snapshot.version = Some("10".to_string());
    snapshot.latest_firmware_version = Some(10);
    snapshot.firmware_name = Some("testpkey_V10.bin".to_string());
    snapshot.firmware_path = Some("https://example.com/testpkey_V10.bin".to_string());
    snapshot.power = Some(PowerState::On);
    snapshot.mode = Some(OperatingMode::Manual);
    snapshot.dynamic_mode = Some(DynamicMode::Off);
    snapshot.intensity = Some(level(80));
    snapshot.red = Some(level(10));
    snapshot.green = Some(level(20));
    snapshot.blue = Some(level(30));
    snapshot.white = Some(level(40));
    snapshot.timecurve = Some(vec![
        "8,0,50,10,20,30,40".parse().unwrap(),
        "18,30,80,60,70,80,90".parse().unwrap(),
    ]);
    snapshot.custom1 = Some(
        LightOptions::new()
            .with_intensity(level(75))
            .with_red(level(100))
            .with_green(level(50))
            .with_blue(level(25))
            .with_white(level(80)),
    );
    snapshot.sensor_type = Some(SensorType::Temperature);
    snapshot.sensor_valid = Some(SensorValidity::Valid);
    snapshot.water_temperature = Some(25.0);
    snapshot.water_temperature_thresholds = Some(Thresholds::new(20.0, 30.0));
    snapshot.app_notifications = Some(false);
    snapshot
}

fn test_device(sink: Arc<RecordingSink>) -> Arc<Device> {
    Arc::new(Device::new(test_snapshot(), sink))
}

#[test]
fn light_projection_scales_to_wire_range() {
    let lights = light::setup(&[test_device(Arc::default())]);
    assert_eq!(lights.len(), 1);
    let light = &lights[0];

    assert!(light.is_on());
    assert_eq!(light.brightness(), 204);
    assert_eq!(light.rgbw_color(), [26, 51, 76, 102]);
    assert_eq!(light.effect(), LightEffect::Manual);
    assert_eq!(light.color_mode(), ColorCapability::Rgbw);
    assert_eq!(light.supported_color_modes(), [ColorCapability::Rgbw]);
}

#[test]
fn light_attributes_render_schedule() {
    let lights = light::setup(&[test_device(Arc::default())]);
    let attributes = lights[0].extra_state_attributes();

    assert_eq!(attributes["light_mode"], Value::String("manual".into()));
    let schedule = &attributes["schedule"];
    assert_eq!(schedule["08:00"]["intensity"], Value::from(50));
    assert_eq!(schedule["08:00"]["white"], Value::from(40));
    assert_eq!(schedule["18:30"]["red"], Value::from(60));
}

#[test]
fn automatic_device_reports_onoff_and_stays_on() {
    let device = test_device(Arc::default());
    device.update(|s| {
        s.mode = Some(OperatingMode::Automatic);
        s.dynamic_mode = Some(DynamicMode::On);
        s.power = Some(PowerState::Off);
    });
    let lights = light::setup(&[device]);
    let light = &lights[0];

    // Automatic wins over dynamic, and automatic counts as on.
    assert_eq!(light.effect(), LightEffect::Automatic);
    assert_eq!(light.color_mode(), ColorCapability::OnOff);
    assert!(light.is_on());
}

#[test]
fn turn_on_with_brightness_and_color() {
    let sink = Arc::new(RecordingSink::default());
    let lights = light::setup(&[test_device(sink.clone())]);

    lights[0]
        .turn_on(
            &TurnOnRequest::new()
                .with_brightness(204)
                .with_rgbw([26, 51, 76, 102]),
        )
        .unwrap();

    let commands = sink.commands();
    assert_eq!(commands.len(), 1);
    let DeviceCommand::SetLight { power, options } = &commands[0] else {
        panic!("expected SetLight, got {:?}", commands[0]);
    };
    assert_eq!(*power, PowerState::On);
    assert_eq!(options.intensity.unwrap().value(), 80);
    assert_eq!(options.red.unwrap().value(), 10);
    assert_eq!(options.green.unwrap().value(), 20);
    assert_eq!(options.blue.unwrap().value(), 30);
    assert_eq!(options.white.unwrap().value(), 40);
}

#[test]
fn turn_on_with_automatic_effect_stops_early() {
    let sink = Arc::new(RecordingSink::default());
    let lights = light::setup(&[test_device(sink.clone())]);

    lights[0]
        .turn_on(
            &TurnOnRequest::new()
                .with_effect(LightEffect::Automatic)
                .with_brightness(255),
        )
        .unwrap();

    // Mode and dynamic flag only; no power or channel commands follow.
    assert_eq!(
        sink.commands(),
        vec![
            DeviceCommand::SetMode(OperatingMode::Automatic),
            DeviceCommand::SetDynamicMode(DynamicMode::Off),
        ]
    );
}

#[test]
fn turn_on_with_dynamic_effect_continues_to_set_light() {
    let sink = Arc::new(RecordingSink::default());
    let lights = light::setup(&[test_device(sink.clone())]);

    lights[0]
        .turn_on(&TurnOnRequest::new().with_effect(LightEffect::Dynamic))
        .unwrap();

    let commands = sink.commands();
    assert_eq!(commands.len(), 3);
    assert_eq!(commands[0], DeviceCommand::SetMode(OperatingMode::Manual));
    assert_eq!(commands[1], DeviceCommand::SetDynamicMode(DynamicMode::On));
    assert_eq!(
        commands[2],
        DeviceCommand::SetLight {
            power: PowerState::On,
            options: LightOptions::new(),
        }
    );
}

#[test]
fn turn_off_drops_to_manual_first() {
    let sink = Arc::new(RecordingSink::default());
    let lights = light::setup(&[test_device(sink.clone())]);

    lights[0].turn_off().unwrap();

    assert_eq!(
        sink.commands(),
        vec![
            DeviceCommand::SetMode(OperatingMode::Manual),
            DeviceCommand::SetPower(PowerState::Off),
        ]
    );
}

#[test]
fn every_entity_kind_projects_from_one_device() {
    let device = test_device(Arc::default());
    let devices = [device];

    assert_eq!(light::setup(&devices).len(), 1);
    assert_eq!(sensor::setup(&devices).len(), sensor::DESCRIPTIONS.len());
    assert_eq!(binary_sensor::setup(&devices).len(), 2);
    assert_eq!(number::setup(&devices).len(), 5);
    assert_eq!(select::setup(&devices).len(), 2);
    assert_eq!(button::setup(&devices).len(), 4);
    assert_eq!(update::setup(&devices).len(), 1);
}

#[test]
fn setup_is_a_cross_product_over_devices() {
    let sink: Arc<RecordingSink> = Arc::default();
    let first = test_device(sink.clone());
    let second = Arc::new(Device::new(
        {
            let mut snapshot = test_snapshot();
            snapshot.id = "device456".to_string();
            snapshot
        },
        sink,
    ));

    let numbers = number::setup(&[first, second]);
    assert_eq!(numbers.len(), 10);
    assert_eq!(numbers[0].unique_id(), "device123_intensity");
    assert_eq!(numbers[5].unique_id(), "device456_intensity");
}

#[test]
fn entities_share_device_info() {
    let lights = light::setup(&[test_device(Arc::default())]);
    let info = lights[0].device_info();

    assert_eq!(info.name, "Test Device");
    assert_eq!(info.identifier.1, "device123");
    assert_eq!(info.mac, "00:11:22:33:44:55");
    assert_eq!(info.manufacturer, "Aquatlantis");
    assert_eq!(info.model, "Ori");
    assert_eq!(info.model_id, "RGBW_ULTRA");
    assert_eq!(info.sw_version.as_deref(), Some("10"));
}

#[test]
fn offline_device_makes_entities_unavailable() {
    let device = test_device(Arc::default());
    device.update(|s| s.status = ConnectionStatus::Offline);

    let lights = light::setup(&[device.clone()]);
    assert!(!lights[0].available());

    // Except the connectivity sensor, which reports the offline state.
    let binary_sensors = binary_sensor::setup(&[device]);
    let status = binary_sensors
        .iter()
        .find(|s| s.description().key == "status")
        .unwrap();
    assert!(status.available());
    assert!(!status.is_on());
}

#[tokio::test]
async fn watch_channel_delivers_refreshes() {
    let device = test_device(Arc::default());
    let rx = device.watch();

    let waiter = {
        let mut rx = rx.clone();
        tokio::spawn(async move {
            rx.changed().await.unwrap();
            rx.borrow().intensity
        })
    };

    device.update(|s| s.intensity = Some(level(55)));

    let seen = waiter.await.unwrap();
    assert_eq!(seen.unwrap().value(), 55);
    assert!(rx.has_changed().unwrap());
}

#[test]
fn registry_lookup_matches_entities() {
    let registry = DeviceRegistry::new();
    registry.add(test_device(Arc::default()));

    let found = registry.find("device123").unwrap();
    assert_eq!(found.devid(), "testdevid");
    assert!(registry.find("missing").is_none());
}
