//! Zont device model and its sensor catalog.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::SENSOR_FAMILIES;
use crate::error::ApiError;
use crate::value::{to_integer, to_text};

/// A sensor entry from a device's `z3k_config`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorInfo {
    pub device_id: i64,
    pub id: Option<i64>,
    pub family: &'static str,
    pub name: Option<String>,
    /// Family-specific fields such as `sensor_type` or `boiler_model`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A device as returned by the `/devices` call
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    id: i64,
    name: String,
    last_seen: i64,
    last_seen_relative: i64,
    data: Value,
}

impl Device {
    /// Build a device from its `/devices` entry
    ///
    /// # Errors
    /// When the entry has no integer `id` or no `name`.
    pub fn from_json(data: Value) -> Result<Self, ApiError> {
        let id = data
            .get("id")
            .and_then(|v| to_integer(v).ok())
            .ok_or_else(|| ApiError::internal("device must have an ID"))?;
        let name = data
            .get("name")
            .filter(|v| !v.is_null())
            .map(to_text)
            .ok_or_else(|| ApiError::internal("device must have a name"))?;

        let mut device = Self {
            id,
            name,
            last_seen: 0,
            last_seen_relative: -1,
            data,
        };
        device.sync_last_seen();
        Ok(device)
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time of the last report from the device, UNIX seconds (0 if unknown)
    #[must_use]
    pub const fn last_seen(&self) -> i64 {
        self.last_seen
    }

    /// Seconds since the last report as computed by the server (-1 if unknown)
    #[must_use]
    pub const fn last_seen_relative(&self) -> i64 {
        self.last_seen_relative
    }

    /// Raw device data
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    #[must_use]
    pub fn analog_inputs(&self) -> Option<Vec<SensorInfo>> {
        self.sensors("analog_inputs", &["sensor_type"])
    }

    #[must_use]
    pub fn analog_temperature_sensors(&self) -> Option<Vec<SensorInfo>> {
        self.sensors("analog_temperature_sensors", &["type"])
    }

    #[must_use]
    pub fn boiler_adapters(&self) -> Option<Vec<SensorInfo>> {
        self.sensors("boiler_adapters", &["adapter_type", "type", "boiler_model"])
    }

    /// Look up a sensor's name by id across every sensor family
    #[must_use]
    pub fn sensor_name(&self, sensor_id: i64) -> Option<String> {
        SENSOR_FAMILIES
            .iter()
            .filter_map(|family| self.family(family))
            .flatten()
            .filter(|sensor| !sensor.is_null())
            .find(|sensor| sensor_id_of(sensor) == Some(sensor_id))
            .and_then(|sensor| sensor.get("name"))
            .filter(|name| !name.is_null())
            .map(to_text)
    }

    /// Replace this device's data with the entry of the same id from `devices`
    ///
    /// Returns `false` when no such entry exists.
    pub fn refresh_from(&mut self, devices: &[Self]) -> bool {
        let Some(fresh) = devices.iter().find(|d| d.id == self.id) else {
            return false;
        };
        self.name.clone_from(&fresh.name);
        self.data = fresh.data.clone();
        self.sync_last_seen();
        true
    }

    fn sync_last_seen(&mut self) {
        self.last_seen = self
            .data
            .get("last_receive_time")
            .and_then(|v| to_integer(v).ok())
            .unwrap_or(0);
        self.last_seen_relative = self
            .data
            .get("last_receive_time_relative")
            .and_then(|v| to_integer(v).ok())
            .unwrap_or(-1);
    }

    /// Entries of a `z3k_config` family, `None` unless it is a list
    fn family(&self, family: &str) -> Option<&Vec<Value>> {
        self.data.get("z3k_config")?.get(family)?.as_array()
    }

    fn sensors(&self, family: &'static str, extra_fields: &[&str]) -> Option<Vec<SensorInfo>> {
        let entries = self.family(family)?;
        let sensors = entries
            .iter()
            .map(|entry| SensorInfo {
                device_id: self.id,
                id: sensor_id_of(entry),
                family,
                name: entry.get("name").filter(|v| !v.is_null()).map(to_text),
                extra: extra_fields
                    .iter()
                    .map(|field| {
                        let value = entry.get(*field).cloned().unwrap_or(Value::Null);
                        ((*field).to_owned(), value)
                    })
                    .collect(),
            })
            .collect();
        Some(sensors)
    }
}

fn sensor_id_of(sensor: &Value) -> Option<i64> {
    sensor.get("id").and_then(|v| to_integer(v).ok())
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Device: {} (id={})", self.name, self.id)
    }
}
