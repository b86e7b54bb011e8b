//! Decoding of every delta-time array in a `/load_data` response.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::decoder::{decode, DecodeOptions};
use crate::error::DecodeError;
use crate::point::DecodedPoint;
use crate::stats::SeriesStats;

/// Decoded series keyed by metric path, e.g. `z3k_heating_circuit.4343.worktime`
pub type SeriesSet = BTreeMap<String, Vec<DecodedPoint>>;

/// Decode all sensor series found in a device's load-data response
///
/// Walks each data type object (`z3k_temperature`, `z3k_boiler_adapter`, ...).
/// A sensor maps either directly to a delta-time array (`<type>.<sensor>`) or to
/// an object of per-metric arrays (`<type>.<sensor>.<metric>`). Empty arrays are
/// skipped. A series that fails to decode is logged and left out; the rest of
/// the response is still decoded.
#[must_use]
pub fn collect_series(response: &Value, opts: DecodeOptions) -> SeriesSet {
    let mut set = SeriesSet::new();
    let Some(data_types) = response.as_object() else {
        return set;
    };

    for (data_type, sensors) in data_types {
        let Some(sensors) = sensors.as_object() else {
            continue;
        };
        for (sensor_id, sensor) in sensors {
            match sensor {
                Value::Array(_) => {
                    let path = format!("{data_type}.{sensor_id}");
                    insert_decoded(&mut set, path, sensor, opts);
                }
                Value::Object(metrics) => {
                    for (metric, series) in metrics {
                        let path = format!("{data_type}.{sensor_id}.{metric}");
                        insert_decoded(&mut set, path, series, opts);
                    }
                }
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                    tracing::debug!(%data_type, %sensor_id, "ignoring scalar sensor entry");
                }
            }
        }
    }

    set
}

/// Decode a dumped API payload, whatever its shape
///
/// A top-level array is one delta-time array: it decodes to `[[ts, ...payload], ...]`
/// and its stats are recorded under `series`. Anything else is treated as a
/// load-data response and goes through [`collect_series`], giving an object keyed
/// by metric path.
///
/// # Errors
/// Only a malformed top-level array fails; malformed series inside a response
/// are skipped.
pub fn decode_document(
    input: &Value,
    opts: DecodeOptions,
) -> Result<(Value, SeriesStats), DecodeError> {
    let mut stats = SeriesStats::new();
    if input.is_array() {
        let points = decode(input, opts)?;
        stats.update("series", &points);
        return Ok((Value::Array(points.into_iter().map(Value::from).collect()), stats));
    }

    let mut out = Map::new();
    for (metric, points) in collect_series(input, opts) {
        stats.update(&metric, &points);
        out.insert(metric, Value::Array(points.into_iter().map(Value::from).collect()));
    }
    Ok((Value::Object(out), stats))
}

fn insert_decoded(set: &mut SeriesSet, metric: String, series: &Value, opts: DecodeOptions) {
    if series.as_array().is_some_and(Vec::is_empty) {
        return;
    }
    match decode(series, opts) {
        Ok(points) => {
            tracing::trace!(%metric, points = points.len(), "decoded series");
            set.insert(metric, points);
        }
        Err(e) => tracing::warn!(%metric, error = %e, "skipping malformed series"),
    }
}
