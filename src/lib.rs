//! `zont_api` - Client library for the Zont building-automation telemetry API
//!
//! Zont devices (heating controllers with wired and radio sensors, boiler
//! adapters and heating circuits) report their history through a JSON/HTTP API.
//! Sensor readings come back as *delta-time arrays*, a compact encoding that
//! avoids repeating full UNIX timestamps. Device listings carry personal data
//! (phone numbers, SIM identifiers, locations) that must not reach the logs.
//!
//! This crate provides the two engines that make those payloads usable, plus
//! the thin client layer around them:
//! - **Decoding**: [`decode`] turns a delta-time array into absolute-timestamped
//!   points, with sort order control and duplicate filtering
//! - **Redaction**: [`redact`] masks or substitutes sensitive fields of any JSON
//!   tree according to a [`RedactionPolicy`]
//! - **Client**: [`Client`] lists devices and loads data through a caller-supplied
//!   [`Transport`]; no HTTP stack is linked
//!
//! # Example
//! ```
//! use serde_json::json;
//! use zont_api::{decode, DecodeOptions};
//!
//! let series = json!([[1000, 21.5], [-60, 21.6], [-60, 21.6], [1300, 22.0]]);
//! let points = decode(&series, DecodeOptions::default()).unwrap();
//!
//! let stamps: Vec<i64> = points.iter().map(|p| p.ts).collect();
//! assert_eq!(stamps, vec![1000, 1060, 1120, 1300]);
//! ```
//!
//! # Delta-Time Array Format
//!
//! A series is a JSON array of points. Each point is itself an array whose first
//! element is a signed integer and whose remaining elements are the payload:
//!
//! | Leading field | Meaning |
//! |---------------|---------|
//! | `> 0` | Absolute UNIX timestamp in seconds. Resets the running clock. |
//! | `< 0` | Seconds elapsed since the previous point. Advances the running clock. |
//! | `0` | Reserved sentinel. The point is skipped entirely. |
//!
//! The running clock starts at zero, so a series that opens with deltas resolves
//! them relative to the epoch. Payload elements are never inspected; a point may
//! carry no payload at all, a single scalar, or several values of any JSON type.
//!
//! ```text
//! [[1000, 1], [-10, 2], [-10, 3], [0, 666], [1030, 4]]
//!   => [[1000, 1], [1010, 2], [1020, 3], [1030, 4]]
//! ```
//!
//! # Redaction
//!
//! The policy holds three tables keyed by field name, matched at any depth:
//!
//! | Table | Field value | Action |
//! |-------|-------------|--------|
//! | scalars | null, bool, number, string | value replaced with `"***"` |
//! | mappings | object | enclosing object replaced with the configured substitute |
//! | sequences | array | enclosing object replaced with the configured substitute |
//!
//! A container match replaces the *whole enclosing object*, sibling fields
//! included. [`RedactionPolicy::default`] carries the built-in PII tables.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod constants;
mod decoder;
mod device;
mod envelope;
mod error;
mod point;
mod redact;
mod series;
mod stats;
mod value;


// Re-export public API
pub use client::{Client, Transport};
pub use config::Credentials;
pub use constants::{API_URL_BASE, DEFAULT_DATA_TYPES, MASK_TOKEN};
pub use decoder::{decode, decode_json, DecodeOptions};
pub use device::{Device, SensorInfo};
pub use envelope::{check_response, extract_load_data, load_data_request};
pub use error::{ApiError, DecodeError, TransportError};
pub use point::DecodedPoint;
pub use redact::{redact, redact_fields, redacted, RedactionPolicy};
pub use series::{collect_series, decode_document, SeriesSet};
pub use stats::SeriesStats;
