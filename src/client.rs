//! Zont API client over a caller-supplied transport.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};

use crate::config::{user_agent, Credentials};
use crate::constants::{API_URL_BASE, DEFAULT_WINDOW_SECS};
use crate::decoder::DecodeOptions;
use crate::device::Device;
use crate::envelope::{check_response, extract_load_data, load_data_request};
use crate::error::{ApiError, TransportError};
use crate::redact::{redact_fields, RedactionPolicy};
use crate::series::{collect_series, SeriesSet};

/// Sends one JSON request and returns the decoded JSON response
///
/// Implementations own everything below the JSON layer: HTTP, TLS, timeouts.
/// `Ok(None)` stands for an empty response body.
pub trait Transport {
    /// POST `body` to `url` with `headers`
    ///
    /// # Errors
    /// Any failure to obtain a decoded response.
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
    ) -> Result<Option<Value>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
    ) -> Result<Option<Value>, TransportError> {
        (**self).post(url, headers, body)
    }
}

/// Client for the Zont API
///
/// Device listings are redacted with the client's [`RedactionPolicy`] before
/// they are logged or returned.
#[derive(Debug)]
pub struct Client<T> {
    transport: T,
    credentials: Credentials,
    policy: RedactionPolicy,
    base_url: String,
}

impl<T: Transport> Client<T> {
    #[must_use]
    pub fn new(transport: T, credentials: Credentials) -> Self {
        tracing::info!(
            user_agent = %user_agent(),
            client = %credentials.client(),
            "client initialized"
        );
        Self {
            transport,
            credentials,
            policy: RedactionPolicy::default(),
            base_url: API_URL_BASE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RedactionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub const fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    /// POST `body` to `route` and validate the response envelope
    ///
    /// # Errors
    /// * 500 "API call failed" - the transport failed; its message is the description
    /// * status from [`check_response`] - the response is not `ok`
    pub fn api_request(&self, route: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        let url = format!("{}{route}", self.base_url);
        let Some(result) = self.transport.post(&url, &self.credentials.headers(), body)? else {
            return Ok(None);
        };
        check_response(&result, &format!("API call to {route}"))?;
        Ok(Some(result))
    }

    /// List the account's devices, with personal data redacted
    ///
    /// # Errors
    /// Request failures, or a device entry without `id` or `name`.
    pub fn get_devices(&self) -> Result<Vec<Device>, ApiError> {
        let result = self
            .api_request("/devices", &json!({ "load_io": true }))
            .inspect_err(|e| tracing::error!(error = %e, "get_devices failed"))?;

        let raw_devices = match result {
            Some(Value::Object(mut root)) => match root.remove("devices") {
                Some(Value::Array(devices)) => devices,
                _ => return Ok(Vec::new()),
            },
            _ => return Ok(Vec::new()),
        };

        raw_devices
            .into_iter()
            .map(|mut data| {
                if let Value::Object(fields) = &mut data {
                    redact_fields(fields, &self.policy);
                }
                tracing::debug!(device = %data, "device found");
                Device::from_json(data)
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::error!(error = %e, "get_devices failed"))
    }

    /// Refresh `device` from a new device listing
    ///
    /// Returns `false` when the device is no longer listed.
    ///
    /// # Errors
    /// Same as [`Client::get_devices`].
    pub fn update_device(&self, device: &mut Device) -> Result<bool, ApiError> {
        let devices = self.get_devices()?;
        Ok(device.refresh_from(&devices))
    }

    /// Load raw data of `device_id` for the given data types and interval
    ///
    /// `interval` is `(from, to)` in UNIX seconds and defaults to the last minute;
    /// empty `data_types` selects the z3k defaults. The result maps data types to
    /// sensor delta-time arrays.
    ///
    /// # Errors
    /// Request failures and the errors of [`extract_load_data`].
    pub fn load_data(
        &self,
        device_id: i64,
        data_types: &[&str],
        interval: Option<(i64, i64)>,
    ) -> Result<Value, ApiError> {
        let interval = interval.unwrap_or_else(|| {
            let now = unix_now();
            (now - DEFAULT_WINDOW_SECS, now)
        });

        let result = self
            .api_request("/load_data", &load_data_request(device_id, data_types, interval))
            .inspect_err(|e| tracing::error!(device_id, error = %e, "load_data failed"))?;
        tracing::debug!(device_id, result = ?result, "load_data");

        extract_load_data(result.unwrap_or(Value::Null), device_id)
    }

    /// Load data of `device_id` and decode every series in it
    ///
    /// Malformed series are logged and skipped.
    ///
    /// # Errors
    /// Same as [`Client::load_data`].
    pub fn load_series(
        &self,
        device_id: i64,
        data_types: &[&str],
        interval: Option<(i64, i64)>,
        opts: DecodeOptions,
    ) -> Result<SeriesSet, ApiError> {
        let response = self.load_data(device_id, data_types, interval)?;
        Ok(collect_series(&response, opts))
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}
