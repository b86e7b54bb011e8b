//! Service constants: endpoints, environment variables, and built-in PII tables.

/// Base URL of the Zont API; routes such as `/devices` are appended to it
pub const API_URL_BASE: &str = "https://lk.zont-online.ru/api";

/// Replacement for sensitive scalar values
pub const MASK_TOKEN: &str = "***";

/// Data types requested by `load_data` when the caller names none (z3k subset)
pub const DEFAULT_DATA_TYPES: [&str; 4] = [
    "z3k_temperature",
    "z3k_heating_circuit",
    "z3k_boiler_adapter",
    "z3k_analog_input",
];

/// Window used by `load_data` when no interval is given (last minute)
pub(crate) const DEFAULT_WINDOW_SECS: i64 = 60;

pub(crate) const ENV_TOKEN: &str = "ZONT_API_TOKEN";
pub(crate) const ENV_TOKEN_FILE: &str = "ZONT_API_TOKEN_FILE";
pub(crate) const ENV_CLIENT: &str = "ZONT_API_CLIENT";
pub(crate) const ENV_CLIENT_FILE: &str = "ZONT_API_CLIENT_FILE";

pub(crate) const HEADER_CLIENT: &str = "X-ZONT-Client";
pub(crate) const HEADER_TOKEN: &str = "X-ZONT-Token";

/// Status codes attached to `ApiError`, mirroring the HTTP ones
pub(crate) const STATUS_BAD_REQUEST: u16 = 400;
pub(crate) const STATUS_FORBIDDEN: u16 = 403;
pub(crate) const STATUS_NOT_FOUND: u16 = 404;
pub(crate) const STATUS_INTERNAL: u16 = 500;

/// Device config families that hold sensors with `id` and `name` fields
pub(crate) const SENSOR_FAMILIES: [&str; 8] = [
    "analog_inputs",
    "analog_temperature_sensors",
    "boiler_adapters",
    "heating_circuits",
    "io_extensions",
    "radiosensors",
    "radiosensors433",
    "wired_temperature_sensors",
];

/// Scalar fields that may carry personal data
pub(crate) const PII_SCALARS: [&str; 12] = [
    "ip",
    "login",
    "netname",
    "operator",
    "owner_username",
    "pass",
    "password",
    "phone",
    "serial",
    "usbpassword",
    "user_id",
    "username",
];

/// Object field whose presence replaces the enclosing object
pub(crate) const PII_SIM_ID: &str = "sim_id";

/// Array field whose presence replaces the enclosing object
pub(crate) const PII_LOCATION: &str = "loc";

/// Largest substitute, in JSON nodes, a redaction policy keeps while settling
pub(crate) const MAX_SUBSTITUTE_NODES: usize = 1024;
