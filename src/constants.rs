//! Application constants for the Fridge-tag parser
//!
//! Key names of the Fridge-tag text export, sentinel values, and defaults
//! for the CLI and HTTP front ends.

// =============================================================================
// Text Format Keys
// =============================================================================

/// Literal key names that introduce a section even when followed by inline
/// `key: value` pairs on the same line (numeric keys qualify as well)
pub const SECTION_HEADER_KEYS: &[&str] = &["Conf", "Cert", "Alarm", "Int Sensor", "Hist", "Checked"];

/// History section key
pub const HISTORY_KEY: &str = "Hist";

/// Activation timestamp key (written inside the history section by the device)
pub const ACTIVATION_TIMESTAMP_KEY: &str = "TS Actv";

/// Report creation timestamp key (written inside the history section by the device)
pub const REPORT_CREATION_TIMESTAMP_KEY: &str = "TS Report Creation";

/// Keys lifted out of the history section back to the document root
pub const RELOCATED_HISTORY_KEYS: &[&str] =
    &[ACTIVATION_TIMESTAMP_KEY, REPORT_CREATION_TIMESTAMP_KEY];

/// Separator between inline values on one line
pub const INLINE_SEPARATOR: &str = ", ";

/// Marker that a value part contains inline `key: value` pairs
pub const INLINE_PAIR_MARKER: &str = ": ";

/// Sub-keys of the configuration's internal sensor section
pub mod internal_sensor {
    pub const TIMEOUT: &str = "Timeout";
    pub const OFFSET: &str = "Offset";
}

// =============================================================================
// Value Normalization
// =============================================================================

/// Placeholder the device writes for "no value"
pub const MISSING_VALUE_SENTINEL: &str = "---";

// =============================================================================
// Service Defaults
// =============================================================================

/// Application name used for config directories and env prefixes
pub const APP_NAME: &str = "fridgetag";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "FRIDGETAG";

/// Default bind address for the HTTP service
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port for the HTTP service
pub const DEFAULT_PORT: u16 = 8000;

/// Default upload limit (10 MiB; real exports are a few KiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default log level when nothing else is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted log level names
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Upload endpoint path
pub const PARSE_ROUTE: &str = "/parse-fridgetag/";

/// Multipart field carrying the uploaded export
pub const UPLOAD_FIELD: &str = "file";

/// Required upload file extension
pub const UPLOAD_EXTENSION: &str = ".txt";

/// Service description returned by the info endpoint
pub const SERVICE_DESCRIPTION: &str =
    "Temperature monitoring data parser for DHIS2 cold chain integration";

/// Devices whose exports this parser understands
pub const SUPPORTED_DEVICES: &[&str] = &["Fridge-tag 2", "Fridge-tag 2L", "Fridge-tag 2E"];
