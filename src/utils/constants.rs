/// Record layout
pub const TDV_FIELD_COUNT: usize = 9;
pub const REGION_CODE_LEN: usize = 2;

/// Unit conversion
pub const MILLIS_PER_SECOND: i64 = 1000;
pub const KELVIN_TO_FAHRENHEIT_SCALE: f64 = 1.8;
pub const KELVIN_TO_FAHRENHEIT_OFFSET: f64 = 459.67;

/// Report formatting
pub const REPORT_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";
pub const REPORT_SEPARATOR: &str = "---------------------------";

/// Report output formats
pub const FORMAT_TEXT: &str = "text";
pub const FORMAT_JSON: &str = "json";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_MAX_ERRORS: usize = 10;
