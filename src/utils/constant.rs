//! # Application Constants
//!
//! Defaults used when the environment does not say otherwise.

/// Listen address of the demo server
pub const DEFAULT_ADDR: &str = "0.0.0.0:8090";

/// Filter directive used when `LOG_LEVEL` is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Service name stamped on JSON log records
pub const DEFAULT_LOG_NAME: &str = "faultline";

/// Layout of the stock-keeping units accepted by the demo API: three
/// uppercase letters, a dash and four digits
pub const SKU_PREFIX_LEN: usize = 3;
pub const SKU_DIGITS_LEN: usize = 4;
