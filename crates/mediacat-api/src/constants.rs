//! API constants

/// Versioned prefix for the JSON API
pub const API_PREFIX: &str = "/api/v1";

/// Prefix of the dashboard routes, which share the API handlers
pub const DASHBOARD_PREFIX: &str = "/dashboard";

/// Room allowed on top of the upload limit for multipart boundaries and form fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const HTTP_CONCURRENCY_LIMIT: usize = 1_024;

/// Seconds a health probe may take before it is reported as a timeout
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
