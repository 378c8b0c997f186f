/// User agent sent on every outbound provider request.
pub const USER_AGENT: &str = concat!("cityscout/", env!("CARGO_PKG_VERSION"));

/// Default per-category TTLs, all in milliseconds.
///
/// Darksky has a daily request quota, so the forecast TTL is deliberately
/// short while exercising the invalidation path often.
pub const DEFAULT_FORECAST_TTL_MS: u64 = 15 * 1000;
pub const DEFAULT_PLACES_TTL_MS: u64 = 24 * 60 * 60 * 1000;
pub const DEFAULT_EVENTS_TTL_MS: u64 = 24 * 60 * 60 * 1000;
pub const DEFAULT_TRAILS_TTL_MS: u64 = 30 * 24 * 60 * 60 * 1000;
