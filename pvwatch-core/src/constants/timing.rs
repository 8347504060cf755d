//! Scheduling Constants

/// Default sampling period (ms).
///
/// One sample–compute–render cycle every two seconds keeps the OLED
/// readable and the DHT22 inside its minimum read interval.
///
/// Source: DHT22 datasheet (>= 2 s between reads)
pub const DEFAULT_SAMPLE_PERIOD_MS: u32 = 2000;

/// Fast sampling period (ms) for bench diagnostics with a DHT11-class sensor.
pub const FAST_SAMPLE_PERIOD_MS: u32 = 1000;
