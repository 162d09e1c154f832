//! Engine configuration.
//!
//! # Responsibility
//! - Collect the per-binding tunables: settle delay for string-backed
//!   loads and the embedded-resource acceptance toggles.
//!
//! # Invariants
//! - The settle delay is a fixed debounce, clamped to a sane ceiling; it
//!   is never adaptive.

use std::time::Duration;

/// Default settle delay before a string-backed binding accepts edits.
pub const SETTLE_DELAY_DEFAULT_MS: u64 = 100;
/// Ceiling applied to caller-provided settle delays.
pub const SETTLE_DELAY_MAX_MS: u64 = 10_000;
/// Default binding label used for log context.
pub const DEFAULT_BINDING_LABEL: &str = "composer";

/// Per-binding engine tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Milliseconds to let the surface settle after a string-backed load
    /// before edit events are accepted. Clamped to [`SETTLE_DELAY_MAX_MS`].
    pub settle_delay_ms: u64,
    /// Whether embedded resource references are resolved at all.
    pub allow_embedded: bool,
    /// Whether inline data-URI payloads are captured into the model.
    pub allow_data_uri: bool,
    /// Label attached to this binding's log lines.
    pub label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: SETTLE_DELAY_DEFAULT_MS,
            allow_embedded: true,
            allow_data_uri: false,
            label: DEFAULT_BINDING_LABEL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Returns the effective, clamped settle delay.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms.min(SETTLE_DELAY_MAX_MS))
    }
}
