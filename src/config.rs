use std::time::Duration;

/// fixed settings for the refresh loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// the sampling window between the two reads of a cycle.
    pub interval: Duration,
    /// the pause after the first read of a cycle fails.
    pub retry_backoff: Duration,
    /// the pause after the second read of a cycle fails.
    pub resample_backoff: Duration,
    /// the glyph drawn for busy time.
    pub fill: char,
}

// === impl Config ===

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            retry_backoff: Duration::from_millis(1200),
            resample_backoff: Duration::from_secs(1),
            fill: '|',
        }
    }
}

#[cfg(test)]
impl Config {
    /// a configuration that never pauses.
    pub(crate) fn immediate() -> Self {
        Self {
            interval: Duration::ZERO,
            retry_backoff: Duration::ZERO,
            resample_backoff: Duration::ZERO,
            ..Self::default()
        }
    }
}
