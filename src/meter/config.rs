//! Meter configuration

/// Default no-signal timeout: 5 minutes
pub const DEFAULT_TIMEOUT_US: u32 = 1_000_000 * 60 * 5;

/// Pulse meter configuration
///
/// Pin selection and interrupt registration live with the platform bring-up
/// code; this covers only the behavior of the meter core.
#[derive(Debug, Clone, Copy)]
pub struct PulseMeterConfig {
    /// No-signal duration after which a zero rate is reported once and the
    /// meter enters the timed-out state, in microseconds
    pub timeout_us: u32,

    /// Mirror the cumulative total to the sink whenever it changes
    pub report_total: bool,

    /// Mirror the forward total to the sink whenever it changes
    pub report_forward_total: bool,

    /// Mirror the reverse total to the sink whenever it changes
    pub report_reverse_total: bool,
}

impl Default for PulseMeterConfig {
    fn default() -> Self {
        Self {
            timeout_us: DEFAULT_TIMEOUT_US,
            report_total: false,
            report_forward_total: false,
            report_reverse_total: false,
        }
    }
}

impl PulseMeterConfig {
    /// Override the no-signal timeout
    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Enable mirroring of the cumulative total
    pub fn with_total_reporting(mut self) -> Self {
        self.report_total = true;
        self
    }

    /// Enable mirroring of the forward total
    pub fn with_forward_total_reporting(mut self) -> Self {
        self.report_forward_total = true;
        self
    }

    /// Enable mirroring of the reverse total
    pub fn with_reverse_total_reporting(mut self) -> Self {
        self.report_reverse_total = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_five_minutes() {
        let config = PulseMeterConfig::default();
        assert_eq!(config.timeout_us, 300_000_000);
        assert!(!config.report_total);
        assert!(!config.report_forward_total);
        assert!(!config.report_reverse_total);
    }

    #[test]
    fn test_builder_helpers() {
        let config = PulseMeterConfig::default()
            .with_timeout_us(1_000_000)
            .with_total_reporting()
            .with_forward_total_reporting()
            .with_reverse_total_reporting();

        assert_eq!(config.timeout_us, 1_000_000);
        assert!(config.report_total);
        assert!(config.report_forward_total);
        assert!(config.report_reverse_total);
    }
}
