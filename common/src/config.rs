use std::time::Duration;

/// How long the collector listens for replies when no override is given.
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for a single audit run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Name of the interface the probe is sent from.
    ///
    /// Never discovered automatically; the operator has to name it.
    pub interface: String,
    /// Length of the collection window.
    pub timeout: Duration,
    pub quiet: u8,
    pub no_banner: bool,
    /// Do not put the terminal into raw mode to watch for the `q` key.
    pub disable_input: bool,
}

impl ScanConfig {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            timeout: DEFAULT_SCAN_TIMEOUT,
            quiet: 0,
            no_banner: false,
            disable_input: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_default_timeout() {
        let cfg = ScanConfig::new("eth0");
        assert_eq!(cfg.interface, "eth0");
        assert_eq!(cfg.timeout, DEFAULT_SCAN_TIMEOUT);
        assert_eq!(cfg.quiet, 0);
    }

    #[test]
    fn with_timeout_overrides_default() {
        let cfg = ScanConfig::new("eth0").with_timeout(Duration::from_secs(3));
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }
}
