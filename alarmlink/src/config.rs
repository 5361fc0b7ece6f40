//! Client configuration

use std::time::Duration;

use alarmlink_core::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_POLL_INTERVAL, DEFAULT_READ_TIMEOUT, DEFAULT_RETRY_DELAY,
    MAX_RETRIES,
};
use alarmlink_core::DEFAULT_PORT;
use alarmlink_transport::RetryPolicy;
use alarmlink_types::ControlPanel;

use crate::error::{Error, Result};

/// Connection and panel-shape settings for a [`Panel`](crate::Panel)
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use alarmlink::PanelConfig;
///
/// let config = PanelConfig::new("192.168.1.50", 10001)
///     .with_zones(8)
///     .with_poll_interval(Duration::from_secs(10));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    pub host: String,
    pub port: u16,

    pub zones: u8,
    pub areas: u8,
    pub outputs: u8,

    /// Status polling period; zero disables polling
    pub poll_interval: Duration,

    pub read_timeout: Duration,
    pub connect_timeout: Duration,
    pub retry_delay: Duration,
    pub max_retries: u32,
}

impl PanelConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            zones: 16,
            areas: 1,
            outputs: 8,
            poll_interval: DEFAULT_POLL_INTERVAL,
            read_timeout: DEFAULT_READ_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_retries: MAX_RETRIES,
        }
    }

    /// Build from `PANEL_HOST`, `PANEL_PORT` and `PANEL_POLL_SECS`
    ///
    /// Only the host is required.
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("PANEL_HOST")
            .map_err(|_| Error::InvalidConfig("PANEL_HOST is not set".into()))?;

        let port = match std::env::var("PANEL_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::InvalidConfig(format!("PANEL_PORT is not a port: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };

        let mut config = Self::new(host, port);

        if let Ok(raw) = std::env::var("PANEL_POLL_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::InvalidConfig(format!("PANEL_POLL_SECS is not a number: {raw}"))
            })?;
            config.poll_interval = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_zones(mut self, zones: u8) -> Self {
        self.zones = zones;
        self
    }

    pub fn with_areas(mut self, areas: u8) -> Self {
        self.areas = areas;
        self
    }

    pub fn with_outputs(mut self, outputs: u8) -> Self {
        self.outputs = outputs;
        self
    }

    /// Set polling period (zero disables polling)
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set retry pause and budget for transient link failures
    pub fn with_retry(mut self, delay: Duration, max_retries: u32) -> Self {
        self.retry_delay = delay;
        self.max_retries = max_retries;
        self
    }

    pub fn polling_enabled(&self) -> bool {
        !self.poll_interval.is_zero()
    }

    /// Check host and entity counts
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::InvalidConfig("host is empty".into()));
        }
        if self.port == 0 {
            return Err(Error::InvalidConfig("port is zero".into()));
        }
        // Counts are checked against protocol maxima by the panel model
        ControlPanel::new(self.zones, self.areas, self.outputs)?;
        Ok(())
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay)
    }

    pub(crate) fn build_panel(&self) -> Result<ControlPanel> {
        Ok(ControlPanel::new(self.zones, self.areas, self.outputs)?)
    }
}
