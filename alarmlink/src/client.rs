//! Panel client

use std::sync::Arc;

use alarmlink_core::frame::{self, Frame};
use alarmlink_core::status::{decode_status_frame, is_status_frame};
use alarmlink_core::{Command, StateStore};
use alarmlink_transport::{RetryPolicy, Session, TcpTransport, Transport};
use alarmlink_types::{Area, ControlPanel, Entity, EntityId, Output, Zone};
use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::PanelConfig;
use crate::error::Result;
use crate::listener::Listeners;
use crate::poller::Poller;

/// Client for one security control panel
///
/// Cheap to clone; every clone talks over the same link and shares the
/// same state and listeners.
///
/// Commands are fire-and-forget. Link failures are retried, then logged and
/// dropped; the only errors a command returns are encoding errors, raised
/// before anything is written. Whether the panel acted on a command shows up
/// in the next status frame.
///
/// # Examples
///
/// ```no_run
/// use alarmlink::{Panel, PanelConfig};
///
/// #[tokio::main]
/// async fn main() -> alarmlink::Result<()> {
///     let panel = Panel::new(PanelConfig::new("192.168.1.50", 10001))?;
///
///     panel.add_state_listener(|id, entity| println!("{id}: {entity:?}"));
///     panel.start().await?;
///
///     panel.send_keys("1234#", true).await?;
///     panel.set_output(2, true).await;
///
///     panel.stop();
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Panel {
    inner: Arc<PanelInner>,
}

pub(crate) struct PanelInner {
    config: PanelConfig,
    session: Session,
    retry: RetryPolicy,
    state: StateStore,
    listeners: Listeners,
    poller: Mutex<Option<Poller>>,
}

impl Panel {
    /// Create a client that talks TCP to `config.host:config.port`
    ///
    /// Nothing is opened until [`start`](Self::start).
    pub fn new(config: PanelConfig) -> Result<Self> {
        let transport = TcpTransport::new(config.host.clone(), config.port)
            .with_connect_timeout(config.connect_timeout);
        Self::with_transport(config, Box::new(transport))
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: PanelConfig, transport: Box<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let panel = config.build_panel()?;
        let session = Session::with_read_timeout(transport, config.read_timeout);

        Ok(Self {
            inner: Arc::new(PanelInner {
                retry: config.retry_policy(),
                config,
                session,
                state: StateStore::new(panel),
                listeners: Listeners::default(),
                poller: Mutex::new(None),
            }),
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// Open the link and start polling if a poll interval is set
    ///
    /// # Errors
    ///
    /// Returns the transport error if the link cannot be opened; polling is
    /// not started in that case.
    pub async fn start(&self) -> Result<()> {
        self.inner.session.open().await?;
        info!("Connected to panel at {}:{}", self.inner.config.host, self.inner.config.port);

        if !self.inner.config.polling_enabled() {
            debug!("Polling disabled");
            return Ok(());
        }

        let mut poller = self.inner.poller.lock();
        if poller.as_ref().is_some_and(Poller::is_running) {
            debug!("Polling already running");
            return Ok(());
        }
        *poller = Some(Poller::spawn(
            Arc::downgrade(&self.inner),
            self.inner.config.poll_interval,
        ));

        Ok(())
    }

    /// Stop polling
    ///
    /// The link stays open, so commands keep working after `stop`.
    pub fn stop(&self) {
        if let Some(poller) = self.inner.poller.lock().take() {
            poller.stop();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.inner
            .poller
            .lock()
            .as_ref()
            .is_some_and(Poller::is_running)
    }

    pub fn is_connected(&self) -> bool {
        self.inner.session.is_connected()
    }

    /// Press keys in order, one exchange per key
    ///
    /// # Errors
    ///
    /// Returns an encoding error if any character is not `0-9`, `*` or `#`.
    /// No key is sent in that case.
    pub async fn send_keys(&self, keys: &str, update_after: bool) -> Result<()> {
        let frames = frame::encode_keys(keys)?;
        debug!("Sending {} keys", frames.len());

        for frame in &frames {
            self.inner.exchange(frame).await;
        }

        if update_after {
            self.inner.get_status().await;
        }
        Ok(())
    }

    /// Switch an output, unless it is already in the requested state
    ///
    /// Outputs outside the configured count are ignored.
    pub async fn set_output(&self, id: u8, on: bool) {
        let Some(current) = self.inner.state.with(|p| p.output(id).map(|o| o.on)) else {
            warn!(output = id, "No such output, ignoring");
            return;
        };
        if current == on {
            debug!(output = id, on, "Output already in requested state");
            return;
        }
        self.inner.send_command(Command::Output { id, on }).await;
    }

    /// Arm or disarm an area, unless it already is
    pub async fn set_arming(&self, area_id: u8, arm: bool) {
        let Some(mode) = self.inner.state.with(|p| p.area(area_id).map(|a| a.mode)) else {
            warn!(area = area_id, "No such area, ignoring arm request");
            return;
        };
        if mode.is_armed() == arm {
            debug!(area = area_id, %mode, "Area already in requested state");
            return;
        }
        let command = if arm { Command::Arm } else { Command::Disarm };
        self.inner.send_command(command).await;
    }

    /// Sound or silence the siren, unless it already is
    pub async fn set_siren(&self, on: bool) {
        if self.inner.state.with(|p| p.siren().on) == on {
            debug!(on, "Siren already in requested state");
            return;
        }
        let command = if on { Command::SirenOn } else { Command::SirenOff };
        self.inner.send_command(command).await;
    }

    /// Request a status frame and apply it
    pub async fn get_status(&self) {
        self.inner.get_status().await;
    }

    /// Register a callback for entity changes
    ///
    /// Each change runs every callback on its own task; callbacks may run
    /// concurrently and in any order.
    pub fn add_state_listener<F>(&self, listener: F)
    where
        F: Fn(EntityId, Entity) + Send + Sync + 'static,
    {
        self.inner.listeners.add_state(Arc::new(listener));
    }

    /// Register a callback for replies that are not status frames
    pub fn add_raw_data_listener<F>(&self, listener: F)
    where
        F: Fn(Bytes) + Send + Sync + 'static,
    {
        self.inner.listeners.add_raw(Arc::new(listener));
    }

    /// Clone of the current panel state
    pub fn snapshot(&self) -> ControlPanel {
        self.inner.state.snapshot()
    }

    pub fn zone(&self, id: u8) -> Option<Zone> {
        self.inner.state.with(|p| p.zone(id).copied())
    }

    pub fn area(&self, id: u8) -> Option<Area> {
        self.inner.state.with(|p| p.area(id).copied())
    }

    pub fn output(&self, id: u8) -> Option<Output> {
        self.inner.state.with(|p| p.output(id).copied())
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("host", &self.inner.config.host)
            .field("port", &self.inner.config.port)
            .field("session", &self.inner.session)
            .field("polling", &self.is_polling())
            .finish()
    }
}

impl PanelInner {
    pub(crate) async fn get_status(&self) {
        self.exchange(&frame::encode_status_request()).await;
    }

    async fn send_command(&self, command: Command) {
        match command.encode() {
            Ok(frame) => {
                debug!(%command, "Sending command");
                self.exchange(&frame).await;
            }
            Err(e) => error!(%command, "Cannot encode command: {}", e),
        }
    }

    /// One exchange under the retry policy, with the reply routed to state
    /// or raw listeners
    async fn exchange(&self, frame: &Frame) {
        if let Some(reply) = self.retry.exchange(&self.session, frame.as_bytes()).await {
            self.route_reply(reply.freeze());
        }
    }

    fn route_reply(&self, reply: Bytes) {
        if !is_status_frame(&reply) {
            self.listeners.dispatch_raw(reply);
            return;
        }

        match decode_status_frame(&reply) {
            Ok(fields) => {
                let changes = self.state.apply_status(&fields);
                if !changes.is_empty() {
                    debug!("Status frame changed {} fields", changes.len());
                }
                self.listeners.dispatch_changes(changes);
            }
            Err(e) => error!(frame = %hex::encode(&reply), "Dropping status frame: {}", e),
        }
    }
}

impl Drop for PanelInner {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.get_mut().take() {
            poller.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmlink_types::AreaMode;
    use pretty_assertions::assert_eq;

    fn offline_panel() -> Panel {
        Panel::new(PanelConfig::new("127.0.0.1", 10001)).unwrap()
    }

    #[tokio::test]
    async fn test_new_panel_is_idle() {
        let panel = offline_panel();
        assert!(!panel.is_connected());
        assert!(!panel.is_polling());
        assert_eq!(panel.snapshot(), ControlPanel::new(16, 1, 8).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Panel::new(PanelConfig::new("", 10001)).is_err());
        assert!(Panel::new(PanelConfig::new("panel", 10001).with_outputs(17)).is_err());
    }

    #[test]
    fn test_accessors() {
        let panel = offline_panel();
        assert_eq!(panel.zone(16), Some(Zone::new(16)));
        assert_eq!(panel.zone(17), None);
        assert_eq!(panel.area(1).map(|a| a.mode), Some(AreaMode::Disarmed));
        assert_eq!(panel.output(8), Some(Output::new(8)));
    }

    #[tokio::test]
    async fn test_send_keys_rejects_bad_key_before_io() {
        let panel = offline_panel();
        let err = panel.send_keys("12a", false).await.unwrap_err();
        assert!(err.is_encoding());
    }
}
