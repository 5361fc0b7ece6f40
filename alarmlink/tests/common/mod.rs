//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use alarmlink::{Entity, EntityId, Panel, PanelConfig};
use alarmlink_transport::{Error, Result, Transport};
use async_trait::async_trait;
use bytes::BytesMut;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Build a 13-byte status frame
pub fn status_frame(zones_triggered: [u8; 2], area: u8, outputs: [u8; 2], clock: u8) -> Vec<u8> {
    let mut frame = vec![0u8; 13];
    frame[0] = 0x04;
    frame[1..3].copy_from_slice(&outputs);
    frame[3..5].copy_from_slice(&zones_triggered);
    frame[9] = area;
    frame[10] = clock;
    frame
}

/// What the scripted transport saw, shared with the test
#[derive(Clone, Default)]
pub struct Script {
    replies: Arc<Mutex<VecDeque<Result<Vec<u8>>>>>,
    fallback: Arc<Mutex<Option<Vec<u8>>>>,
    written: Arc<Mutex<Vec<Vec<u8>>>>,
    connects: Arc<Mutex<usize>>,
}

impl Script {
    pub fn reply(&self, bytes: impl Into<Vec<u8>>) -> &Self {
        self.replies.lock().push_back(Ok(bytes.into()));
        self
    }

    pub fn fail(&self, error: Error) -> &Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// Reply used once the queue runs dry; without one, reads time out
    pub fn fallback(&self, bytes: impl Into<Vec<u8>>) {
        *self.fallback.lock() = Some(bytes.into());
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().clone()
    }

    pub fn connects(&self) -> usize {
        *self.connects.lock()
    }

    pub fn transport(&self) -> Box<dyn Transport> {
        Box::new(ScriptedTransport {
            script: self.clone(),
            connected: false,
        })
    }
}

/// In-memory transport that answers from a [`Script`]
pub struct ScriptedTransport {
    script: Script,
    connected: bool,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn connect(&mut self) -> Result<()> {
        *self.script.connects.lock() += 1;
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn clear_input(&mut self) -> Result<()> {
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.script.written.lock().push(data.to_vec());
        Ok(())
    }

    async fn receive(&mut self, _max_len: usize, timeout: Duration) -> Result<BytesMut> {
        let next = self.script.replies.lock().pop_front();
        let fallback = self.script.fallback.lock().clone();
        match (next, fallback) {
            (Some(reply), _) => reply.map(|bytes| BytesMut::from(&bytes[..])),
            (None, Some(bytes)) => Ok(BytesMut::from(&bytes[..])),
            (None, None) => {
                tokio::time::sleep(timeout).await;
                Err(Error::ReadTimeout)
            }
        }
    }

    fn remote_addr(&self) -> String {
        "scripted".to_string()
    }
}

/// Config with polling off, so only explicit calls touch the transport
pub fn quiet_config() -> PanelConfig {
    PanelConfig::new("scripted", 10001).with_poll_interval(Duration::ZERO)
}

/// Forward every state change into a channel
pub fn record_changes(panel: &Panel) -> mpsc::UnboundedReceiver<(EntityId, Entity)> {
    let (tx, rx) = mpsc::unbounded_channel();
    panel.add_state_listener(move |id, entity| {
        let _ = tx.send((id, entity));
    });
    rx
}

/// Wait briefly and confirm nothing more arrives
pub async fn assert_quiet<T: std::fmt::Debug>(rx: &mut mpsc::UnboundedReceiver<T>) {
    if let Ok(Some(extra)) = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
        panic!("unexpected extra event: {extra:?}");
    }
}
