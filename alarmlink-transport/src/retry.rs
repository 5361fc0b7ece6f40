//! Retry policy for exchanges
//!
//! Transient link failures (read timeout, reset, closed) are retried after a
//! fixed pause. Once the consecutive failure count reaches the reconnect
//! threshold the session is reopened before the next attempt. Giving up on a
//! reset or closed link reopens it too, so the next exchange starts on a fresh
//! link. Any other error ends the exchange at once.

use std::time::Duration;

use alarmlink_core::constants::{DEFAULT_RETRY_DELAY, MAX_RETRIES, RECONNECT_AFTER};
use bytes::BytesMut;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::session::Session;

/// How an exchange reacts to transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Transient failures tolerated before giving up
    pub max_retries: u32,

    /// Pause before each retry
    pub delay: Duration,

    /// Failure count from which the link is reopened before retrying
    pub reconnect_after: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
            reconnect_after: RECONNECT_AFTER,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            ..Default::default()
        }
    }

    /// Run one exchange under this policy
    ///
    /// Returns the reply, or `None` once retries are exhausted or a
    /// non-transient error occurs. Failures are logged, never returned.
    pub async fn exchange(&self, session: &Session, frame: &[u8]) -> Option<BytesMut> {
        let mut failures = 0u32;

        loop {
            match session.exchange(frame).await {
                Ok(reply) => return Some(reply),
                Err(e) if e.is_transient() => {
                    failures += 1;
                    if failures > self.max_retries {
                        error!(
                            frame = %hex::encode(frame),
                            attempts = failures,
                            "Exchange failed, giving up: {}",
                            e
                        );
                        if matches!(e, Error::ConnectionReset | Error::ConnectionClosed) {
                            info!("Reopening link after it dropped");
                            if let Err(e) = session.open().await {
                                warn!("Reconnect failed: {}", e);
                            }
                        }
                        return None;
                    }

                    warn!(
                        attempt = failures,
                        "Exchange failed, retrying in {:?}: {}", self.delay, e
                    );
                    tokio::time::sleep(self.delay).await;

                    if failures >= self.reconnect_after {
                        info!("Reopening link after {} consecutive failures", failures);
                        if let Err(e) = session.open().await {
                            warn!("Reconnect failed: {}", e);
                        }
                    }
                }
                Err(e) => {
                    error!(frame = %hex::encode(frame), "Exchange failed: {}", e);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockTransport;
    use alarmlink_core::constants::STATUS_REQUEST;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;

    const FRAME: [u8; 11] = STATUS_REQUEST;

    fn mock_with_sends(sends: usize) -> MockTransport {
        let mut mock = MockTransport::new();
        mock.expect_remote_addr().returning(|| "mock:1".to_string());
        mock.expect_clear_input().times(sends).returning(|| Ok(()));
        mock.expect_send().times(sends).returning(|_| Ok(()));
        mock
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.delay, Duration::from_secs(2));
        assert_eq!(policy.reconnect_after, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_try() {
        let mut mock = mock_with_sends(1);
        mock.expect_receive()
            .times(1)
            .returning(|_, _| Ok(BytesMut::from(&[0x04u8][..])));
        mock.expect_connect().never();

        let session = Session::new(Box::new(mock));
        let reply = RetryPolicy::default().exchange(&session, &FRAME).await;

        assert_eq!(reply.as_deref(), Some(&[0x04u8][..]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_timeouts_give_up_after_one_reconnect() {
        let mut mock = mock_with_sends(3);
        mock.expect_receive()
            .times(3)
            .returning(|_, _| Err(Error::ReadTimeout));
        mock.expect_is_connected().return_const(true);
        mock.expect_disconnect().times(1).returning(|| Ok(()));
        mock.expect_connect().times(1).returning(|| Ok(()));

        let session = Session::new(Box::new(mock));
        let start = tokio::time::Instant::now();
        let reply = RetryPolicy::default().exchange(&session, &FRAME).await;

        assert!(reply.is_none());
        // Two pauses between three attempts
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_giving_up_on_reset_reopens_link() {
        let mut seq = Sequence::new();
        let mut mock = mock_with_sends(3);
        mock.expect_is_connected().return_const(false);

        mock.expect_receive()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::ConnectionReset));
        mock.expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_receive()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::ConnectionReset));
        mock.expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let session = Session::new(Box::new(mock));
        let start = tokio::time::Instant::now();
        let reply = RetryPolicy::default().exchange(&session, &FRAME).await;

        assert!(reply.is_none());
        assert!(session.is_connected());
        // No pause after the final attempt
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_precedes_third_attempt() {
        let mut seq = Sequence::new();
        let mut mock = MockTransport::new();
        mock.expect_remote_addr().returning(|| "mock:1".to_string());
        mock.expect_clear_input().returning(|| Ok(()));
        mock.expect_send().times(3).returning(|_| Ok(()));
        mock.expect_is_connected().return_const(false);

        mock.expect_receive()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::ConnectionReset));
        mock.expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        mock.expect_receive()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(BytesMut::from(&[0xAAu8][..])));

        let session = Session::new(Box::new(mock));
        let reply = RetryPolicy::default().exchange(&session, &FRAME).await;

        assert_eq!(reply.as_deref(), Some(&[0xAAu8][..]));
        assert!(session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_timeout_retries_without_reconnect() {
        let mut seq = Sequence::new();
        let mut mock = mock_with_sends(2);
        mock.expect_receive()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::ReadTimeout));
        mock.expect_receive()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(BytesMut::from(&[0x01u8][..])));
        mock.expect_connect().never();

        let session = Session::new(Box::new(mock));
        let reply = RetryPolicy::default().exchange(&session, &FRAME).await;

        assert!(reply.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_error_is_not_retried() {
        let mut mock = MockTransport::new();
        mock.expect_clear_input().times(1).returning(|| Ok(()));
        mock.expect_send()
            .times(1)
            .returning(|_| Err(Error::Io(std::io::Error::other("boom"))));
        mock.expect_receive().never();
        mock.expect_connect().never();

        let session = Session::new(Box::new(mock));
        let start = tokio::time::Instant::now();
        let reply = RetryPolicy::default().exchange(&session, &FRAME).await;

        assert!(reply.is_none());
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reconnect_still_retries() {
        let mut mock = mock_with_sends(3);
        mock.expect_receive()
            .times(3)
            .returning(|_, _| Err(Error::ReadTimeout));
        mock.expect_is_connected().return_const(false);
        mock.expect_connect()
            .times(1)
            .returning(|| Err(Error::ConnectionTimeout));

        let session = Session::new(Box::new(mock));
        assert!(RetryPolicy::default().exchange(&session, &FRAME).await.is_none());
    }
}
