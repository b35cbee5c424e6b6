use std::time::Duration;

use ais_core::{VesselStore, VesselUpdate};
use chrono::Utc;
use futures::StreamExt;
use snafu::ResultExt;
use tracing::{debug, instrument, warn};

use crate::{
    aisstream::{AisSource, FrameStream},
    error::{
        AisMessageError, Error,
        ais_message_error::{JsonSnafu, UnsupportedMessageTypeSnafu},
        error::StreamClosedSnafu,
    },
    models::{AisMessageType, AisStreamMessage, MessageType},
};

/// Reads the ais stream for a fixed listen window and merges every message into a
/// [`VesselStore`].
pub struct Consumer {
    listen_window: Duration,
    receive_timeout: Duration,
    reconnect_delay: Duration,
    max_reconnect_delay: Duration,
}

/// Outcome of a single receive attempt.
enum Receive {
    Frame(String),
    Timeout,
    Failed(Error),
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub updates: u64,
    pub malformed: u64,
    pub unsupported: u64,
    pub timeouts: u64,
    pub connection_failures: u64,
}

impl Consumer {
    pub fn new(
        listen_window: Duration,
        receive_timeout: Duration,
        reconnect_delay: Duration,
        max_reconnect_delay: Duration,
    ) -> Consumer {
        Consumer {
            listen_window,
            receive_timeout,
            reconnect_delay,
            max_reconnect_delay,
        }
    }

    /// Consumes `source` until the listen window expires, which ends the session regardless of
    /// what the stream is doing at that moment.
    #[instrument(skip_all, fields(listen_window = ?self.listen_window))]
    pub async fn run<S>(&self, source: &S, store: &mut VesselStore) -> SessionStats
    where
        S: AisSource + ?Sized,
    {
        let mut stats = SessionStats::default();

        tokio::select! {
            _ = tokio::time::sleep(self.listen_window) => {}
            _ = self.consume(source, store, &mut stats) => {}
        }

        stats
    }

    async fn consume<S>(&self, source: &S, store: &mut VesselStore, stats: &mut SessionStats)
    where
        S: AisSource + ?Sized,
    {
        let mut reconnect_delay = self.reconnect_delay;

        loop {
            match source.connect().await {
                Ok(stream) => {
                    reconnect_delay = self.reconnect_delay;
                    let e = self.read_stream(stream, store, stats).await;
                    warn!("ais stream connection lost: {e:?}");
                }
                Err(e) => warn!("failed to connect to ais stream: {e:?}"),
            }

            stats.connection_failures += 1;

            // If the ais api is unresponsive we dont want to relentlessly spam it
            let delay = reconnect_delay.min(self.max_reconnect_delay);
            tokio::time::sleep(delay).await;
            reconnect_delay = delay.saturating_mul(2);
        }
    }

    /// Reads from a single connection until it fails, returning the reason.
    async fn read_stream(
        &self,
        mut stream: FrameStream,
        store: &mut VesselStore,
        stats: &mut SessionStats,
    ) -> Error {
        loop {
            match self.receive(&mut stream).await {
                Receive::Frame(frame) => {
                    stats.frames += 1;
                    match parse_message(&frame) {
                        Ok(update) => {
                            store.upsert(update, Utc::now());
                            stats.updates += 1;
                        }
                        Err(e) if e.is_malformed() => {
                            stats.malformed += 1;
                            debug!("dropping malformed ais message: {e:?}");
                        }
                        Err(e) => {
                            stats.unsupported += 1;
                            debug!("{e}");
                        }
                    }
                }
                Receive::Timeout => {
                    stats.timeouts += 1;
                    debug!("no ais message received within {:?}", self.receive_timeout);
                }
                Receive::Failed(e) => return e,
                Receive::Closed => return StreamClosedSnafu.build(),
            }
        }
    }

    async fn receive(&self, stream: &mut FrameStream) -> Receive {
        match tokio::time::timeout(self.receive_timeout, stream.next()).await {
            Err(_) => Receive::Timeout,
            Ok(None) => Receive::Closed,
            Ok(Some(Ok(frame))) => Receive::Frame(frame),
            Ok(Some(Err(e))) => Receive::Failed(e),
        }
    }
}

/// Decodes a single stream message into a normalized vessel update.
pub fn parse_message(message: &str) -> Result<VesselUpdate, AisMessageError> {
    let message_type: MessageType = serde_json::from_str(message).context(JsonSnafu)?;

    if message_type
        .message_type
        .parse::<AisMessageType>()
        .is_err()
    {
        return UnsupportedMessageTypeSnafu {
            message_type: message_type.message_type,
        }
        .fail();
    }

    let message: AisStreamMessage = serde_json::from_str(message).context(JsonSnafu)?;

    VesselUpdate::try_from(message)
}
