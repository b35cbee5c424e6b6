use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to connect to the ais stream, url: '{url}'"))]
    Connect {
        #[snafu(implicit)]
        location: Location,
        url: String,
        #[snafu(source)]
        error: tokio_tungstenite::tungstenite::Error,
    },
    #[snafu(display("Failed to serialize the stream subscription"))]
    SerializeSubscription {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Failed to send the stream subscription"))]
    Subscribe {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tokio_tungstenite::tungstenite::Error,
    },
    #[snafu(display("Websocket error while receiving from the ais stream"))]
    WebSocket {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: tokio_tungstenite::tungstenite::Error,
    },
    #[snafu(display("Ais stream closed unexpectedly"))]
    StreamClosed {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("No ais stream api key is configured"))]
    MissingApiKey {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Failed to persist the vessel snapshot"))]
    Snapshot {
        #[snafu(implicit)]
        location: Location,
        source: ais_core::Error,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum AisMessageError {
    #[snafu(display("Failed to deserialize ais message"))]
    Json {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
    #[snafu(display("Ais message has no metadata"))]
    MissingMetaData {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Ais message metadata has no valid mmsi"))]
    MissingMmsi {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Encountered an unsupported message type: '{message_type}'"))]
    UnsupportedMessageType {
        #[snafu(implicit)]
        location: Location,
        message_type: String,
    },
}

impl AisMessageError {
    /// Malformed messages are broken input, unsupported ones are merely outside what we consume.
    pub fn is_malformed(&self) -> bool {
        match self {
            AisMessageError::Json { .. }
            | AisMessageError::MissingMetaData { .. }
            | AisMessageError::MissingMmsi { .. } => true,
            AisMessageError::UnsupportedMessageType { .. } => false,
        }
    }
}
