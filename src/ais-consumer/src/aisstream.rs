use async_trait::async_trait;
use futures::{SinkExt, StreamExt, stream::BoxStream};
use serde::Serialize;
use snafu::ResultExt;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, instrument};

use crate::{
    error::{
        Result,
        error::{ConnectSnafu, SerializeSubscriptionSnafu, SubscribeSnafu, WebSocketSnafu},
    },
    settings::BoundingBox,
};

/// A stream of raw, undecoded ais messages.
pub type FrameStream = BoxStream<'static, Result<String>>;

/// A source of ais messages that can be (re)connected to.
#[async_trait]
pub trait AisSource: Send + Sync {
    /// Opens a new connection and returns the stream of messages it receives.
    async fn connect(&self) -> Result<FrameStream>;
}

pub struct AisStreamClient {
    api_key: String,
    api_address: String,
    bounding_boxes: Vec<BoundingBox>,
    message_types: Vec<String>,
}

#[derive(Serialize)]
struct Subscription<'a> {
    #[serde(rename = "APIKey")]
    api_key: &'a str,
    #[serde(rename = "BoundingBoxes")]
    bounding_boxes: &'a [BoundingBox],
    #[serde(rename = "FilterMessageTypes")]
    filter_message_types: &'a [String],
}

impl AisStreamClient {
    pub fn new(
        api_key: String,
        api_address: String,
        bounding_boxes: Vec<BoundingBox>,
        message_types: Vec<String>,
    ) -> AisStreamClient {
        AisStreamClient {
            api_key,
            api_address,
            bounding_boxes,
            message_types,
        }
    }

    fn subscription(&self) -> Result<String> {
        let subscription = Subscription {
            api_key: &self.api_key,
            bounding_boxes: &self.bounding_boxes,
            filter_message_types: &self.message_types,
        };
        serde_json::to_string(&subscription).context(SerializeSubscriptionSnafu)
    }
}

#[async_trait]
impl AisSource for AisStreamClient {
    #[instrument(skip(self), fields(url = %self.api_address))]
    async fn connect(&self) -> Result<FrameStream> {
        let (mut socket, _response) =
            connect_async(self.api_address.as_str())
                .await
                .context(ConnectSnafu {
                    url: &self.api_address,
                })?;

        // The subscription has to be sent shortly after connecting or the server closes the
        // connection.
        socket
            .send(Message::Text(self.subscription()?.into()))
            .await
            .context(SubscribeSnafu)?;

        info!("subscribed to ais stream");

        let stream = socket.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => Some(Ok(text)),
                    Err(e) => {
                        debug!("discarding non utf-8 binary frame: {e:?}");
                        None
                    }
                },
                Ok(Message::Close(frame)) => {
                    info!("ais stream sent close frame: {frame:?}");
                    None
                }
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => None,
                Err(e) => Some(Err::<String, _>(e).context(WebSocketSnafu)),
            }
        });

        Ok(stream.boxed())
    }
}
