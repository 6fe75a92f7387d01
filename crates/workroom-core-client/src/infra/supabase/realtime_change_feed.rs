// workroom/workroom-core-client
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::SplitStream;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use workroom_wasm_utils::{spawn, ScheduledTasks};

use crate::domain::participants::models::{FeedEvent, RowChange};
use crate::domain::participants::services::{ChangeFeedService, FeedEventHandler};
use crate::domain::shared::models::{StoreError, SubscriptionId};

use super::records::ChangeData;
use super::{SupabaseConfig, USERS_TABLE};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);
const JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// The change feed of the `users` table, received over a Supabase Realtime channel.
///
/// Every subscription uses its own websocket connection. A dropped connection is reported once as
/// `FeedEvent::Lost` and not re-established.
pub struct RealtimeChangeFeed {
    config: SupabaseConfig,
    channels: Mutex<HashMap<SubscriptionId, Channel>>,
    next_ref: Arc<AtomicU64>,
}

struct Channel {
    topic: String,
    outgoing: UnboundedSender<Message>,
    /// Heartbeat and reader. The writer is not part of it so that it can flush the leave message.
    tasks: ScheduledTasks,
}

/// A message of the Phoenix channels protocol.
#[derive(Debug, Serialize, Deserialize)]
struct PhoenixMessage {
    topic: String,
    event: String,
    #[serde(default)]
    payload: Value,
    #[serde(rename = "ref", default)]
    reference: Option<String>,
}

impl PhoenixMessage {
    fn new(topic: impl Into<String>, event: &str, payload: Value, reference: String) -> Self {
        Self {
            topic: topic.into(),
            event: event.to_string(),
            payload,
            reference: Some(reference),
        }
    }

    fn into_message(self) -> Result<Message, StoreError> {
        Ok(Message::Text(serde_json::to_string(&self)?))
    }
}

impl RealtimeChangeFeed {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            channels: Default::default(),
            next_ref: Arc::new(AtomicU64::new(1)),
        }
    }

    fn next_ref(&self) -> String {
        self.next_ref.fetch_add(1, Ordering::Relaxed).to_string()
    }

    fn join_message(&self, topic: &str, reference: String) -> PhoenixMessage {
        PhoenixMessage::new(
            topic,
            "phx_join",
            json!({
                "config": {
                    "broadcast": { "ack": false, "self": false },
                    "presence": { "key": "" },
                    "postgres_changes": [
                        { "event": "*", "schema": "public", "table": USERS_TABLE }
                    ],
                    "private": false
                },
                "access_token": self.config.api_key.expose_secret()
            }),
            reference,
        )
    }
}

#[async_trait]
impl ChangeFeedService for RealtimeChangeFeed {
    #[tracing::instrument(skip(self, handler))]
    async fn subscribe(&self, handler: FeedEventHandler) -> Result<SubscriptionId> {
        let subscription_id = SubscriptionId::from(format!("workroom-{}", self.next_ref()));
        let topic = format!("realtime:{subscription_id}");

        let (socket, _) = connect_async(self.config.realtime_url()?.as_str())
            .await
            .map_err(|err| StoreError::SubscriptionFailure(err.to_string()))?;
        let (mut sink, mut stream) = socket.split();

        let join_ref = self.next_ref();
        sink.send(self.join_message(&topic, join_ref.clone()).into_message()?)
            .await
            .map_err(StoreError::from)?;

        tokio::time::timeout(JOIN_TIMEOUT, await_join_reply(&mut stream, &join_ref))
            .await
            .map_err(|_| {
                StoreError::SubscriptionFailure("Timed out while joining the channel".to_string())
            })??;
        info!("Joined realtime channel {topic}.");

        let (outgoing, mut outgoing_receiver) = unbounded_channel::<Message>();

        spawn(async move {
            while let Some(message) = outgoing_receiver.recv().await {
                if let Err(err) = sink.send(message).await {
                    warn!("Failed to send realtime message. {}", err.to_string());
                    break;
                }
            }
            _ = sink.close().await;
        });

        let mut tasks = ScheduledTasks::new();
        {
            let outgoing = outgoing.clone();
            let next_ref = self.next_ref.clone();
            tasks.spawn_repeating(HEARTBEAT_INTERVAL, false, move || {
                let reference = next_ref.fetch_add(1, Ordering::Relaxed).to_string();
                let heartbeat =
                    PhoenixMessage::new("phoenix", "heartbeat", json!({}), reference).into_message();
                let outgoing = outgoing.clone();
                async move {
                    if let Ok(heartbeat) = heartbeat {
                        _ = outgoing.send(heartbeat);
                    }
                }
            });
        }
        tasks.spawn(read_changes(stream, topic.clone(), handler));

        self.channels.lock().insert(
            subscription_id.clone(),
            Channel {
                topic,
                outgoing,
                tasks,
            },
        );

        Ok(subscription_id)
    }

    #[tracing::instrument(skip(self))]
    async fn unsubscribe(&self, subscription_id: &SubscriptionId) -> Result<()> {
        let Some(mut channel) = self.channels.lock().remove(subscription_id) else {
            return Err(StoreError::SubscriptionFailure(format!(
                "Unknown subscription {subscription_id}"
            ))
            .into());
        };

        channel.tasks.cancel_all();

        let leave =
            PhoenixMessage::new(&channel.topic, "phx_leave", json!({}), self.next_ref()).into_message()?;
        _ = channel.outgoing.send(leave);
        _ = channel.outgoing.send(Message::Close(None));

        info!("Left realtime channel {}.", channel.topic);
        Ok(())
    }
}

async fn await_join_reply(
    stream: &mut SplitStream<Socket>,
    join_ref: &str,
) -> Result<(), StoreError> {
    while let Some(message) = stream.next().await {
        let Message::Text(text) = message? else {
            continue;
        };
        let Ok(message) = serde_json::from_str::<PhoenixMessage>(&text) else {
            continue;
        };
        if message.event != "phx_reply" || message.reference.as_deref() != Some(join_ref) {
            continue;
        }

        return match message.payload.get("status").and_then(Value::as_str) {
            Some("ok") => Ok(()),
            _ => Err(StoreError::SubscriptionFailure(format!(
                "Join was rejected: {}",
                message.payload
            ))),
        };
    }

    Err(StoreError::SubscriptionFailure(
        "Connection closed before the join was confirmed".to_string(),
    ))
}

/// Forwards the changes of `topic` to `handler` until the connection drops.
async fn read_changes(mut stream: SplitStream<Socket>, topic: String, handler: FeedEventHandler) {
    let reason = loop {
        let text = match stream.next().await {
            None => break "Connection closed".to_string(),
            Some(Err(err)) => break err.to_string(),
            Some(Ok(Message::Close(frame))) => break format!("Connection closed by server {frame:?}"),
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(_)) => continue,
        };

        let message = match serde_json::from_str::<PhoenixMessage>(&text) {
            Ok(message) => message,
            Err(err) => {
                warn!("Ignoring unparsable realtime message. {}", err.to_string());
                continue;
            }
        };

        if message.topic != topic {
            continue;
        }

        match message.event.as_str() {
            "postgres_changes" => match parse_change(message.payload) {
                Ok(change) => handler(FeedEvent::Change(change)),
                Err(err) => warn!("Ignoring malformed change. {}", err.to_string()),
            },
            "phx_error" | "phx_close" => break format!("Channel reported {}", message.event),
            "system" if message.payload.get("status").and_then(Value::as_str) == Some("error") => {
                break format!("Channel reported error {}", message.payload)
            }
            event => debug!("Ignoring realtime event {event}."),
        }
    };

    error!("{}", StoreError::SubscriptionFailure(reason.clone()));
    handler(FeedEvent::Lost { reason });
}

fn parse_change(mut payload: Value) -> Result<RowChange, StoreError> {
    let data = payload
        .get_mut("data")
        .map(Value::take)
        .unwrap_or_default();
    let data = serde_json::from_value::<ChangeData>(data)?;
    RowChange::try_from(data)
}
