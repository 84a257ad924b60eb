use std::collections::HashMap;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

pub const DEFAULT_CAPACITY: usize = 100;

/// Upper bound on the per-topic buffer. Each topic preallocates its buffer
/// on first subscribe.
pub const MAX_CAPACITY: usize = 65_536;

/// In-memory publish/subscribe bus keyed by topic name.
///
/// Cloning the bus is cheap; clones share the same topics. Each topic is a
/// `broadcast` channel, so every subscriber sees every payload published
/// after it subscribed, in publish order.
pub struct PubSub<T> {
    topics: Arc<Mutex<HashMap<String, broadcast::Sender<T>>>>,
    capacity: usize,
}

impl<T> Clone for PubSub<T> {
    fn clone(&self) -> Self {
        Self {
            topics: Arc::clone(&self.topics),
            capacity: self.capacity,
        }
    }
}

impl<T> Default for PubSub<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> PubSub<T>
where
    T: Clone + Send + 'static,
{
    /// `capacity` bounds how far a subscriber may fall behind before it
    /// starts skipping events. Clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let clamped = capacity.clamp(1, MAX_CAPACITY);
        if clamped != capacity {
            tracing::warn!(
                requested = capacity,
                capacity = clamped,
                "Pub/sub capacity out of range, clamped"
            );
        }

        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            capacity: clamped,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a subscriber on `topic`, creating the topic on first use.
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<T> {
        let mut topics = self.topics.lock();
        match topics.get(topic) {
            Some(sender) => sender.subscribe(),
            None => {
                let (sender, receiver) = broadcast::channel(self.capacity);
                topics.insert(topic.to_owned(), sender);
                tracing::debug!(topic, "Created pub/sub topic");
                receiver
            }
        }
    }

    /// Subscribe to `topic` as a stream. Lagged subscribers skip the events
    /// that were overwritten and keep receiving.
    pub fn subscribe_stream(&self, topic: &str) -> impl Stream<Item = T> + Send + 'static {
        let topic = topic.to_owned();
        BroadcastStream::new(self.subscribe(&topic)).filter_map(move |item| {
            let payload = match item {
                Ok(payload) => Some(payload),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(topic = %topic, skipped, "Subscriber lagged, events dropped");
                    None
                }
            };
            async move { payload }
        })
    }

    /// Publish `payload` to every current subscriber of `topic`.
    ///
    /// Returns the number of subscribers the payload was queued for. A topic
    /// with no live subscribers is dropped from the bus.
    pub fn publish(&self, topic: &str, payload: T) -> usize {
        let mut topics = self.topics.lock();
        let Some(sender) = topics.get(topic) else {
            return 0;
        };

        match sender.send(payload) {
            Ok(delivered) => delivered,
            Err(_) => {
                topics.remove(topic);
                tracing::debug!(topic, "Pruned pub/sub topic without subscribers");
                0
            }
        }
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .lock()
            .get(topic)
            .map(broadcast::Sender::receiver_count)
            .unwrap_or(0)
    }

    pub fn topic_count(&self) -> usize {
        self.topics.lock().len()
    }
}
