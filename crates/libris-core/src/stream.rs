//! Replay-latest broadcast stream
//!
//! A small synchronous pub-sub primitive: an ordered list of subscriber
//! callbacks plus a last-known-value cell. New subscribers immediately
//! receive the most recent published value (when one exists), then every
//! later publication. Delivery happens on the publisher's call stack, in
//! subscription order.

/// Handle returned by [`Broadcast::subscribe`], used to unsubscribe
pub type SubscriberId = usize;

type Callback<T> = Box<dyn FnMut(&T)>;

/// Single-producer, multi-subscriber broadcast channel with replay of the
/// latest value
pub struct Broadcast<T: Clone> {
    subscribers: Vec<(SubscriberId, Callback<T>)>,
    last: Option<T>,
    next_id: SubscriberId,
}

impl<T: Clone> Broadcast<T> {
    /// Create an empty channel with no published value
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            last: None,
            next_id: 0,
        }
    }

    /// Register a subscriber callback
    ///
    /// If a value has already been published, the callback is invoked with
    /// it immediately, before this call returns.
    pub fn subscribe(&mut self, mut callback: impl FnMut(&T) + 'static) -> SubscriberId {
        if let Some(value) = &self.last {
            callback(value);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber; unknown ids are ignored
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Publish a value to every subscriber and retain it for replay
    pub fn publish(&mut self, value: T) {
        for (_, callback) in &mut self.subscribers {
            callback(&value);
        }
        self.last = Some(value);
    }

    /// The most recently published value, if any
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}
