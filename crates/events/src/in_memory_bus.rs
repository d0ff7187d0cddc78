//! In-memory bus with a bounded mailbox per subscriber.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::bus::{EventBus, Mailbox, Subscription};

/// Messages kept per subscriber before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("subscriber list lock poisoned")]
    Poisoned,
}

/// In-memory pub/sub bus.
///
/// Fan-out is synchronous. A subscription that is held but never drained
/// costs at most `capacity` messages: once full, each publish evicts its
/// oldest entry. Subscriptions whose handle was dropped are pruned on the
/// next publish.
pub struct InMemoryEventBus<M> {
    mailboxes: Mutex<Vec<Arc<Mailbox<M>>>>,
    capacity: usize,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Bus whose subscribers buffer at most `capacity` messages (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mailboxes: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of subscribers that were alive at the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.mailboxes.lock().map(|boxes| boxes.len()).unwrap_or(0)
    }

    fn mailboxes(&self) -> MutexGuard<'_, Vec<Arc<Mailbox<M>>>> {
        self.mailboxes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> core::fmt::Debug for InMemoryEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("subscribers", &self.subscriber_count())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<M> Drop for InMemoryEventBus<M> {
    fn drop(&mut self) {
        for mailbox in self.mailboxes().iter() {
            mailbox.close();
        }
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut mailboxes = self.mailboxes.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        // The bus holds the only reference once a subscription is dropped.
        let before = mailboxes.len();
        mailboxes.retain(|mailbox| Arc::strong_count(mailbox) > 1);
        if mailboxes.len() != before {
            tracing::trace!(dropped = before - mailboxes.len(), "pruned closed subscriptions");
        }

        let mut lagging = 0usize;
        for mailbox in mailboxes.iter() {
            if mailbox.push(message.clone()) {
                lagging += 1;
            }
        }
        if lagging > 0 {
            tracing::trace!(lagging, capacity = self.capacity, "evicted oldest message for lagging subscribers");
        }

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let mailbox = Arc::new(Mailbox::new(self.capacity));
        self.mailboxes().push(Arc::clone(&mailbox));
        Subscription::attach(mailbox)
    }
}
