//! Publish/subscribe abstraction (mechanics only).
//!
//! A bus fans a message out to every live subscriber. It stores nothing: the
//! publisher owns the state, subscribers receive snapshots of it.

use std::collections::VecDeque;
use std::sync::mpsc::{RecvError, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Bounded per-subscriber queue. When full, the oldest message is evicted.
pub(crate) struct Mailbox<M> {
    state: Mutex<MailboxState<M>>,
    ready: Condvar,
    capacity: usize,
}

struct MailboxState<M> {
    queue: VecDeque<M>,
    closed: bool,
    evicted: u64,
}

impl<M> Mailbox<M> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(MailboxState {
                queue: VecDeque::new(),
                closed: false,
                evicted: 0,
            }),
            ready: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MailboxState<M>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `message`; returns `true` if an older message had to be evicted.
    pub(crate) fn push(&self, message: M) -> bool {
        let mut state = self.lock();
        let evicted = state.queue.len() >= self.capacity;
        if evicted {
            state.queue.pop_front();
            state.evicted += 1;
        }
        state.queue.push_back(message);
        drop(state);
        self.ready.notify_one();
        evicted
    }

    /// No more messages will arrive; wakes blocked receivers.
    pub(crate) fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }
}

/// A subscription to a message stream.
///
/// Each subscription receives a copy of every message published after it was
/// created, in publish order. At most `capacity` messages are buffered; a
/// subscriber that never drains only ever holds the newest ones. Dropping it
/// unsubscribes.
///
/// ```ignore
/// let changes = store.subscribe();
/// store.toggle(Toggle::LocalDominance);
/// if let Some(change) = changes.latest() {
///     render(&change.totals);
/// }
/// ```
pub struct Subscription<M> {
    mailbox: Arc<Mailbox<M>>,
}

impl<M> Subscription<M> {
    pub(crate) fn attach(mailbox: Arc<Mailbox<M>>) -> Self {
        Self { mailbox }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        let mut state = self.mailbox.lock();
        loop {
            if let Some(message) = state.queue.pop_front() {
                return Ok(message);
            }
            if state.closed {
                return Err(RecvError);
            }
            state = self.mailbox.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        let mut state = self.mailbox.lock();
        match state.queue.pop_front() {
            Some(message) => Ok(message),
            None if state.closed => Err(TryRecvError::Disconnected),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        let deadline = Instant::now() + timeout;
        let mut state = self.mailbox.lock();
        loop {
            if let Some(message) = state.queue.pop_front() {
                return Ok(message);
            }
            if state.closed {
                return Err(RecvTimeoutError::Disconnected);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(RecvTimeoutError::Timeout);
            }
            let (guard, _) = self
                .mailbox
                .ready
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
        }
    }

    /// Drain everything already queued and return the most recent message.
    ///
    /// Views only ever need the latest snapshot.
    pub fn latest(&self) -> Option<M> {
        self.mailbox.lock().queue.drain(..).last()
    }

    /// Messages discarded because this subscription fell behind.
    pub fn evicted(&self) -> u64 {
        self.mailbox.lock().evicted
    }

    pub fn capacity(&self) -> usize {
        self.mailbox.capacity
    }
}

impl<M> core::fmt::Debug for Subscription<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.mailbox.lock();
        f.debug_struct("Subscription")
            .field("queued", &state.queue.len())
            .field("capacity", &self.mailbox.capacity)
            .field("evicted", &state.evicted)
            .field("closed", &state.closed)
            .finish()
    }
}

/// Broadcast bus.
///
/// Delivery is best-effort and in-process; a subscriber that went away is
/// silently dropped on the next publish.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
