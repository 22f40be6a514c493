//! Fixed-capacity blocking FIFO
//!
//! [`BoundedQueue`] is a circular buffer of owned slots guarded by a single
//! mutex, with one condition variable per direction:
//!
//! - producers wait on `not_full` while every slot is occupied
//! - consumers wait on `not_empty` while no slot is occupied
//!
//! Each successful operation changes the occupancy by exactly one, so it
//! wakes at most one waiter on the opposite side (`notify_one`).
//!
//! The blocking operations ([`BoundedQueue::enqueue`], [`BoundedQueue::dequeue`])
//! are total: they either complete or keep waiting. Backpressure is expressed
//! by blocking, never by an error. The `try_*` and `*_timeout` variants give
//! callers a way out of an indefinite wait.

use crate::queue::error::{QueueError, QueueResult};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Circular slot storage. Only ever touched with the queue mutex held.
#[derive(Debug)]
struct Ring<T> {
    slots: Box<[Option<T>]>,
    /// Oldest occupied slot (next to dequeue)
    head: usize,
    /// Next free slot (next to enqueue)
    tail: usize,
    count: usize,
}

impl<T> Ring<T> {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn push(&mut self, value: T) {
        debug_assert!(!self.is_full());
        debug_assert!(self.slots[self.tail].is_none());

        self.slots[self.tail] = Some(value);
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
    }

    fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.head].take();
        debug_assert!(value.is_some(), "occupied slot at head was empty");

        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        value
    }
}

/// Bounded, blocking, multi-producer multi-consumer FIFO queue
///
/// Values are moved into the queue on enqueue and moved out to the caller on
/// dequeue. Share it between threads with an `Arc`.
///
/// # Destruction
///
/// [`BoundedQueue::destroy`] (or dropping the queue) releases any values still
/// queued. A thread blocked in `enqueue`/`dequeue` holds a borrow of the queue,
/// so the queue cannot be destroyed underneath it: all workers using the queue
/// must be joined first.
///
/// # Example
///
/// ```rust
/// use sensorpipe::queue::BoundedQueue;
/// use std::sync::Arc;
/// use std::thread;
///
/// let queue = Arc::new(BoundedQueue::new(2).unwrap());
///
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for reading in ["21.5", "21.7", "22.0"] {
///             queue.enqueue(reading.to_string());
///         }
///     })
/// };
///
/// assert_eq!(queue.dequeue(), "21.5");
/// assert_eq!(queue.dequeue(), "21.7");
/// assert_eq!(queue.dequeue(), "22.0");
/// producer.join().unwrap();
/// ```
#[derive(Debug)]
pub struct BoundedQueue<T> {
    ring: Mutex<Ring<T>>,
    /// Fixed at construction; read without the lock
    capacity: usize,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with room for exactly `capacity` values
    ///
    /// Fails with [`QueueError::Allocation`] when `capacity` is zero or the
    /// slot storage cannot be reserved.
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::Allocation {
                capacity,
                reason: "capacity must be greater than zero".to_string(),
            });
        }

        let mut slots: Vec<Option<T>> = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|e| QueueError::Allocation {
                capacity,
                reason: e.to_string(),
            })?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            ring: Mutex::new(Ring {
                slots: slots.into_boxed_slice(),
                head: 0,
                tail: 0,
                count: 0,
            }),
            capacity,
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        })
    }

    /// Append a value, blocking while the queue is full
    pub fn enqueue(&self, value: T) {
        let mut ring = self.lock();
        while ring.is_full() {
            ring = self
                .not_full
                .wait(ring)
                .unwrap_or_else(PoisonError::into_inner);
        }
        ring.push(value);
        drop(ring);

        self.not_empty.notify_one();
    }

    /// Remove and return the oldest value, blocking while the queue is empty
    pub fn dequeue(&self) -> T {
        let mut ring = self.lock();
        loop {
            if let Some(value) = ring.pop() {
                drop(ring);
                self.not_full.notify_one();
                return value;
            }
            ring = self
                .not_empty
                .wait(ring)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Append a value only if a slot is free right now
    ///
    /// Hands the value back when the queue is full.
    pub fn try_enqueue(&self, value: T) -> Result<(), T> {
        let mut ring = self.lock();
        if ring.is_full() {
            return Err(value);
        }
        ring.push(value);
        drop(ring);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest value only if one is available right now
    pub fn try_dequeue(&self) -> Option<T> {
        let value = self.lock().pop()?;
        self.not_full.notify_one();
        Some(value)
    }

    /// Append a value, waiting at most `timeout` for a free slot
    ///
    /// Hands the value back if the deadline passes while the queue is still full.
    pub fn enqueue_timeout(&self, value: T, timeout: Duration) -> Result<(), T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            self.enqueue(value);
            return Ok(());
        };

        let mut ring = self.lock();
        while ring.is_full() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(value);
            }
            let (guard, _) = self
                .not_full
                .wait_timeout(ring, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            ring = guard;
        }
        ring.push(value);
        drop(ring);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest value, waiting at most `timeout` for one to arrive
    pub fn dequeue_timeout(&self, timeout: Duration) -> Option<T> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.dequeue());
        };

        let mut ring = self.lock();
        loop {
            if let Some(value) = ring.pop() {
                drop(ring);
                self.not_full.notify_one();
                return Some(value);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let (guard, _) = self
                .not_empty
                .wait_timeout(ring, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            ring = guard;
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of values currently queued
    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock().is_full()
    }

    /// Tear the queue down, releasing any values still queued
    pub fn destroy(self) {
        let ring = self
            .ring
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        if ring.count > 0 {
            log::debug!(
                "Discarding {} queued value(s) on destroy (capacity {})",
                ring.count,
                ring.capacity()
            );
        }
    }

    // Critical sections never run caller code, so a poisoned guard still
    // holds a consistent ring.
    fn lock(&self) -> MutexGuard<'_, Ring<T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
