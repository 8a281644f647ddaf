//! FIFO shared between the router and its neighbouring tasks
//!
//! Every clone of a [`TaskQueue`] refers to the same underlying channel, so the
//! modem task, the APRS-IS task and the router can each hold their own handle.
//! None of the operations block.

use tracing::warn;

use crate::queue_config::queue_warning_threshold;

pub struct TaskQueue<T> {
    name: &'static str,
    capacity: usize,
    tx: flume::Sender<T>,
    rx: flume::Receiver<T>,
}

impl<T> Clone for TaskQueue<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            capacity: self.capacity,
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

impl<T> TaskQueue<T> {
    /// Create a bounded queue. `capacity` elements are accepted before
    /// [`add_element`](Self::add_element) starts dropping.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let (tx, rx) = flume::bounded(capacity);
        Self {
            name,
            capacity,
            tx,
            rx,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Take the oldest element, if any
    pub fn get_element(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Append an element without waiting.
    ///
    /// Returns `false` when the queue is full and the element was dropped.
    pub fn add_element(&self, element: T) -> bool {
        match self.tx.try_send(element) {
            Ok(()) => {
                let depth = self.rx.len();
                if depth >= queue_warning_threshold(self.capacity) {
                    warn!(
                        "Queue {} at {}/{} elements",
                        self.name, depth, self.capacity
                    );
                }
                true
            }
            Err(e) => {
                warn!("Queue {} rejected element: {}", self.name, e);
                metrics::counter!("router.queue.dropped_total", "queue" => self.name)
                    .increment(1);
                false
            }
        }
    }

    /// Await the next element; used by the tasks on the far side of the router
    pub async fn recv_async(&self) -> Option<T> {
        self.rx.recv_async().await.ok()
    }
}
