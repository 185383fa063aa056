//! Minimal publish/subscribe plumbing used for the live progress and like
//! streams. A `Feed` lives on the producing side; each `Subscription` owns
//! its receiving end and tears itself down on `unsubscribe` or drop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

struct Slot<T> {
    tx: Sender<T>,
    active: Arc<AtomicBool>,
}

pub struct Feed<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T: Clone> Feed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription<T> {
        let (tx, rx) = mpsc::channel();
        let active = Arc::new(AtomicBool::new(true));
        self.slots.push(Slot {
            tx,
            active: Arc::clone(&active),
        });
        Subscription {
            rx,
            active,
            last: None,
        }
    }

    /// Subscribe and queue `initial` as the first delivered value.
    pub fn subscribe_with(&mut self, initial: T) -> Subscription<T> {
        let sub = self.subscribe();
        if let Some(slot) = self.slots.last() {
            let _ = slot.tx.send(initial);
        }
        sub
    }

    pub fn publish(&mut self, value: T) {
        self.slots.retain(|slot| {
            if !slot.active.load(Ordering::Acquire) {
                return false;
            }
            slot.tx.send(value.clone()).is_ok()
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.active.load(Ordering::Acquire))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriber_count() == 0
    }
}

pub struct Subscription<T> {
    rx: Receiver<T>,
    active: Arc<AtomicBool>,
    last: Option<T>,
}

impl<T: Clone + PartialEq> Subscription<T> {
    /// Drain everything queued and return the newest value, but only when it
    /// differs from the previously returned one.
    pub fn poll(&mut self) -> Option<T> {
        let mut newest = None;
        loop {
            match self.rx.try_recv() {
                Ok(v) => newest = Some(v),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        let value = newest?;
        if self.last.as_ref() == Some(&value) {
            return None;
        }
        self.last = Some(value.clone());
        Some(value)
    }

    #[cfg(test)]
    pub fn wait(&mut self, timeout: std::time::Duration) -> Option<T> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            if let Some(v) = self.poll() {
                return Some(v);
            }
            if std::time::Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
    }
}

impl<T> Subscription<T> {
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn unsubscribe(self) {
        // drop does the work
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
