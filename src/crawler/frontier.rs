//! Crawl frontier: the shared work queue and drain detection
//!
//! The frontier is a multi-producer, multi-consumer queue plus an
//! outstanding-work counter. Every submitted URL increments the counter and
//! is decremented only when the worker that dequeued it has finished with it,
//! including submitting the URL's children. The counter therefore reaches
//! zero only when nothing is queued and nothing is in flight.
//!
//! # Phases
//!
//! `Active` → `Draining` → `Drained` → `Stopped`
//!
//! [`Frontier::await_drained`] drives the first two transitions. The
//! coordinator then pushes one stop token per worker and marks the frontier
//! stopped once every worker has exited.

use crate::url::CanonicalUrl;
use std::sync::Mutex as StdMutex;
use tokio::sync::{mpsc, watch, Mutex};

/// An entry on the work queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontierItem {
    /// A canonical URL to process
    Visit(CanonicalUrl),
    /// Tells the worker that dequeues it to exit
    Stop,
}

/// Lifecycle of a frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierPhase {
    /// Accepting submissions and dequeues
    Active,
    /// Coordinator is waiting for in-flight work to finish
    Draining,
    /// Outstanding-work counter reached zero
    Drained,
    /// Every worker consumed its stop token and exited
    Stopped,
}

/// A dequeued URL; acknowledges itself to the frontier when dropped
///
/// Dropping the task is the only way to acknowledge it, so every dequeued
/// item is acknowledged exactly once on every path, including unwinding.
#[derive(Debug)]
pub struct Task<'a> {
    url: CanonicalUrl,
    frontier: &'a Frontier,
}

impl Task<'_> {
    pub fn url(&self) -> &CanonicalUrl {
        &self.url
    }
}

impl Drop for Task<'_> {
    fn drop(&mut self) {
        self.frontier.acknowledge();
    }
}

/// Shared work queue with an outstanding-work counter
#[derive(Debug)]
pub struct Frontier {
    sender: mpsc::UnboundedSender<FrontierItem>,
    receiver: Mutex<mpsc::UnboundedReceiver<FrontierItem>>,
    outstanding: watch::Sender<usize>,
    phase: StdMutex<FrontierPhase>,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (outstanding, _) = watch::channel(0);

        Self {
            sender,
            receiver: Mutex::new(receiver),
            outstanding,
            phase: StdMutex::new(FrontierPhase::Active),
        }
    }

    /// Queues a URL and counts it as outstanding work
    pub fn submit(&self, url: CanonicalUrl) {
        // Count first so the counter can never read zero while the item is queued
        self.outstanding.send_modify(|n| *n += 1);

        if self.sender.send(FrontierItem::Visit(url)).is_err() {
            // The receiver lives as long as `self`; this cannot happen
            self.acknowledge();
        }
    }

    /// Marks one previously submitted item as fully processed
    fn acknowledge(&self) {
        self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Waits for the next item
    ///
    /// Returns `None` when the caller dequeued a stop token and must exit.
    pub async fn next(&self) -> Option<Task<'_>> {
        let item = {
            let mut receiver = self.receiver.lock().await;
            receiver.recv().await
        };

        match item {
            Some(FrontierItem::Visit(url)) => Some(Task {
                url,
                frontier: self,
            }),
            Some(FrontierItem::Stop) | None => None,
        }
    }

    /// Number of submitted items not yet acknowledged
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Blocks until the outstanding-work counter is zero
    pub async fn await_drained(&self) {
        self.set_phase(FrontierPhase::Draining);

        let mut watcher = self.outstanding.subscribe();
        // The sender is owned by `self`, so the channel cannot close here
        let _ = watcher.wait_for(|n| *n == 0).await;

        self.set_phase(FrontierPhase::Drained);
    }

    /// Pushes one stop token per worker
    pub fn stop_workers(&self, workers: usize) {
        for _ in 0..workers {
            // Stop tokens are not work and are never acknowledged
            let _ = self.sender.send(FrontierItem::Stop);
        }
    }

    /// Records that every worker has exited
    pub fn mark_stopped(&self) {
        self.set_phase(FrontierPhase::Stopped);
    }

    pub fn phase(&self) -> FrontierPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: FrontierPhase) {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }
}
