//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let (transport, probe) = tracked(&["data: {}\n\n"]);
//! let frames: Vec<_> = decode_frames(transport).collect().await;
//! assert_eq!(probe.releases(), 1);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;

/// Shared counters for a [`TrackedTransport`].
#[derive(Debug, Clone, Default)]
pub struct TransportProbe {
    reads: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl TransportProbe {
    /// Chunks handed to the consumer so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Times the transport was dropped.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

/// A transport that counts reads and records when it is released.
pub struct TrackedTransport {
    items: VecDeque<Result<Bytes, HttpError>>,
    probe: TransportProbe,
}

impl Stream for TrackedTransport {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let item = self.items.pop_front();
        if item.is_some() {
            self.probe.reads.fetch_add(1, Ordering::SeqCst);
        }
        Poll::Ready(item)
    }
}

impl Drop for TrackedTransport {
    fn drop(&mut self) {
        self.probe.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// A tracked transport delivering `chunks` and then ending.
pub fn tracked(chunks: &[&str]) -> (TrackedTransport, TransportProbe) {
    tracked_items(chunks.iter().map(|c| Ok(Bytes::from(c.to_string()))).collect())
}

/// A tracked transport delivering `chunks` and then failing.
pub fn tracked_failing(chunks: &[&str], message: &str) -> (TrackedTransport, TransportProbe) {
    let mut items: VecDeque<_> = chunks.iter().map(|c| Ok(Bytes::from(c.to_string()))).collect();
    items.push_back(Err(HttpError::Io(message.to_string())));
    tracked_items(items)
}

fn tracked_items(items: VecDeque<Result<Bytes, HttpError>>) -> (TrackedTransport, TransportProbe) {
    let probe = TransportProbe::default();
    let transport = TrackedTransport {
        items,
        probe: probe.clone(),
    };
    (transport, probe)
}

/// A plain transport over byte chunks.
pub fn byte_chunks(chunks: Vec<Vec<u8>>) -> impl Stream<Item = Result<Bytes, HttpError>> + Unpin {
    futures::stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect::<Vec<_>>())
}

/// Split `input` at every position in `cuts` (byte offsets, ascending).
pub fn split_at(input: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut parts = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts {
        parts.push(input[start..cut].to_vec());
        start = cut;
    }
    parts.push(input[start..].to_vec());
    parts
}
