//! Lazy frame stream over a chunked transport.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{FusedStream, Stream, StreamExt};
use tracing::{debug, error, info};

use super::buffer::FrameBuffer;
use super::chunk::RawChunk;
use super::line::frame_payload;
use super::utf8::Utf8Decoder;
use crate::error::StreamError;

/// Lifecycle of a [`FrameDecoder`]. `Open -> Closed` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Transport not yet exhausted
    Open,
    /// Transport ended or failed; only already-buffered frames remain
    Closed,
}

/// Turns a stream of transport chunks into a stream of frame payloads.
///
/// Each item is the concatenated `data:` text of one blank-line-delimited
/// frame, in arrival order. A frame already sitting in the buffer is yielded
/// without touching the transport; the transport is polled only when no
/// complete frame is buffered.
///
/// A transport error is yielded once as [`StreamError::Transport`] and the
/// decoder closes. A clean end yields `None`; any unterminated text left at
/// that point is dropped. The transport is released as soon as the decoder
/// closes, or when the decoder is dropped early.
pub struct FrameDecoder<S> {
    transport: Option<S>,
    utf8: Utf8Decoder,
    buffer: FrameBuffer,
    state: DecoderState,
    frames_emitted: usize,
    bytes_received: usize,
}

impl<S> FrameDecoder<S> {
    /// Wrap a transport stream. Nothing is read until the first poll.
    pub fn new(transport: S) -> Self {
        Self {
            transport: Some(transport),
            utf8: Utf8Decoder::new(),
            buffer: FrameBuffer::new(),
            state: DecoderState::Open,
            frames_emitted: 0,
            bytes_received: 0,
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Frames yielded so far.
    pub fn frames_emitted(&self) -> usize {
        self.frames_emitted
    }

    /// Bytes received from the transport so far.
    pub fn bytes_received(&self) -> usize {
        self.bytes_received
    }

    fn ingest(&mut self, chunk: RawChunk) {
        self.bytes_received += chunk.len();
        debug!(
            "SSE chunk received: {} bytes (total: {} bytes)",
            chunk.len(),
            self.bytes_received
        );
        match chunk {
            RawChunk::Bytes(bytes) => {
                let text = self.utf8.decode(&bytes);
                self.buffer.push(&text);
            }
            RawChunk::Text(text) => {
                // Bytes still waiting for the rest of a character came first
                let held = self.utf8.finish();
                self.buffer.push(&held);
                self.buffer.push(&text);
            }
        }
    }

    /// Next buffered frame that carries a payload.
    fn next_buffered_frame(&mut self) -> Option<String> {
        while let Some(raw) = self.buffer.next_frame() {
            match frame_payload(&raw) {
                Some(payload) => {
                    self.frames_emitted += 1;
                    debug!(
                        "SSE frame #{}: {} bytes",
                        self.frames_emitted,
                        payload.len()
                    );
                    return Some(payload);
                }
                None => debug!("SSE frame without data skipped"),
            }
        }
        None
    }

    /// Transport signalled end-of-stream.
    fn close(&mut self) {
        self.transport = None;
        let tail = self.utf8.finish();
        self.buffer.push(&tail);
        self.state = DecoderState::Closed;
        info!(
            "SSE stream ended: {} frames, {} bytes",
            self.frames_emitted, self.bytes_received
        );
    }

    /// Transport failed; nothing buffered is trusted after this point.
    fn fail(&mut self) {
        self.transport = None;
        self.buffer.discard();
        self.state = DecoderState::Closed;
    }
}

impl<S, C, E> Stream for FrameDecoder<S>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: Into<RawChunk>,
    E: fmt::Display,
{
    type Item = Result<String, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(frame) = this.next_buffered_frame() {
                return Poll::Ready(Some(Ok(frame)));
            }

            let transport = match (this.state, this.transport.as_mut()) {
                (DecoderState::Open, Some(transport)) => transport,
                _ => {
                    let discarded = this.buffer.discard();
                    if discarded > 0 {
                        debug!("SSE discarded {} bytes of unterminated frame", discarded);
                    }
                    return Poll::Ready(None);
                }
            };

            match transport.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => this.ingest(chunk.into()),
                Poll::Ready(Some(Err(err))) => {
                    error!(
                        "SSE transport failed after {} frames: {}",
                        this.frames_emitted, err
                    );
                    this.fail();
                    return Poll::Ready(Some(Err(StreamError::Transport {
                        message: err.to_string(),
                    })));
                }
                Poll::Ready(None) => this.close(),
            }
        }
    }
}

impl<S, C, E> FusedStream for FrameDecoder<S>
where
    S: Stream<Item = Result<C, E>> + Unpin,
    C: Into<RawChunk>,
    E: fmt::Display,
{
    fn is_terminated(&self) -> bool {
        self.state == DecoderState::Closed && self.buffer.is_empty()
    }
}

impl<S> fmt::Debug for FrameDecoder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDecoder")
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("frames_emitted", &self.frames_emitted)
            .field("bytes_received", &self.bytes_received)
            .finish()
    }
}

/// Start decoding frames from a transport stream.
pub fn decode_frames<S>(transport: S) -> FrameDecoder<S> {
    FrameDecoder::new(transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<Bytes, String>> + Unpin {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    async fn collect_ok<S>(decoder: FrameDecoder<S>) -> Vec<String>
    where
        S: Stream<Item = Result<Bytes, String>> + Unpin,
    {
        decoder
            .map(|item| item.expect("unexpected transport failure"))
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_fragmented_frames() {
        let decoder = decode_frames(chunks(&[
            "data: {\"respo",
            "nse\":\"Hel",
            "lo\"}\n\n",
            "data: {\"response\":\"!\"}\n\n",
        ]));

        assert_eq!(
            collect_ok(decoder).await,
            vec![
                "{\"response\":\"Hello\"}".to_string(),
                "{\"response\":\"!\"}".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_bundled_frames_are_separate() {
        let decoder = decode_frames(chunks(&["data: a\n\ndata: b\n\n"]));
        assert_eq!(collect_ok(decoder).await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_truncated_tail_is_discarded() {
        let decoder = decode_frames(chunks(&["data: a\n\n", "data: {\"resp"]));
        assert_eq!(collect_ok(decoder).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_tail_without_second_newline_is_discarded() {
        let decoder = decode_frames(chunks(&["data: a\n\ndata: b\n"]));
        assert_eq!(collect_ok(decoder).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_keepalive_frames_produce_nothing() {
        let decoder = decode_frames(chunks(&[": ping\n\n", "data: a\n\n", ": ping\n\n"]));
        assert_eq!(collect_ok(decoder).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let decoder = decode_frames(chunks(&[]));
        assert!(collect_ok(decoder).await.is_empty());
    }

    #[tokio::test]
    async fn test_text_chunks_are_accepted() {
        let transport = stream::iter(vec![
            Ok::<_, String>("data: x".to_string()),
            Ok("\n\n".to_string()),
        ]);
        let frames: Vec<_> = decode_frames(transport).collect().await;
        assert_eq!(frames, vec![Ok("x".to_string())]);
    }

    #[tokio::test]
    async fn test_multibyte_character_split_across_chunks() {
        let bytes = "data: ✓\n\n".as_bytes();
        let transport = stream::iter(
            bytes
                .iter()
                .map(|b| Ok::<_, String>(vec![*b]))
                .collect::<Vec<_>>(),
        );
        let frames: Vec<_> = decode_frames(transport).collect().await;
        assert_eq!(frames, vec![Ok("✓".to_string())]);
    }

    #[tokio::test]
    async fn test_text_after_incomplete_bytes_keeps_order() {
        let transport = stream::iter(vec![
            Ok::<_, String>(RawChunk::Bytes(Bytes::from_static(b"data: caf\xC3"))),
            Ok(RawChunk::Bytes(Bytes::from_static(b"\xA9"))),
            Ok(RawChunk::Bytes(Bytes::from_static(b" x\xC3"))),
            Ok(RawChunk::Text("y\n\n".to_string())),
        ]);
        let frames: Vec<_> = decode_frames(transport).collect().await;
        assert_eq!(frames, vec![Ok("caf\u{e9} x\u{FFFD}y".to_string())]);
    }

    #[tokio::test]
    async fn test_leading_bom_split_across_chunks() {
        let decoder = decode_frames(stream::iter(vec![
            Ok(Bytes::from_static(b"\xEF\xBB")),
            Ok(Bytes::from_static(b"\xBFdata: a\n\n")),
        ]));
        assert_eq!(collect_ok(decoder).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let transport = stream::iter(vec![
            Ok(Bytes::from_static(b"data: a\n\ndata: par")),
            Err("connection reset".to_string()),
            Ok(Bytes::from_static(b"tial\n\n")),
        ]);
        let mut decoder = decode_frames(transport);

        assert_eq!(decoder.next().await, Some(Ok("a".to_string())));
        assert_eq!(
            decoder.next().await,
            Some(Err(StreamError::Transport {
                message: "connection reset".to_string()
            }))
        );
        assert_eq!(decoder.state(), DecoderState::Closed);
        assert_eq!(decoder.next().await, None);
        assert!(decoder.is_terminated());
    }

    #[tokio::test]
    async fn test_counters_and_state() {
        let mut decoder = decode_frames(chunks(&["data: a\n\n", "data: b\n\n"]));
        assert_eq!(decoder.state(), DecoderState::Open);

        assert_eq!(decoder.next().await, Some(Ok("a".to_string())));
        assert_eq!(decoder.frames_emitted(), 1);
        assert_eq!(decoder.bytes_received(), 9);

        assert_eq!(decoder.next().await, Some(Ok("b".to_string())));
        assert_eq!(decoder.next().await, None);
        assert_eq!(decoder.state(), DecoderState::Closed);
        assert_eq!(decoder.frames_emitted(), 2);
        assert_eq!(decoder.bytes_received(), 18);
    }
}
