//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the streamed body of the query and demand-letter endpoints.
//! SSE format consists of:
//! - `data: <json>` - data payload line
//! - Empty line - signals end of a frame
//! - Lines starting with `:` - comments (ignored)
//! - Any other line (`event:`, `id:`, ...) - ignored
//!
//! # Module structure
//! - `chunk` - Transport chunk normalisation (bytes or text)
//! - `utf8` - Incremental UTF-8 decoding across chunk boundaries
//! - `line` - Line classification and per-frame payload extraction
//! - `buffer` - Accumulator that yields complete frames
//! - `decoder` - The lazy frame `Stream` over a transport

mod buffer;
mod chunk;
mod decoder;
mod line;
mod utf8;

pub use buffer::FrameBuffer;
pub use chunk::RawChunk;
pub use decoder::{decode_frames, DecoderState, FrameDecoder};
pub use line::{frame_payload, parse_sse_line, SseLine};
pub use utf8::Utf8Decoder;
