//! Transport chunk normalisation.
//!
//! A transport may hand the decoder raw bytes (an HTTP body) or text that
//! was already decoded upstream. Both are accepted through [`RawChunk`].

use bytes::Bytes;

/// One unit of data delivered by the transport.
///
/// Chunk boundaries carry no meaning: a frame may span several chunks and a
/// chunk may hold several frames plus a partial one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChunk {
    /// Undecoded bytes, expected to be UTF-8
    Bytes(Bytes),
    /// Text that is already decoded
    Text(String),
}

impl RawChunk {
    /// Number of bytes carried by this chunk.
    pub fn len(&self) -> usize {
        match self {
            RawChunk::Bytes(bytes) => bytes.len(),
            RawChunk::Text(text) => text.len(),
        }
    }

    /// True when the chunk carries no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Bytes> for RawChunk {
    fn from(bytes: Bytes) -> Self {
        RawChunk::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RawChunk {
    fn from(bytes: Vec<u8>) -> Self {
        RawChunk::Bytes(Bytes::from(bytes))
    }
}

impl From<&'static [u8]> for RawChunk {
    fn from(bytes: &'static [u8]) -> Self {
        RawChunk::Bytes(Bytes::from_static(bytes))
    }
}

impl From<String> for RawChunk {
    fn from(text: String) -> Self {
        RawChunk::Text(text)
    }
}

impl From<&str> for RawChunk {
    fn from(text: &str) -> Self {
        RawChunk::Text(text.to_string())
    }
}
