//! Line classification and payload extraction for a single frame.

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// Event type declaration (e.g., "event: letter")
    Event(&'a str),
    /// Data payload with the prefix removed (e.g., "data: {\"response\": \"hi\"}")
    Data(&'a str),
    /// Empty line - signals end of frame
    Empty,
    /// Comment line (starts with ':') or any unrecognised line
    Comment(&'a str),
}

/// Strip a field prefix and the single optional space that may follow it.
fn field_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Parse a single SSE line into its component type
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim());
    }

    if let Some(value) = field_value(line, "event:") {
        return SseLine::Event(value.trim());
    }

    if let Some(value) = field_value(line, "data:") {
        return SseLine::Data(value);
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line)
}

/// Build a frame's payload from its raw text.
///
/// Data lines are concatenated with their prefix removed; every other line is
/// ignored. Returns `None` when the frame carries no data line at all (a
/// keep-alive comment, for example).
pub fn frame_payload(raw: &str) -> Option<String> {
    let mut payload: Option<String> = None;

    for line in raw.split('\n') {
        if let SseLine::Data(data) = parse_sse_line(line) {
            payload.get_or_insert_with(String::new).push_str(data);
        }
    }

    payload
}
