//! Incremental UTF-8 recognizer used while bytes are treated as text.
//!
//! Decoding itself is delegated to [`utf8parse`], which already enforces the
//! strict continuation ranges (no overlongs, no surrogates, nothing above
//! U+10FFFF). On top of it this module remembers the raw bytes of the
//! sequence in flight, so that a broken sequence can be handed back to the
//! parser byte by byte instead of collapsing into a replacement character.

use utf8parse::Receiver;

/// Longest prefix that can be pending: a four byte sequence broken on its
/// last byte.
const MAX_PENDING: usize = 3;

/// Raw bytes released by the recognizer, in arrival order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawBytes {
    bytes: [u8; MAX_PENDING],
    len: usize,
}

impl RawBytes {
    fn single(byte: u8) -> Self {
        let mut raw = Self::default();
        raw.push(byte);
        raw
    }

    fn push(&mut self, byte: u8) {
        if self.len < MAX_PENDING {
            self.bytes[self.len] = byte;
            self.len += 1;
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Result of feeding one byte to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// More continuation bytes are needed.
    Pending,
    /// A complete Unicode scalar value was decoded.
    Complete(char),
    /// The bytes in `raw` do not form valid UTF-8 and must be emitted one by
    /// one. When `reprocess` is set the current byte was not consumed: it
    /// broke the pending sequence and has to be classified again from
    /// scratch.
    Invalid { raw: RawBytes, reprocess: bool },
}

/// Captures what [`utf8parse`] reported for a single byte.
#[derive(Default)]
enum Signal {
    #[default]
    Idle,
    Codepoint(char),
    Invalid,
}

impl Receiver for Signal {
    fn codepoint(&mut self, c: char) {
        *self = Signal::Codepoint(c);
    }

    fn invalid_sequence(&mut self) {
        *self = Signal::Invalid;
    }
}

#[derive(Default)]
pub(crate) struct Utf8Recognizer {
    inner: utf8parse::Parser,
    pending: RawBytes,
}

impl Utf8Recognizer {
    /// Whether a multi-byte sequence is in progress.
    #[inline]
    pub(crate) fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn advance(&mut self, byte: u8) -> Step {
        let mut signal = Signal::default();
        self.inner.advance(&mut signal, byte);

        match signal {
            Signal::Idle => {
                self.pending.push(byte);
                Step::Pending
            },
            Signal::Codepoint(c) => {
                self.pending = RawBytes::default();
                Step::Complete(c)
            },
            Signal::Invalid if self.is_pending() => Step::Invalid {
                raw: std::mem::take(&mut self.pending),
                reprocess: true,
            },
            Signal::Invalid => Step::Invalid {
                raw: RawBytes::single(byte),
                reprocess: false,
            },
        }
    }

    /// Releases the bytes of an unfinished sequence and starts over.
    pub(crate) fn flush(&mut self) -> RawBytes {
        self.inner = utf8parse::Parser::new();
        std::mem::take(&mut self.pending)
    }
}
