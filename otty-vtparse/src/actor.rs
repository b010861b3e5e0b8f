//! Callbacks invoked by the escape sequence parser.
//!
//! The [`Parser`](crate::Parser) walks through a byte stream and translates it
//! into terminal actions. Those actions are handed over to an [`Actor`]
//! implementation that is responsible for mutating a terminal model, updating
//! UI state, logging, or whatever else the embedding application needs. The
//! trait methods mirror the action set of the DEC/ECMA-48 escape sequence
//! state machine. Implementations receive actions synchronously and in the
//! order their triggering bytes were consumed, and should not attempt to
//! parse anything themselves.
use std::fmt;

use crate::params::Params;

/// A unit of text delivered by the parser.
///
/// ASCII bytes and well-formed UTF-8 sequences arrive as [`Codepoint::Char`].
/// Bytes that do not form valid UTF-8 are never dropped; each of them arrives
/// on its own as [`Codepoint::Raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Codepoint {
    Char(char),
    Raw(u8),
}

impl Codepoint {
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::Raw(_) => None,
        }
    }
}

impl From<char> for Codepoint {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl fmt::Display for Codepoint {
    /// Writes the character, or a `\xNN` escape for a raw byte.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Raw(byte) => write!(f, "\\x{byte:02x}"),
        }
    }
}

/// Consumer-facing interface for terminal actions emitted by the parser.
///
/// ## Terminology:
/// An intermediate is a byte in the range 0x20-0x2f that occurs before the
/// final byte of an escape sequence. A private marker (`<`, `=`, `>`, `?`)
/// opening a CSI or DCS parameter string is reported among the
/// intermediates as well.
///
/// `params` are the decimal parameters of CSI and DCS sequences, grouped by
/// `;` and subdivided by `:`. An omitted parameter is reported as zero, which
/// represents the default value for that parameter.
pub trait Actor {
    /// Emits a single unit of printable text.
    fn print(&mut self, c: Codepoint);

    /// Executes a single-byte C0 control function (e.g. `BEL`, `BS`, `CR`,
    /// `LF`), as well as `CAN` and `SUB` when they abort a sequence.
    fn execute(&mut self, byte: u8);

    /// Dispatches a standard escape sequence.
    fn esc_dispatch(&mut self, intermediates: &[u8], byte: u8);

    /// Dispatches a Control Sequence Introducer (CSI) sequence.
    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], byte: u8);

    /// Signals the start of a Device Control String (DCS). The payload follows
    /// through [`Actor::put`].
    fn hook(&mut self, params: &Params, intermediates: &[u8], byte: u8);

    /// Passes one unit of DCS payload to the handler chosen in `hook`. C0
    /// controls are passed through as well.
    fn put(&mut self, c: Codepoint);

    /// Marks the end of the current DCS.
    fn unhook(&mut self);

    /// Signals the start of an Operating System Command (OSC) string.
    fn osc_start(&mut self);

    /// Passes one unit of OSC payload.
    fn osc_put(&mut self, c: Codepoint);

    /// Marks the end of the current OSC string.
    fn osc_end(&mut self);
}
