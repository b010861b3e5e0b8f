use log::{debug, trace};

use crate::actor::{Actor, Codepoint};
use crate::classify::classify;
use crate::enums::{Action, State};
use crate::params::Params;
use crate::transitions;
use crate::utf8::{Step, Utf8Recognizer};

/// Maximum number of intermediate bytes (private marker included) kept per
/// sequence.
pub const MAX_INTERMEDIATES: usize = 4;

#[derive(Debug, Default)]
struct Intermediates {
    items: [u8; MAX_INTERMEDIATES],
    idx: usize,
    ignored_excess: bool,
}

impl Intermediates {
    fn get(&self) -> &[u8] {
        &self.items[..self.idx]
    }

    fn collect(&mut self, byte: u8) {
        if self.idx < MAX_INTERMEDIATES {
            self.items[self.idx] = byte;
            self.idx += 1;
        } else if !self.ignored_excess {
            debug!("too many intermediates, ignoring {byte:#04x} and beyond");
            self.ignored_excess = true;
        }
    }

    fn clear(&mut self) {
        self.idx = 0;
        self.ignored_excess = false;
    }
}

/// DEC/ANSI escape sequence parser.
///
/// The parser consumes bytes one at a time and reports what it recognized to
/// an [`Actor`]. It never fails and never buffers input: every byte is fully
/// handled before the call consuming it returns. Multiple streams need one
/// parser each.
#[derive(Default)]
pub struct Parser {
    state: State,
    intermediates: Intermediates,
    params: Params,
    utf8: Utf8Recognizer,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the automaton.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Consumes `bytes` in order.
    pub fn advance<A: Actor>(&mut self, bytes: &[u8], actor: &mut A) {
        for &byte in bytes {
            self.advance_byte(byte, actor);
        }
    }

    /// Consumes a single byte.
    pub fn advance_byte<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        // A pending sequence only exists in text states and has to be
        // resolved before the byte can mean anything else.
        if self.utf8.is_pending() {
            self.advance_utf8(byte, actor);
        } else {
            self.transition(byte, actor);
        }
    }

    /// Ends the stream: bytes of an unfinished UTF-8 sequence are emitted as
    /// raw text. The state is left as is, so an open string stays open.
    pub fn finish<A: Actor>(&mut self, actor: &mut A) {
        let raw = self.utf8.flush();
        for &byte in raw.as_slice() {
            self.emit_text(Codepoint::Raw(byte), actor);
        }
    }

    /// Returns to [`State::Ground`], discarding any partial sequence without
    /// emitting anything.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.intermediates.clear();
        self.params.begin();
        self.utf8.flush();
    }

    fn transition<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        let (next_state, action) =
            transitions::transit(self.state, classify(byte));

        if self.state == next_state {
            self.perform(action, byte, actor);
            return;
        }

        trace!("{:?} -> {:?} on {byte:#04x}", self.state, next_state);

        self.perform(transitions::exit_action(self.state), byte, actor);
        self.perform(action, byte, actor);
        self.perform(transitions::entry_action(next_state), byte, actor);

        self.state = next_state;
    }

    fn perform<A: Actor>(&mut self, action: Action, byte: u8, actor: &mut A) {
        use Action::*;

        match action {
            Print => actor.print(Codepoint::Char(byte as char)),
            Execute => actor.execute(byte),
            Put => actor.put(Codepoint::Char(byte as char)),
            OscPut => actor.osc_put(Codepoint::Char(byte as char)),
            Utf8 => self.advance_utf8(byte, actor),
            Clear => self.clear(),
            Collect => self.intermediates.collect(byte),
            Param => self.param(byte),
            EscDispatch => actor.esc_dispatch(self.intermediates.get(), byte),
            CsiDispatch => actor.csi_dispatch(
                self.params.finish(),
                self.intermediates.get(),
                byte,
            ),
            Hook => {
                actor.hook(self.params.finish(), self.intermediates.get(), byte)
            },
            Unhook => actor.unhook(),
            OscStart => actor.osc_start(),
            OscEnd => actor.osc_end(),
            None | Ignore => {},
        }
    }

    fn advance_utf8<A: Actor>(&mut self, byte: u8, actor: &mut A) {
        match self.utf8.advance(byte) {
            Step::Pending => {},
            Step::Complete(c) => self.emit_text(Codepoint::Char(c), actor),
            Step::Invalid { raw, reprocess } => {
                for &raw_byte in raw.as_slice() {
                    self.emit_text(Codepoint::Raw(raw_byte), actor);
                }

                // The byte that broke the sequence starts over. The
                // recognizer is idle now, so this cannot loop.
                if reprocess {
                    self.transition(byte, actor);
                }
            },
        }
    }

    /// Delivers text in whichever way the current state consumes it.
    fn emit_text<A: Actor>(&self, c: Codepoint, actor: &mut A) {
        match self.state {
            State::Ground => actor.print(c),
            State::OscString => actor.osc_put(c),
            State::DcsPassthrough => actor.put(c),
            state => debug!("dropping text {c:?} in non-text state {state:?}"),
        }
    }

    fn param(&mut self, byte: u8) {
        match byte {
            b'0'..=b'9' => self.params.digit(byte - b'0'),
            b':' => self.params.subseparator(),
            _ => self.params.separator(),
        }
    }

    fn clear(&mut self) {
        self.intermediates.clear();
        self.params.begin();
    }
}
