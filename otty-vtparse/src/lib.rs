//! Table-driven DEC/ANSI escape sequence parser.
//!
//! The parser follows the state diagram published at
//! <https://vt100.net/emu/dec_ansi_parser>, with two deliberate deviations:
//! bytes at or above 0x80 are decoded as UTF-8 text instead of being treated
//! as C1 controls, and a lone `ESC` terminates OSC and DCS strings without
//! waiting for the `\` of a full string terminator.
//!
//! ```
//! use otty_vtparse::{Codepoint, Event, Parser};
//!
//! let mut parser = Parser::new();
//! let mut events = Vec::new();
//! parser.advance(b"\x1b[1;2:3mok", &mut events);
//!
//! assert_eq!(
//!     events[0],
//!     Event::CsiDispatch {
//!         params: vec![vec![1], vec![2, 3]],
//!         intermediates: vec![],
//!         byte: b'm',
//!     }
//! );
//! assert_eq!(events[1], Event::Print { c: Codepoint::Char('o') });
//! ```
mod actor;
mod classify;
mod enums;
mod event;
mod params;
mod parser;
mod transitions;
mod utf8;

pub use actor::{Actor, Codepoint};
pub use classify::{ByteClass, classify};
pub use enums::State;
pub use event::Event;
pub use params::{MAX_PARAMS, MAX_SUBPARAMS, Params};
pub use parser::{MAX_INTERMEDIATES, Parser};
