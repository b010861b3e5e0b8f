use crate::actor::{Actor, Codepoint};
use crate::params::Params;

/// Owned record of a single action emitted by the parser.
///
/// Recording into a `Vec<Event>` is the simplest way to capture a parsing
/// session, e.g. for tests, diagnostics, or replay.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "action", rename_all = "snake_case")
)]
pub enum Event {
    Print {
        c: Codepoint,
    },
    Execute {
        byte: u8,
    },
    EscDispatch {
        intermediates: Vec<u8>,
        byte: u8,
    },
    CsiDispatch {
        params: Vec<Vec<u16>>,
        intermediates: Vec<u8>,
        byte: u8,
    },
    Hook {
        params: Vec<Vec<u16>>,
        intermediates: Vec<u8>,
        byte: u8,
    },
    Put {
        c: Codepoint,
    },
    Unhook,
    OscStart,
    OscPut {
        c: Codepoint,
    },
    OscEnd,
}

impl Event {
    /// Snake case name of the action, as used by the DEC state diagram.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Print { .. } => "print",
            Self::Execute { .. } => "execute",
            Self::EscDispatch { .. } => "esc_dispatch",
            Self::CsiDispatch { .. } => "csi_dispatch",
            Self::Hook { .. } => "hook",
            Self::Put { .. } => "put",
            Self::Unhook => "unhook",
            Self::OscStart => "osc_start",
            Self::OscPut { .. } => "osc_put",
            Self::OscEnd => "osc_end",
        }
    }
}

impl Actor for Vec<Event> {
    fn print(&mut self, c: Codepoint) {
        self.push(Event::Print { c });
    }

    fn execute(&mut self, byte: u8) {
        self.push(Event::Execute { byte });
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], byte: u8) {
        self.push(Event::EscDispatch {
            intermediates: intermediates.to_vec(),
            byte,
        });
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], byte: u8) {
        self.push(Event::CsiDispatch {
            params: params.to_vec(),
            intermediates: intermediates.to_vec(),
            byte,
        });
    }

    fn hook(&mut self, params: &Params, intermediates: &[u8], byte: u8) {
        self.push(Event::Hook {
            params: params.to_vec(),
            intermediates: intermediates.to_vec(),
            byte,
        });
    }

    fn put(&mut self, c: Codepoint) {
        self.push(Event::Put { c });
    }

    fn unhook(&mut self) {
        self.push(Event::Unhook);
    }

    fn osc_start(&mut self) {
        self.push(Event::OscStart);
    }

    fn osc_put(&mut self, c: Codepoint) {
        self.push(Event::OscPut { c });
    }

    fn osc_end(&mut self) {
        self.push(Event::OscEnd);
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_action_tag() {
        let event = Event::CsiDispatch {
            params: vec![vec![38, 5, 1]],
            intermediates: vec![],
            byte: b'm',
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"action":"csi_dispatch","params":[[38,5,1]],"intermediates":[],"byte":109}"#
        );

        let json = serde_json::to_string(&Event::Print {
            c: Codepoint::Raw(0xc2),
        })
        .unwrap();
        assert_eq!(json, r#"{"action":"print","c":{"raw":194}}"#);
    }
}
